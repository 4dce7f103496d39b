use super::{HapticBackend, Pulse};
use async_channel::{Receiver, Sender, TrySendError};
use std::sync::Arc;

/// Interaction-side end of the haptic queue. Never blocks: the queue is unbounded, so every
/// distinct transition is kept, and a worker that has gone away is only logged.
#[derive(Debug, Clone)]
pub struct HapticDispatcher {
    tx: Sender<Pulse>,
}

impl HapticDispatcher {
    pub fn new(tx: Sender<Pulse>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, Receiver<Pulse>) {
        let (tx, rx) = async_channel::unbounded();
        (Self::new(tx), rx)
    }

    pub fn dispatch(&self, pulse: Pulse) {
        match self.tx.try_send(pulse) {
            Ok(()) => {}
            Err(TrySendError::Closed(_)) => {
                log::warn!("Haptic worker is gone, dropping pulse for {}", pulse.direction)
            }
            Err(TrySendError::Full(_)) => {
                log::warn!("Haptic queue full, dropping pulse for {}", pulse.direction)
            }
        }
    }
}

/// Effect-context loop. Backend failures are logged and swallowed.
pub async fn run_haptic_worker(rx: Receiver<Pulse>, backend: Arc<dyn HapticBackend>) {
    while let Ok(pulse) = rx.recv().await {
        if let Err(e) = backend.pulse(pulse.intensity) {
            log::warn!("Haptic pulse for {} failed: {}", pulse.direction, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haptics::{HapticError, Intensity, NullHaptics};
    use crate::menu::Direction;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Intensity>>);

    impl HapticBackend for Recorder {
        fn pulse(&self, intensity: Intensity) -> Result<(), HapticError> {
            self.0.lock().push(intensity);
            Ok(())
        }
    }

    fn pulse(direction: Direction, intensity: Intensity) -> Pulse {
        Pulse {
            direction,
            intensity,
        }
    }

    #[tokio::test]
    async fn test_worker_delivers_in_order() {
        let (dispatcher, rx) = HapticDispatcher::channel();
        let recorder = Arc::new(Recorder::default());

        dispatcher.dispatch(pulse(Direction::Right, Intensity::Light));
        dispatcher.dispatch(pulse(Direction::Down, Intensity::Heavy));
        drop(dispatcher);

        run_haptic_worker(rx, recorder.clone()).await;
        assert_eq!(*recorder.0.lock(), vec![Intensity::Light, Intensity::Heavy]);
    }

    #[tokio::test]
    async fn test_worker_swallows_backend_failure() {
        let (dispatcher, rx) = HapticDispatcher::channel();
        dispatcher.dispatch(pulse(Direction::Up, Intensity::Light));
        drop(dispatcher);

        run_haptic_worker(rx, Arc::new(NullHaptics)).await;
    }

    #[test]
    fn test_dispatch_without_worker_does_not_panic() {
        let (dispatcher, rx) = HapticDispatcher::channel();
        drop(rx);
        dispatcher.dispatch(pulse(Direction::Left, Intensity::Light));
    }
}
