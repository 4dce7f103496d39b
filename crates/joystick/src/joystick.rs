use crate::anim::{AnimationController, Frame};
use crate::config::Config;
use crate::gesture::{
    GestureSnapshot, GestureState, GestureTracker, PointerEvent, Progress, SharedGestureState,
};
use crate::haptics::{HapticDispatcher, HapticNotifier};
use crate::menu::{Direction, Registry};
use crate::theme::Theme;
use std::time::{Duration, Instant};

/// Called once for every gesture that opened the menu, with the direction active at release.
pub trait ReleaseHandler {
    fn on_release(&mut self, direction: Option<Direction>);
}

impl<F> ReleaseHandler for F
where
    F: FnMut(Option<Direction>),
{
    fn on_release(&mut self, direction: Option<Direction>) {
        self(direction)
    }
}

/// The composed menu. Pointer events go in; after every change of gesture state the active
/// direction feeds the haptic notifier and the animation targets, and a completed gesture
/// reaches the release handler.
pub struct Joystick<H> {
    tracker: GestureTracker,
    notifier: HapticNotifier,
    haptics: HapticDispatcher,
    animation: AnimationController,
    registry: Registry,
    theme: Theme,
    on_release: H,
}

impl<H: ReleaseHandler> Joystick<H> {
    pub fn new(config: &Config, haptics: HapticDispatcher, on_release: H) -> Self {
        let registry = Registry::from_config(config);
        Self {
            tracker: GestureTracker::new(config.activation(), config.dead_zone()),
            notifier: HapticNotifier::new(config.haptics.intensity),
            haptics,
            animation: AnimationController::new(&registry),
            registry,
            theme: Theme::from_config(&config.theme),
            on_release,
        }
    }

    pub fn handle(&mut self, event: PointerEvent) -> Progress {
        let progress = self.tracker.handle(&event);
        self.propagate(progress);
        progress
    }

    /// Lets a held press open the menu without waiting for the pointer to move.
    pub fn poll(&mut self, now: Instant) -> Progress {
        let progress = self.tracker.poll(now);
        self.propagate(progress);
        progress
    }

    /// One animation step: the displacement eases home after a release and every visual
    /// spring moves toward its target.
    pub fn advance(&mut self, dt: Duration) {
        if self.tracker.advance(dt) {
            self.retarget();
        }
        self.animation.advance(dt);
    }

    /// Applies new item styling and theme. A gesture in flight is kept.
    pub fn reconfigure(&mut self, config: &Config) {
        self.registry = Registry::from_config(config);
        self.theme = Theme::from_config(&config.theme);
        self.retarget();
    }

    pub fn frame(&self) -> Frame {
        self.animation.frame(&self.registry, &self.theme)
    }

    pub fn state(&self) -> GestureState {
        self.tracker.state()
    }

    pub fn active_direction(&self) -> Option<Direction> {
        self.tracker.active_direction()
    }

    pub fn snapshot(&self) -> GestureSnapshot {
        self.tracker.snapshot()
    }

    pub fn shared(&self) -> SharedGestureState {
        self.tracker.shared()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracker.is_tracking()
    }

    pub fn is_animating(&self) -> bool {
        self.tracker.is_returning() || !self.animation.is_settled()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn release_handler(&self) -> &H {
        &self.on_release
    }

    pub fn release_handler_mut(&mut self) -> &mut H {
        &mut self.on_release
    }

    fn propagate(&mut self, progress: Progress) {
        if matches!(progress, Progress::Ignored | Progress::Pending) {
            return;
        }

        if let Some(pulse) = self.notifier.observe(self.tracker.active_direction()) {
            self.haptics.dispatch(pulse);
        }
        self.retarget();

        if let Progress::Released(direction) = progress {
            self.on_release.on_release(direction);
        }
    }

    fn retarget(&mut self) {
        self.animation.retarget(
            self.tracker.state(),
            self.tracker.active_direction(),
            &self.registry,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector;
    use crate::gesture::PointerId;
    use crate::haptics::Pulse;
    use async_channel::Receiver;

    const ID: PointerId = PointerId::new(0);

    #[derive(Default)]
    struct Releases(Vec<Option<Direction>>);

    impl ReleaseHandler for Releases {
        fn on_release(&mut self, direction: Option<Direction>) {
            self.0.push(direction);
        }
    }

    fn joystick() -> (Joystick<Releases>, Receiver<Pulse>, Instant) {
        let (haptics, pulses) = HapticDispatcher::channel();
        let joystick = Joystick::new(&Config::default(), haptics, Releases::default());
        (joystick, pulses, Instant::now())
    }

    fn open(joystick: &mut Joystick<Releases>, start: Instant) {
        joystick.handle(PointerEvent::Press {
            pointer: ID,
            at: start,
        });
        assert_eq!(
            joystick.poll(start + Duration::from_millis(20)),
            Progress::Opened
        );
    }

    fn drag(joystick: &mut Joystick<Releases>, start: Instant, x: f64, y: f64) -> Progress {
        joystick.handle(PointerEvent::Move {
            pointer: ID,
            translation: Vector::new(x, y),
            at: start + Duration::from_millis(30),
        })
    }

    fn pulse_directions(pulses: &Receiver<Pulse>) -> Vec<Direction> {
        std::iter::from_fn(|| pulses.try_recv().ok())
            .map(|p| p.direction)
            .collect()
    }

    #[test]
    fn test_pulses_once_per_new_direction() {
        let (mut joystick, pulses, start) = joystick();
        open(&mut joystick, start);

        drag(&mut joystick, start, 20.0, 0.0);
        drag(&mut joystick, start, 120.0, 0.0);
        drag(&mut joystick, start, 150.0, 5.0);
        drag(&mut joystick, start, 0.0, 120.0);
        drag(&mut joystick, start, 0.0, 10.0);

        assert_eq!(
            pulse_directions(&pulses),
            vec![Direction::Right, Direction::Down]
        );
    }

    #[test]
    fn test_release_reaches_handler_once() {
        let (mut joystick, _pulses, start) = joystick();
        open(&mut joystick, start);
        drag(&mut joystick, start, -90.0, 10.0);

        let progress = joystick.handle(PointerEvent::Release {
            pointer: ID,
            at: start + Duration::from_millis(40),
        });

        assert_eq!(progress, Progress::Released(Some(Direction::Left)));
        assert_eq!(joystick.release_handler().0, vec![Some(Direction::Left)]);
        assert!(!joystick.state().is_open);
        assert_eq!(joystick.active_direction(), None);
    }

    #[test]
    fn test_dismissed_press_is_silent() {
        let (mut joystick, pulses, start) = joystick();
        joystick.handle(PointerEvent::Press {
            pointer: ID,
            at: start,
        });
        let progress = joystick.handle(PointerEvent::Release {
            pointer: ID,
            at: start + Duration::from_millis(2),
        });

        assert_eq!(progress, Progress::Dismissed);
        assert!(joystick.release_handler().0.is_empty());
        assert!(pulses.try_recv().is_err());
    }

    #[test]
    fn test_closure_handler() {
        let mut seen = Vec::new();
        let (haptics, _pulses) = HapticDispatcher::channel();
        let start = Instant::now();
        {
            let mut joystick = Joystick::new(&Config::default(), haptics, |d: Option<Direction>| {
                seen.push(d)
            });
            joystick.handle(PointerEvent::Press {
                pointer: ID,
                at: start,
            });
            joystick.handle(PointerEvent::Move {
                pointer: ID,
                translation: Vector::new(0.0, -100.0),
                at: start + Duration::from_millis(15),
            });
            joystick.handle(PointerEvent::Cancel);
        }
        assert_eq!(seen, vec![Some(Direction::Up)]);
    }

    #[test]
    fn test_animation_settles_after_release() {
        let (mut joystick, _pulses, start) = joystick();
        open(&mut joystick, start);
        drag(&mut joystick, start, 0.0, 120.0);
        joystick.handle(PointerEvent::Release {
            pointer: ID,
            at: start + Duration::from_millis(40),
        });
        assert!(joystick.is_animating());

        for _ in 0..120 {
            joystick.advance(Duration::from_millis(16));
        }

        assert!(!joystick.is_animating());
        assert!(joystick.state().displacement.length() < 0.01);
        assert_eq!(joystick.frame().knob.translation, Vector::ZERO);
    }

    #[test]
    fn test_reconfigure_keeps_live_gesture() {
        let (mut joystick, _pulses, start) = joystick();
        open(&mut joystick, start);
        drag(&mut joystick, start, 120.0, 0.0);

        joystick.reconfigure(&Config {
            menu_radius: 140.0,
            ..Default::default()
        });

        assert!(joystick.state().is_open);
        assert_eq!(joystick.active_direction(), Some(Direction::Right));
        assert!((joystick.registry().menu_radius() - 140.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_dead_zone_keeps_the_default() {
        let (haptics, _pulses) = HapticDispatcher::channel();
        let config = Config {
            dead_zone: -1.0,
            ..Default::default()
        };
        let mut joystick = Joystick::new(&config, haptics, Releases::default());
        let start = Instant::now();
        open(&mut joystick, start);

        drag(&mut joystick, start, 5.0, 0.0);
        assert_eq!(joystick.active_direction(), None);
        drag(&mut joystick, start, 60.0, 0.0);
        assert_eq!(joystick.active_direction(), Some(Direction::Right));
    }
}
