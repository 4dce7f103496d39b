use crate::config::ShellCommand;
use crate::events::AppEvent;
use crate::haptics::{HapticBackend, Pulse};
use crate::sys::server::Inspect;
use async_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::time::MissedTickBehavior;

pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Everything the effect context runs on behalf of the interaction loop.
pub struct Services {
    pub events: Sender<AppEvent>,
    pub pulses: Receiver<Pulse>,
    pub haptics: Arc<dyn HapticBackend>,
    pub actions: Receiver<ShellCommand>,
    pub inspect: Inspect,
}

pub fn start_background_services(services: Services) -> std::io::Result<thread::JoinHandle<()>> {
    let rt = Runtime::new()?;

    thread::Builder::new()
        .name("joystick-effects".to_string())
        .spawn(move || {
            rt.block_on(async move {
                let Services {
                    events,
                    pulses,
                    haptics,
                    actions,
                    inspect,
                } = services;

                {
                    let tx = events.clone();
                    tokio::spawn(async move {
                        crate::sys::server::run_server(tx, inspect).await;
                    });
                }

                {
                    let tx = events.clone();
                    tokio::spawn(async move {
                        crate::config::run_async_watcher(tx).await;
                    });
                }

                tokio::spawn(run_ticker(events));
                tokio::spawn(crate::haptics::run_haptic_worker(pulses, haptics));
                tokio::spawn(crate::sys::actions::run_action_worker(actions));

                std::future::pending::<()>().await;
            });
        })
}

/// Frame clock of the interaction loop. Late ticks are skipped, not bunched.
pub async fn run_ticker(tx: Sender<AppEvent>) {
    let mut interval = tokio::time::interval(FRAME_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if tx.send(AppEvent::Tick(Instant::now())).await.is_err() {
            break;
        }
    }
}
