use anyhow::Context;
use joystick::Joystick;
use joystick::anim::SharedFrame;
use joystick::app::AppModel;
use joystick::config;
use joystick::haptics::{self, HapticDispatcher};
use joystick::protocol::SOCKET_PATH;
use joystick::sys::actions::ActionDispatcher;
use joystick::sys::runtime::{self, Services};
use joystick::sys::server::Inspect;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup();

    let (tx, rx) = async_channel::unbounded();
    let (dispatcher, pulses) = HapticDispatcher::channel();
    let (action_tx, action_rx) = async_channel::unbounded();

    let actions = ActionDispatcher::new(config.actions.clone(), action_tx);
    let joystick = Joystick::new(&config, dispatcher, actions);
    let frame = SharedFrame::default();

    // Start Background Services
    runtime::start_background_services(Services {
        events: tx,
        pulses,
        haptics: haptics::backend::from_config(&config.haptics),
        actions: action_rx,
        inspect: Inspect {
            gesture: joystick.shared(),
            frame: frame.clone(),
        },
    })
    .context("Failed to start background services")?;

    log::info!("Joystick listening on {}", SOCKET_PATH);

    let mut app = AppModel::new(joystick, frame);
    while let Ok(event) = rx.recv_blocking() {
        app.update(event);
    }

    Ok(())
}
