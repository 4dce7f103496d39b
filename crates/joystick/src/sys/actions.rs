use crate::config::ShellCommand;
use crate::joystick::ReleaseHandler;
use crate::menu::Direction;
use crate::sys::shell;
use async_channel::{Receiver, Sender};
use std::collections::HashMap;

/// Release hook of the daemon: looks up the command bound to the released direction and
/// queues it for the effect context.
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    actions: HashMap<Direction, ShellCommand>,
    tx: Sender<ShellCommand>,
}

impl ActionDispatcher {
    pub fn new(actions: HashMap<Direction, ShellCommand>, tx: Sender<ShellCommand>) -> Self {
        Self { actions, tx }
    }

    pub fn set_actions(&mut self, actions: HashMap<Direction, ShellCommand>) {
        self.actions = actions;
    }
}

impl ReleaseHandler for ActionDispatcher {
    fn on_release(&mut self, direction: Option<Direction>) {
        let Some(direction) = direction else {
            return;
        };
        match self.actions.get(&direction) {
            Some(command) => {
                if self.tx.try_send(command.clone()).is_err() {
                    log::error!("Action runner is gone, '{}' not started", command);
                }
            }
            None => log::info!("No action bound to {}", direction),
        }
    }
}

pub async fn run_action_worker(rx: Receiver<ShellCommand>) {
    while let Ok(command) = rx.recv().await {
        if let Err(e) = shell::spawn(&command) {
            log::error!("Failed to run '{}': {}", command, e);
        }
    }
}
