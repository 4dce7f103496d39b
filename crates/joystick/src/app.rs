use crate::anim::SharedFrame;
use crate::config;
use crate::events::AppEvent;
use crate::gesture::{PointerEvent, Progress};
use crate::joystick::Joystick;
use crate::sys::actions::ActionDispatcher;
use std::time::{Duration, Instant};

/// Longest step handed to the springs; a stalled ticker should not fling them.
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Interaction-context state of the daemon. Owns the joystick and applies events strictly in
/// arrival order.
pub struct AppModel {
    pub joystick: Joystick<ActionDispatcher>,
    pub visible: bool,
    last_tick: Option<Instant>,
    frame: SharedFrame,
}

impl AppModel {
    pub fn new(joystick: Joystick<ActionDispatcher>, frame: SharedFrame) -> Self {
        frame.publish(joystick.frame());
        Self {
            joystick,
            visible: false,
            last_tick: None,
            frame,
        }
    }

    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Show => {
                self.visible = true;
                log::debug!("Menu shown");
            }
            AppEvent::Hide => {
                self.visible = false;
                log::debug!("Menu hidden");
            }
            AppEvent::Pointer(event) => {
                // A hidden menu starts no new gesture but lets one in flight finish.
                if !self.visible && matches!(event, PointerEvent::Press { .. }) {
                    return;
                }
                let progress = self.joystick.handle(event);
                if !matches!(progress, Progress::Ignored | Progress::Pending) {
                    self.frame.publish(self.joystick.frame());
                }
            }
            AppEvent::Tick(now) => {
                let dt = self
                    .last_tick
                    .replace(now)
                    .map_or(Duration::ZERO, |last| {
                        now.saturating_duration_since(last).min(MAX_FRAME_STEP)
                    });

                self.joystick.poll(now);
                if self.joystick.is_animating() {
                    self.joystick.advance(dt);
                    self.frame.publish(self.joystick.frame());
                }
            }
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.joystick.reconfigure(&new_config);
                    self.joystick
                        .release_handler_mut()
                        .set_actions(new_config.actions);
                    self.frame.publish(self.joystick.frame());
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
