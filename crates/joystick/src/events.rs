use crate::gesture::PointerEvent;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Pointer(PointerEvent),
    /// Frame clock for animations and press activation.
    Tick(Instant),
    ConfigReload,
}
