use super::Intensity;
use crate::menu::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub direction: Direction,
    pub intensity: Intensity,
}

/// Edge detector over the active direction. Pulses when a direction becomes active; entering
/// the dead zone and holding steady in one sector stay silent.
#[derive(Debug, Default)]
pub struct HapticNotifier {
    previous: Option<Direction>,
    intensity: Intensity,
}

impl HapticNotifier {
    pub fn new(intensity: Intensity) -> Self {
        Self {
            previous: None,
            intensity,
        }
    }

    pub fn observe(&mut self, current: Option<Direction>) -> Option<Pulse> {
        let previous = std::mem::replace(&mut self.previous, current);
        let direction = current.filter(|&c| Some(c) != previous)?;
        log::debug!("Direction {:?} -> {}", previous, direction);
        Some(Pulse {
            direction,
            intensity: self.intensity,
        })
    }
}
