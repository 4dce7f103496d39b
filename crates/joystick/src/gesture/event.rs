use crate::geometry::Vector;
use derive_more::{Display, From, Into};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, From, Into)]
pub struct PointerId(u32);

impl PointerId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Raw input. `translation` is cumulative since the press began, not a per-frame delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press {
        pointer: PointerId,
        at: Instant,
    },
    Move {
        pointer: PointerId,
        translation: Vector,
        at: Instant,
    },
    Release {
        pointer: PointerId,
        at: Instant,
    },
    /// The input surface lost the gesture (focus change, pointer grab, ...).
    Cancel,
}
