//! Where each element of the menu wants to be for a given gesture state. Pure functions; the
//! controller springs toward whatever these return.

use crate::geometry::Vector;
use crate::gesture::GestureState;
use crate::menu::{Direction, DirectionConfig, KNOB_FOLLOW, MAX_INNER_MOVE};

pub const ITEM_REST_SCALE: f64 = 0.1;
pub const ITEM_OPEN_SCALE: f64 = 1.0;
pub const ITEM_ACTIVE_SCALE: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTarget {
    pub opacity: f64,
    pub translation: Vector,
    pub scale: f64,
    /// 0 draws the item in theme colors, 1 in its accent color.
    pub emphasis: f64,
    pub shadow_opacity: f64,
    pub shadow_radius: f64,
    pub elevation: f64,
}

/// Items stay hidden at the center until the menu opens. The active one grows and takes on
/// its accent color.
pub fn item_target(open: bool, active: Option<Direction>, item: &DirectionConfig) -> ItemTarget {
    let is_active = active == Some(item.id);
    let scale = if is_active {
        ITEM_ACTIVE_SCALE
    } else if open {
        ITEM_OPEN_SCALE
    } else {
        ITEM_REST_SCALE
    };

    ItemTarget {
        opacity: if open { 1.0 } else { 0.0 },
        translation: if open { item.offset } else { Vector::ZERO },
        scale,
        emphasis: if is_active { 1.0 } else { 0.0 },
        shadow_opacity: if is_active { 0.7 } else { 0.25 },
        shadow_radius: if is_active { 28.0 } else { 8.0 },
        elevation: if is_active { 16.0 } else { 5.0 },
    }
}

/// Only the connector toward the active item is drawn.
pub fn connector_opacity(active: Option<Direction>, direction: Direction) -> f64 {
    if active == Some(direction) { 1.0 } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobTarget {
    pub translation: Vector,
    pub scale: f64,
    pub shadow_opacity: f64,
    pub shadow_radius: f64,
    pub elevation: f64,
}

/// The knob follows a fraction of the gesture and never leaves the outer ring.
pub fn knob_translation(displacement: Vector) -> Vector {
    (displacement.sanitized() * KNOB_FOLLOW).clamp_length(MAX_INNER_MOVE)
}

pub fn knob_target(state: GestureState) -> KnobTarget {
    let open = state.is_open;
    KnobTarget {
        translation: knob_translation(state.displacement),
        scale: if open { 1.15 } else { 1.0 },
        shadow_opacity: if open { 0.45 } else { 0.0 },
        shadow_radius: if open { 12.0 } else { 4.0 },
        elevation: if open { 12.0 } else { 3.0 },
    }
}

pub fn ring_shadow_opacity(open: bool) -> f64 {
    if open { 0.18 } else { 0.0 }
}
