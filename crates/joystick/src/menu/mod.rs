pub mod classify;
pub mod direction;
pub mod registry;

pub use classify::{classify, classify_with};
pub use direction::Direction;
pub use registry::{DirectionConfig, Registry};

pub const OUTER_SIZE: f64 = 88.0; // outer ring diameter
pub const INNER_SIZE: f64 = 46.0; // knob diameter
pub const ITEM_SIZE: f64 = 58.0;
pub const MENU_RADIUS: f64 = 100.0; // item orbital radius
pub const DEAD_ZONE: f64 = 40.0; // below this no direction is active
pub const KNOB_FOLLOW: f64 = 0.3;
pub const MAX_INNER_MOVE: f64 = OUTER_SIZE / 2.0 - INNER_SIZE / 2.0 - 4.0;
