pub mod event;
pub mod tracker;

pub use event::{PointerEvent, PointerId};
pub use tracker::{
    GestureSnapshot, GestureState, GestureTracker, LONG_PRESS, Progress, SharedGestureState,
};
