pub mod anim;
pub mod app;
pub mod config;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod haptics;
pub mod joystick;
pub mod macros;
pub mod menu;
pub mod protocol;
pub mod sys;
pub mod theme;

pub use geometry::Vector;
pub use joystick::{Joystick, ReleaseHandler};
pub use menu::Direction;
