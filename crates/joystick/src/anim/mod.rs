pub mod controller;
pub mod frame;
pub mod spring;
pub mod targets;

pub use controller::AnimationController;
pub use frame::{Frame, SharedFrame};
pub use spring::{Spring, SpringConfig};
