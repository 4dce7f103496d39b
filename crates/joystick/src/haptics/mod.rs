pub mod backend;
pub mod notifier;
pub mod worker;

pub use backend::{CommandHaptics, HapticBackend, HapticError, Intensity, LogHaptics, NullHaptics};
pub use notifier::{HapticNotifier, Pulse};
pub use worker::{HapticDispatcher, run_haptic_worker};
