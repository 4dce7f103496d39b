pub mod actions;
pub mod runtime;
pub mod server;
pub mod shell;
