use crate::config::{HapticsConfig, ShellCommand};
use crate::sys::shell;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::sync::Arc;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    #[default]
    Light,
    Medium,
    Heavy,
}

#[derive(Error, Debug)]
pub enum HapticError {
    #[error("No haptic device available")]
    Unavailable,
    #[error("Failed to run haptic command: {0}")]
    Io(#[from] std::io::Error),
}

/// A device that can produce a short vibration. Called only from the effect context; may be
/// slow and may fail.
pub trait HapticBackend: Send + Sync {
    fn pulse(&self, intensity: Intensity) -> Result<(), HapticError>;
}

/// Stands in when there is no device at all.
#[derive(Debug, Default)]
pub struct NullHaptics;

impl HapticBackend for NullHaptics {
    fn pulse(&self, _intensity: Intensity) -> Result<(), HapticError> {
        Err(HapticError::Unavailable)
    }
}

#[derive(Debug, Default)]
pub struct LogHaptics;

impl HapticBackend for LogHaptics {
    fn pulse(&self, intensity: Intensity) -> Result<(), HapticError> {
        log::info!("Haptic pulse ({})", intensity);
        Ok(())
    }
}

/// Spawns a user command per pulse, with `{intensity}` expanded. The child is reaped on the
/// effect runtime.
#[derive(Debug)]
pub struct CommandHaptics {
    command: ShellCommand,
}

impl CommandHaptics {
    pub fn new(command: ShellCommand) -> Self {
        Self { command }
    }

    pub fn expand(&self, intensity: Intensity) -> String {
        self.command.replace("{intensity}", &intensity.to_string())
    }
}

impl HapticBackend for CommandHaptics {
    fn pulse(&self, intensity: Intensity) -> Result<(), HapticError> {
        shell::spawn(&self.expand(intensity))?;
        Ok(())
    }
}

pub fn from_config(config: &HapticsConfig) -> Arc<dyn HapticBackend> {
    match (config.enabled, &config.command) {
        (false, _) => Arc::new(NullHaptics),
        (true, Some(command)) => Arc::new(CommandHaptics::new(command.clone())),
        (true, None) => Arc::new(LogHaptics),
    }
}
