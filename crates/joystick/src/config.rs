use crate::events::AppEvent;
use crate::haptics::Intensity;
use crate::menu::{DEAD_ZONE, Direction, MENU_RADIUS};
use async_channel::Sender;
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// A command line handed to `sh -c`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ShellCommand(String);

crate::impl_string_newtype!(ShellCommand);

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ItemConfig {
    pub label: Option<String>,
    pub glyph: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: Option<String>,
    pub border: Option<String>,
    pub text: Option<String>,
    pub text_secondary: Option<String>,
    pub selected_background: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HapticsConfig {
    pub enabled: bool,
    /// Run once per pulse; `{intensity}` is replaced by `light`, `medium` or `heavy`.
    pub command: Option<ShellCommand>,
    pub intensity: Intensity,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
            intensity: Intensity::Light,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// How long a press must be held before the menu opens.
    pub activation_ms: u64,
    pub dead_zone: f64,
    pub menu_radius: f64,
    pub haptics: HapticsConfig,
    pub actions: HashMap<Direction, ShellCommand>,
    pub items: HashMap<Direction, ItemConfig>,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            activation_ms: 10,
            dead_zone: DEAD_ZONE,
            menu_radius: MENU_RADIUS,
            haptics: HapticsConfig::default(),
            actions: HashMap::new(),
            items: HashMap::new(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    pub fn activation(&self) -> Duration {
        Duration::from_millis(self.activation_ms)
    }

    pub fn action(&self, direction: Direction) -> Option<&ShellCommand> {
        self.actions.get(&direction)
    }

    /// The dead zone radius, or the default when the configured one is negative or not finite.
    pub fn dead_zone(&self) -> f64 {
        length_or(self.dead_zone, DEAD_ZONE)
    }

    /// The item distance from the center, or the default when the configured one is negative or
    /// not finite.
    pub fn menu_radius(&self) -> f64 {
        length_or(self.menu_radius, MENU_RADIUS)
    }

    /// Replaces unusable lengths with their defaults, logging each one.
    pub fn validated(mut self) -> Self {
        if self.dead_zone() != self.dead_zone {
            log::error!(
                "Invalid dead_zone {}, using {}",
                self.dead_zone,
                DEAD_ZONE
            );
            self.dead_zone = DEAD_ZONE;
        }
        if self.menu_radius() != self.menu_radius {
            log::error!(
                "Invalid menu_radius {}, using {}",
                self.menu_radius,
                MENU_RADIUS
            );
            self.menu_radius = MENU_RADIUS;
        }
        self
    }
}

fn length_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid color '{0}': {1}")]
    InvalidColor(String, String),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "joystick").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("JOYSTICK"))
        .build()?;

    Ok(s.try_deserialize::<Config>()?.validated())
}

pub fn load_or_setup() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                if touches_config(&event, &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

/// Whether a watcher event in the config directory changed the config file itself.
fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    relevant && event.paths.iter().any(|p| p == config_path)
}
