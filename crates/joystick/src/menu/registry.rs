use super::{Direction, MENU_RADIUS};
use crate::config::Config;
use crate::geometry::Vector;
use crate::theme;
use palette::Srgba;

/// Placement and presentation of one menu item. Immutable once the registry is built.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionConfig {
    pub id: Direction,
    pub label: String,
    pub glyph: String,
    pub color: Srgba<f64>,
    pub offset: Vector,
    pub angle: f64,
}

impl DirectionConfig {
    fn default_for(id: Direction, menu_radius: f64) -> Self {
        let (label, glyph, color) = match id {
            Direction::Up => ("Write", "✏️", accent(0x00, 0xC9, 0xA7)),
            Direction::Left => ("Speak", "🎙️", accent(0x9B, 0x5D, 0xE5)),
            Direction::Right => ("Picture", "📸", accent(0xF7, 0xB7, 0x31)),
            Direction::Down => ("Settings", "⚙️", accent(0xF1, 0x5B, 0xB5)),
        };

        Self {
            id,
            label: label.to_string(),
            glyph: glyph.to_string(),
            color,
            offset: id.unit() * menu_radius,
            angle: id.angle(),
        }
    }
}

fn accent(r: u8, g: u8, b: u8) -> Srgba<f64> {
    Srgba::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0, 1.0)
}

/// Catalog of the four menu items, indexed by [`Direction::as_index`].
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    entries: [DirectionConfig; 4],
    menu_radius: f64,
}

impl Registry {
    pub fn new(menu_radius: f64) -> Self {
        Self {
            entries: Direction::ALL.map(|dir| DirectionConfig::default_for(dir, menu_radius)),
            menu_radius,
        }
    }

    /// Applies label, glyph and color overrides. Offsets and angles always derive from the
    /// direction, so two items can never share a ray.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new(config.menu_radius());

        for entry in registry.entries.iter_mut() {
            let Some(item) = config.items.get(&entry.id) else {
                continue;
            };
            if let Some(label) = &item.label {
                entry.label = label.clone();
            }
            if let Some(glyph) = &item.glyph {
                entry.glyph = glyph.clone();
            }
            if let Some(color) = &item.color {
                match theme::parse_color(color) {
                    Ok(c) => entry.color = c,
                    Err(e) => log::error!("Ignoring color for '{}': {}", entry.id, e),
                }
            }
        }

        registry
    }

    pub fn get(&self, direction: Direction) -> &DirectionConfig {
        &self.entries[direction.as_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DirectionConfig> {
        self.entries.iter()
    }

    pub fn menu_radius(&self) -> f64 {
        self.menu_radius
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(MENU_RADIUS)
    }
}
