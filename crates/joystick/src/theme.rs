use crate::config::{ConfigError, ThemeConfig};
use palette::{Srgb, Srgba};
use std::str::FromStr;

/// Named colors the menu draws with. Read-only: passed by reference, never mutated by the
/// animation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Srgba<f64>,
    pub border: Srgba<f64>,
    pub text: Srgba<f64>,
    pub text_secondary: Srgba<f64>,
    pub selected_background: Srgba<f64>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Srgba::new(0.16, 0.17, 0.19, 1.0),
            border: Srgba::new(0.24, 0.25, 0.28, 1.0),
            text: Srgba::new(0.93, 0.93, 0.93, 1.0),
            text_secondary: Srgba::new(0.61, 0.63, 0.65, 1.0),
            selected_background: Srgba::new(0.18, 0.19, 0.21, 1.0),
        }
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let fallback = Self::default();
        Self {
            background: Self::lookup_color(
                "background",
                config.background.as_deref(),
                fallback.background,
            ),
            border: Self::lookup_color("border", config.border.as_deref(), fallback.border),
            text: Self::lookup_color("text", config.text.as_deref(), fallback.text),
            text_secondary: Self::lookup_color(
                "text_secondary",
                config.text_secondary.as_deref(),
                fallback.text_secondary,
            ),
            selected_background: Self::lookup_color(
                "selected_background",
                config.selected_background.as_deref(),
                fallback.selected_background,
            ),
        }
    }

    fn lookup_color(name: &str, value: Option<&str>, fallback: Srgba<f64>) -> Srgba<f64> {
        value
            .map(|v| {
                parse_color(v).unwrap_or_else(|e| {
                    log::error!("Invalid theme color '{}': {}", name, e);
                    fallback
                })
            })
            .unwrap_or(fallback)
    }
}

/// Parses `#rrggbb`, `rrggbb` or `#rgb` into an opaque color.
pub fn parse_color(s: &str) -> Result<Srgba<f64>, ConfigError> {
    let rgb = Srgb::<u8>::from_str(s.trim())
        .map_err(|e| ConfigError::InvalidColor(s.to_string(), e.to_string()))?;
    let c: Srgb<f64> = rgb.into_format();
    Ok(Srgba::new(c.red, c.green, c.blue, 1.0))
}

/// Linear blend in sRGB space, `t` clamped to `[0, 1]`.
pub fn blend(from: Srgba<f64>, to: Srgba<f64>, t: f64) -> Srgba<f64> {
    let t = t.clamp(0.0, 1.0);
    let (r0, g0, b0, a0) = from.into_components();
    let (r1, g1, b1, a1) = to.into_components();
    let mix = |a: f64, b: f64| a * (1.0 - t) + b * t;
    Srgba::new(mix(r0, r1), mix(g0, g1), mix(b0, b1), mix(a0, a1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        let c = parse_color("#F7B731").unwrap();
        assert!((c.red - 0xF7 as f64 / 255.0).abs() < 1e-9);
        assert!((c.green - 0xB7 as f64 / 255.0).abs() < 1e-9);
        assert!((c.alpha - 1.0).abs() < f64::EPSILON);
        assert!(parse_color("00c9a7").is_ok());
        assert!(parse_color("#zzz").is_err());
    }

    #[test]
    fn test_blend_endpoints() {
        let a = Srgba::new(0.0, 0.0, 0.0, 1.0);
        let b = Srgba::new(1.0, 0.5, 0.25, 1.0);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 7.0), b);
        let mid = blend(a, b, 0.5);
        assert!((mid.green - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_theme_entry_falls_back() {
        let config = ThemeConfig {
            background: Some("#000000".to_string()),
            text: Some("nope".to_string()),
            ..Default::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.background, Srgba::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(theme.text, Theme::default().text);
    }
}
