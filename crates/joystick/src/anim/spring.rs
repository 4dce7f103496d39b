//! Damped harmonic oscillator used for every animated channel of the menu.
//!
//! The force model is `m·a = -k·(x - target) - c·v`, integrated with semi-implicit Euler in
//! steps of at most 4 ms so large frame gaps stay stable at high stiffness.
//!
//! A spring with `c >= 2·√(k·m)` is critically damped or overdamped: it approaches its target
//! monotonically from a resting start and never oscillates. Both presets below sit at that
//! bound.

use std::time::Duration;

const MAX_STEP_SECS: f64 = 0.004;
const REST_POSITION: f64 = 0.001;
const REST_VELOCITY: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// `c / (2·√(k·m))`; 1.0 is critical.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Style channels: opacity, scale, emphasis, item translation, shadows.
pub const STYLE_SPRING: SpringConfig = SpringConfig::new(500.0, 31.63, 0.5);

/// Knob and displacement easing back to the rest position after release.
pub const RETURN_SPRING: SpringConfig = SpringConfig::new(300.0, 24.5, 0.5);

#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
    at_rest: bool,
}

impl Spring {
    pub fn new(initial: f64, target: f64, config: SpringConfig) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            config,
            at_rest: initial == target,
        }
    }

    /// A spring already resting at `value`.
    pub fn settled(value: f64, config: SpringConfig) -> Self {
        Self::new(value, value, config)
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Wakes the spring when the target actually moves; velocity carries over.
    pub fn set_target(&mut self, target: f64) {
        if self.target != target {
            self.target = target;
            self.at_rest = false;
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            self.step(h);
            remaining -= h;
        }

        if (self.position - self.target).abs() < REST_POSITION
            && self.velocity.abs() < REST_VELOCITY
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }

    fn step(&mut self, h: f64) {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        let force = -stiffness * (self.position - self.target) - damping * self.velocity;
        self.velocity += force / mass * h;
        self.position += self.velocity * h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn trace(spring: &mut Spring, frames: usize) -> Vec<f64> {
        (0..frames)
            .map(|_| {
                spring.advance(FRAME);
                spring.position()
            })
            .collect()
    }

    #[test]
    fn test_presets_are_not_underdamped() {
        assert!(STYLE_SPRING.damping_ratio() >= 1.0);
        assert!(RETURN_SPRING.damping_ratio() >= 1.0);
    }

    #[test]
    fn test_step_converges_monotonically() {
        for (from, to) in [(0.0, 1.0), (1.0, 0.0), (0.1, 1.5), (1.0, 0.25)] {
            let mut spring = Spring::new(from, to, STYLE_SPRING);
            let positions = trace(&mut spring, 60);
            let mut prev = from;
            for p in positions {
                assert!((p - prev) * (to - from) >= 0.0, "{from}->{to}: moved backwards");
                assert!((p - to) * (from - to) >= 0.0, "{from}->{to}: overshot to {p}");
                prev = p;
            }
        }
    }

    #[test]
    fn test_style_spring_settles_within_a_few_hundred_ms() {
        let mut spring = Spring::new(0.0, 1.0, STYLE_SPRING);
        trace(&mut spring, 25); // 400 ms
        assert!(spring.is_at_rest(), "position {}", spring.position());
        assert_eq!(spring.position(), 1.0);
    }

    #[test]
    fn test_return_spring_brings_displacement_home() {
        let mut spring = Spring::new(150.0, 0.0, RETURN_SPRING);
        trace(&mut spring, 60);
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 0.0);
    }

    #[test]
    fn test_settled_spring_ignores_time() {
        let mut spring = Spring::settled(0.5, STYLE_SPRING);
        assert!(spring.is_at_rest());
        spring.advance(Duration::from_secs(3));
        assert_eq!(spring.position(), 0.5);
    }

    #[test]
    fn test_retarget_wakes_and_keeps_velocity() {
        let mut spring = Spring::new(0.0, 1.0, STYLE_SPRING);
        spring.advance(FRAME);
        let v = spring.velocity();
        assert!(v > 0.0);

        spring.set_target(0.0);
        assert!(!spring.is_at_rest());
        assert_eq!(spring.velocity(), v);

        spring.set_target(0.0);
        trace(&mut spring, 60);
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 0.0);
    }

    #[test]
    fn test_large_gap_is_subdivided() {
        let mut spring = Spring::new(0.0, 1.0, STYLE_SPRING);
        spring.advance(Duration::from_secs(2));
        assert!(spring.is_at_rest());
    }
}
