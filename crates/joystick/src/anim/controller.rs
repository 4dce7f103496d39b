use super::frame::{ConnectorVisual, Frame, ItemVisual, KnobVisual, RingVisual};
use super::spring::{STYLE_SPRING, Spring};
use super::targets::{self, ItemTarget, KnobTarget};
use crate::geometry::Vector;
use crate::gesture::GestureState;
use crate::menu::{Direction, Registry};
use crate::theme::{Theme, blend};
use palette::Srgba;
use std::time::Duration;

const KNOB_ALPHA: f64 = 0.7;
const SHADOW_OFFSET_FACTOR: f64 = 0.4;

#[derive(Debug, Clone)]
struct ItemSprings {
    opacity: Spring,
    x: Spring,
    y: Spring,
    scale: Spring,
    emphasis: Spring,
    shadow_opacity: Spring,
    shadow_radius: Spring,
    elevation: Spring,
}

impl ItemSprings {
    fn settled(target: &ItemTarget) -> Self {
        let s = |v| Spring::settled(v, STYLE_SPRING);
        Self {
            opacity: s(target.opacity),
            x: s(target.translation.x),
            y: s(target.translation.y),
            scale: s(target.scale),
            emphasis: s(target.emphasis),
            shadow_opacity: s(target.shadow_opacity),
            shadow_radius: s(target.shadow_radius),
            elevation: s(target.elevation),
        }
    }

    fn retarget(&mut self, target: &ItemTarget) {
        self.opacity.set_target(target.opacity);
        self.x.set_target(target.translation.x);
        self.y.set_target(target.translation.y);
        self.scale.set_target(target.scale);
        self.emphasis.set_target(target.emphasis);
        self.shadow_opacity.set_target(target.shadow_opacity);
        self.shadow_radius.set_target(target.shadow_radius);
        self.elevation.set_target(target.elevation);
    }

    fn springs_mut(&mut self) -> [&mut Spring; 8] {
        [
            &mut self.opacity,
            &mut self.x,
            &mut self.y,
            &mut self.scale,
            &mut self.emphasis,
            &mut self.shadow_opacity,
            &mut self.shadow_radius,
            &mut self.elevation,
        ]
    }

    fn is_at_rest(&self) -> bool {
        [
            &self.opacity,
            &self.x,
            &self.y,
            &self.scale,
            &self.emphasis,
            &self.shadow_opacity,
            &self.shadow_radius,
            &self.elevation,
        ]
        .iter()
        .all(|s| s.is_at_rest())
    }

    fn visual(&self, direction: Direction, accent: Srgba<f64>, theme: &Theme) -> ItemVisual {
        let emphasis = self.emphasis.position();
        ItemVisual {
            direction,
            opacity: self.opacity.position().clamp(0.0, 1.0),
            translation: Vector::new(self.x.position(), self.y.position()),
            scale: self.scale.position(),
            background: blend(theme.background, accent, emphasis),
            border: blend(theme.selected_background, accent, emphasis),
            glow: blend(Srgba::new(0.0, 0.0, 0.0, 1.0), accent, emphasis),
            label: blend(theme.text_secondary, accent, emphasis),
            shadow_opacity: self.shadow_opacity.position(),
            shadow_radius: self.shadow_radius.position(),
            elevation: self.elevation.position(),
        }
    }
}

#[derive(Debug, Clone)]
struct KnobSprings {
    scale: Spring,
    shadow_opacity: Spring,
    shadow_radius: Spring,
    elevation: Spring,
}

impl KnobSprings {
    fn settled(target: &KnobTarget) -> Self {
        let s = |v| Spring::settled(v, STYLE_SPRING);
        Self {
            scale: s(target.scale),
            shadow_opacity: s(target.shadow_opacity),
            shadow_radius: s(target.shadow_radius),
            elevation: s(target.elevation),
        }
    }

    fn retarget(&mut self, target: &KnobTarget) {
        self.scale.set_target(target.scale);
        self.shadow_opacity.set_target(target.shadow_opacity);
        self.shadow_radius.set_target(target.shadow_radius);
        self.elevation.set_target(target.elevation);
    }

    fn springs_mut(&mut self) -> [&mut Spring; 4] {
        [
            &mut self.scale,
            &mut self.shadow_opacity,
            &mut self.shadow_radius,
            &mut self.elevation,
        ]
    }

    fn is_at_rest(&self) -> bool {
        self.scale.is_at_rest()
            && self.shadow_opacity.is_at_rest()
            && self.shadow_radius.is_at_rest()
            && self.elevation.is_at_rest()
    }
}

/// Drives every visual element of the menu toward the targets implied by the latest gesture
/// state. Reads gesture state, never writes it.
#[derive(Debug, Clone)]
pub struct AnimationController {
    items: [ItemSprings; 4],
    connectors: [Spring; 4],
    knob: KnobSprings,
    /// Already a damped function of the tracked displacement, so it is not sprung again.
    knob_translation: Vector,
    ring_shadow: Spring,
}

impl AnimationController {
    /// A controller resting in the closed state.
    pub fn new(registry: &Registry) -> Self {
        let closed = GestureState::default();
        Self {
            items: Direction::ALL.map(|dir| {
                ItemSprings::settled(&targets::item_target(false, None, registry.get(dir)))
            }),
            connectors: Direction::ALL.map(|_| Spring::settled(0.0, STYLE_SPRING)),
            knob: KnobSprings::settled(&targets::knob_target(closed)),
            knob_translation: Vector::ZERO,
            ring_shadow: Spring::settled(targets::ring_shadow_opacity(false), STYLE_SPRING),
        }
    }

    pub fn retarget(
        &mut self,
        state: GestureState,
        active: Option<Direction>,
        registry: &Registry,
    ) {
        for (item, springs) in registry.iter().zip(self.items.iter_mut()) {
            springs.retarget(&targets::item_target(state.is_open, active, item));
        }
        for (dir, line) in Direction::ALL.into_iter().zip(self.connectors.iter_mut()) {
            line.set_target(targets::connector_opacity(active, dir));
        }

        let knob = targets::knob_target(state);
        self.knob.retarget(&knob);
        self.knob_translation = knob.translation;
        self.ring_shadow.set_target(targets::ring_shadow_opacity(state.is_open));
    }

    pub fn advance(&mut self, dt: Duration) {
        let items = self.items.iter_mut().flat_map(|i| i.springs_mut());
        let rest = self
            .connectors
            .iter_mut()
            .chain(self.knob.springs_mut())
            .chain(std::iter::once(&mut self.ring_shadow));
        for spring in items.chain(rest) {
            spring.advance(dt);
        }
    }

    pub fn is_settled(&self) -> bool {
        self.items.iter().all(ItemSprings::is_at_rest)
            && self.connectors.iter().all(Spring::is_at_rest)
            && self.knob.is_at_rest()
            && self.ring_shadow.is_at_rest()
    }

    pub fn frame(&self, registry: &Registry, theme: &Theme) -> Frame {
        let items = Direction::ALL.map(|dir| {
            self.items[dir.as_index()].visual(dir, registry.get(dir).color, theme)
        });
        let connectors = Direction::ALL.map(|dir| {
            let config = registry.get(dir);
            ConnectorVisual {
                direction: dir,
                opacity: self.connectors[dir.as_index()].position().clamp(0.0, 1.0),
                color: config.color,
                length: registry.menu_radius(),
                angle: config.angle,
            }
        });

        let (r, g, b, _) = theme.text.into_components();
        let knob = KnobVisual {
            translation: self.knob_translation,
            scale: self.knob.scale.position(),
            color: Srgba::new(r, g, b, KNOB_ALPHA),
            shadow_offset: self.knob_translation * SHADOW_OFFSET_FACTOR,
            shadow_opacity: self.knob.shadow_opacity.position(),
            shadow_radius: self.knob.shadow_radius.position(),
            elevation: self.knob.elevation.position(),
        };
        let ring = RingVisual {
            background: theme.background,
            border: theme.selected_background,
            shadow_color: theme.text,
            shadow_opacity: self.ring_shadow.position(),
        };

        Frame {
            items,
            connectors,
            knob,
            ring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::targets::{ITEM_ACTIVE_SCALE, ITEM_OPEN_SCALE, ITEM_REST_SCALE};

    const FRAME: Duration = Duration::from_millis(16);

    fn open_at(x: f64, y: f64) -> GestureState {
        GestureState {
            is_open: true,
            displacement: Vector::new(x, y),
        }
    }

    fn run(controller: &mut AnimationController, frames: usize) {
        for _ in 0..frames {
            controller.advance(FRAME);
        }
    }

    #[test]
    fn test_starts_settled_and_hidden() {
        let registry = Registry::default();
        let controller = AnimationController::new(&registry);
        assert!(controller.is_settled());

        let frame = controller.frame(&registry, &Theme::default());
        for item in &frame.items {
            assert_eq!(item.opacity, 0.0);
            assert_eq!(item.scale, ITEM_REST_SCALE);
        }
        assert!(frame.connectors.iter().all(|c| c.opacity == 0.0));
    }

    #[test]
    fn test_opening_animates_without_a_cut() {
        let registry = Registry::default();
        let mut controller = AnimationController::new(&registry);
        controller.retarget(open_at(0.0, 0.0), None, &registry);
        assert!(!controller.is_settled());

        controller.advance(FRAME);
        let up = controller.frame(&registry, &Theme::default()).item(Direction::Up).clone();
        assert!(up.opacity > 0.0 && up.opacity < 1.0);
        assert!(up.translation.y < 0.0 && up.translation.y > -100.0);

        run(&mut controller, 50);
        assert!(controller.is_settled());
        let frame = controller.frame(&registry, &Theme::default());
        for dir in Direction::ALL {
            let item = frame.item(dir);
            assert_eq!(item.opacity, 1.0);
            assert_eq!(item.scale, ITEM_OPEN_SCALE);
            assert_eq!(item.translation, registry.get(dir).offset);
        }
    }

    #[test]
    fn test_active_item_takes_accent_and_connector() {
        let registry = Registry::default();
        let theme = Theme::default();
        let mut controller = AnimationController::new(&registry);
        controller.retarget(open_at(120.0, 0.0), Some(Direction::Right), &registry);
        run(&mut controller, 50);

        let frame = controller.frame(&registry, &theme);
        let right = frame.item(Direction::Right);
        let accent = registry.get(Direction::Right).color;
        assert_eq!(right.scale, ITEM_ACTIVE_SCALE);
        assert_eq!(right.background, accent);
        assert_eq!(right.border, accent);
        assert_eq!(right.glow, accent);
        assert_eq!(frame.connector(Direction::Right).opacity, 1.0);

        let left = frame.item(Direction::Left);
        assert_eq!(left.background, theme.background);
        assert_eq!(left.border, theme.selected_background);
        assert_eq!(frame.connector(Direction::Left).opacity, 0.0);
    }

    #[test]
    fn test_emphasis_moves_monotonically_on_switch() {
        let registry = Registry::default();
        let theme = Theme::default();
        let mut controller = AnimationController::new(&registry);
        controller.retarget(open_at(120.0, 0.0), Some(Direction::Right), &registry);
        run(&mut controller, 50);

        controller.retarget(open_at(0.0, 120.0), Some(Direction::Down), &registry);
        let mut prev_right = 1.0;
        let mut prev_down = 0.0;
        for _ in 0..50 {
            controller.advance(FRAME);
            let frame = controller.frame(&registry, &theme);
            let right = frame.connector(Direction::Right).opacity;
            let down = frame.connector(Direction::Down).opacity;
            assert!(right <= prev_right && (0.0..=1.0).contains(&right));
            assert!(down >= prev_down && (0.0..=1.0).contains(&down));
            prev_right = right;
            prev_down = down;
        }
        assert_eq!(prev_right, 0.0);
        assert_eq!(prev_down, 1.0);
    }

    #[test]
    fn test_knob_is_clamped_and_tinted() {
        let registry = Registry::default();
        let theme = Theme::default();
        let mut controller = AnimationController::new(&registry);
        controller.retarget(open_at(400.0, -10.0), Some(Direction::Right), &registry);

        let knob = controller.frame(&registry, &theme).knob;
        let expected = targets::knob_translation(Vector::new(400.0, -10.0));
        assert_eq!(knob.translation, expected);
        assert!((knob.translation.length() - 17.0).abs() < 1e-9);
        assert_eq!(knob.shadow_offset, expected * 0.4);
        assert!((knob.color.alpha - KNOB_ALPHA).abs() < f64::EPSILON);

        run(&mut controller, 50);
        let knob = controller.frame(&registry, &theme).knob;
        assert_eq!(knob.scale, 1.15);
    }

    #[test]
    fn test_closing_returns_to_rest() {
        let registry = Registry::default();
        let mut controller = AnimationController::new(&registry);
        controller.retarget(open_at(0.0, -120.0), Some(Direction::Up), &registry);
        run(&mut controller, 50);
        controller.retarget(GestureState::default(), None, &registry);
        run(&mut controller, 50);

        assert!(controller.is_settled());
        let frame = controller.frame(&registry, &Theme::default());
        assert_eq!(frame.item(Direction::Up).opacity, 0.0);
        assert_eq!(frame.item(Direction::Up).scale, ITEM_REST_SCALE);
        assert_eq!(frame.ring.shadow_opacity, 0.0);
    }

    #[test]
    fn test_ring_uses_theme_colors() {
        let registry = Registry::default();
        let theme = Theme::default();
        let ring = AnimationController::new(&registry).frame(&registry, &theme).ring;
        assert_eq!(ring.background, theme.background);
        assert_eq!(ring.border, theme.selected_background);
        assert_eq!(ring.shadow_color, theme.text);
    }
}
