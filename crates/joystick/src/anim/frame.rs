use crate::geometry::Vector;
use crate::menu::Direction;
use palette::Srgba;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct ItemVisual {
    pub direction: Direction,
    pub opacity: f64,
    pub translation: Vector,
    pub scale: f64,
    pub background: Srgba<f64>,
    pub border: Srgba<f64>,
    pub glow: Srgba<f64>,
    pub label: Srgba<f64>,
    pub shadow_opacity: f64,
    pub shadow_radius: f64,
    pub elevation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorVisual {
    pub direction: Direction,
    pub opacity: f64,
    pub color: Srgba<f64>,
    pub length: f64,
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KnobVisual {
    pub translation: Vector,
    pub scale: f64,
    pub color: Srgba<f64>,
    pub shadow_offset: Vector,
    pub shadow_opacity: f64,
    pub shadow_radius: f64,
    pub elevation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingVisual {
    pub background: Srgba<f64>,
    pub border: Srgba<f64>,
    pub shadow_color: Srgba<f64>,
    pub shadow_opacity: f64,
}

/// Everything a renderer needs for one frame of the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub items: [ItemVisual; 4],
    pub connectors: [ConnectorVisual; 4],
    pub knob: KnobVisual,
    pub ring: RingVisual,
}

impl Frame {
    pub fn item(&self, direction: Direction) -> &ItemVisual {
        &self.items[direction.as_index()]
    }

    pub fn connector(&self, direction: Direction) -> &ConnectorVisual {
        &self.connectors[direction.as_index()]
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ring shadow={:.2} knob at={} scale={:.2}",
            self.ring.shadow_opacity, self.knob.translation, self.knob.scale
        )?;
        for (item, line) in self.items.iter().zip(&self.connectors) {
            writeln!(
                f,
                "{:<5} opacity={:.2} at={} scale={:.2} line={:.2}",
                item.direction, item.opacity, item.translation, item.scale, line.opacity
            )?;
        }
        Ok(())
    }
}

/// Latest frame, for renderers and inspection on other threads.
#[derive(Debug, Clone, Default)]
pub struct SharedFrame(Arc<RwLock<Option<Frame>>>);

impl SharedFrame {
    pub fn read(&self) -> Option<Frame> {
        self.0.read().clone()
    }

    pub fn publish(&self, frame: Frame) {
        *self.0.write() = Some(frame);
    }
}
