use super::event::{PointerEvent, PointerId};
use crate::anim::spring::{RETURN_SPRING, Spring};
use crate::geometry::Vector;
use crate::menu::{DEAD_ZONE, Direction, classify_with};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const LONG_PRESS: Duration = Duration::from_millis(10);

/// The only mutable input state of the menu. Written exclusively by [`GestureTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub is_open: bool,
    pub displacement: Vector,
}

/// A consistent read of the tracker: the state together with the direction derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSnapshot {
    pub state: GestureState,
    pub active: Option<Direction>,
}

impl fmt::Display for GestureSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = if self.state.is_open { "open" } else { "idle" };
        let active = self.active.map_or("none".to_string(), |d| d.to_string());
        write!(f, "{} {} {}", phase, active, self.state.displacement)
    }
}

/// Read-side handle for other threads. Every read sees a fully written snapshot.
#[derive(Debug, Clone, Default)]
pub struct SharedGestureState(Arc<RwLock<GestureSnapshot>>);

impl SharedGestureState {
    pub fn read(&self) -> GestureSnapshot {
        *self.0.read()
    }

    fn publish(&self, snapshot: GestureSnapshot) {
        *self.0.write() = snapshot;
    }
}

/// What a single input did to the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Unrelated to the tracked gesture, or dropped before activation.
    Ignored,
    /// A press started and waits for the activation threshold.
    Pending,
    /// The press qualified and the menu opened.
    Opened,
    Moved,
    /// The gesture ended. Carries the direction active at that instant.
    Released(Option<Direction>),
    /// A press ended before it qualified. No release is reported.
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Pending {
        pointer: PointerId,
        pressed_at: Instant,
    },
    Open {
        pointer: PointerId,
    },
}

/// Press, drag and release state machine.
///
/// Only one gesture is tracked at a time. After every write the active direction is
/// recomputed and the snapshot published, so readers never observe a displacement and a
/// direction that disagree.
#[derive(Debug)]
pub struct GestureTracker {
    phase: Phase,
    state: GestureState,
    active: Option<Direction>,
    activation: Duration,
    dead_zone: f64,
    return_x: Spring,
    return_y: Spring,
    shared: SharedGestureState,
}

impl GestureTracker {
    pub fn new(activation: Duration, dead_zone: f64) -> Self {
        Self {
            phase: Phase::Idle,
            state: GestureState::default(),
            active: None,
            activation,
            dead_zone,
            return_x: Spring::settled(0.0, RETURN_SPRING),
            return_y: Spring::settled(0.0, RETURN_SPRING),
            shared: SharedGestureState::default(),
        }
    }

    pub fn handle(&mut self, event: &PointerEvent) -> Progress {
        match *event {
            PointerEvent::Press { pointer, at } => self.press(pointer, at),
            PointerEvent::Move {
                pointer,
                translation,
                at,
            } => self.drag(pointer, translation, at),
            PointerEvent::Release { pointer, at } => match self.phase {
                Phase::Pending {
                    pointer: p,
                    pressed_at,
                } if p == pointer => {
                    if self.qualifies(pressed_at, at) {
                        // Held long enough but never moved or polled: it did open.
                        self.open(pointer);
                        self.release()
                    } else {
                        self.phase = Phase::Idle;
                        Progress::Dismissed
                    }
                }
                Phase::Open { pointer: p } if p == pointer => self.release(),
                _ => Progress::Ignored,
            },
            PointerEvent::Cancel => match self.phase {
                Phase::Idle => Progress::Ignored,
                Phase::Pending { .. } => {
                    self.phase = Phase::Idle;
                    Progress::Dismissed
                }
                Phase::Open { .. } => self.release(),
            },
        }
    }

    /// Opens a pending press once it has been held past the activation threshold, even if
    /// the pointer has not moved.
    pub fn poll(&mut self, now: Instant) -> Progress {
        match self.phase {
            Phase::Pending {
                pointer,
                pressed_at,
            } if self.qualifies(pressed_at, now) => {
                self.open(pointer);
                Progress::Opened
            }
            _ => Progress::Ignored,
        }
    }

    /// Eases the displacement back to the rest position after a release. Returns whether the
    /// displacement changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.phase != Phase::Idle || self.is_home() {
            return false;
        }

        self.return_x.advance(dt);
        self.return_y.advance(dt);
        let displacement = Vector::new(self.return_x.position(), self.return_y.position());
        self.write(GestureState {
            is_open: false,
            displacement,
        });
        true
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn active_direction(&self) -> Option<Direction> {
        self.active
    }

    pub fn snapshot(&self) -> GestureSnapshot {
        GestureSnapshot {
            state: self.state,
            active: self.active,
        }
    }

    pub fn shared(&self) -> SharedGestureState {
        self.shared.clone()
    }

    /// A press is pending or the menu is open.
    pub fn is_tracking(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Released and still easing back to the rest position.
    pub fn is_returning(&self) -> bool {
        self.phase == Phase::Idle && !self.is_home()
    }

    fn is_home(&self) -> bool {
        self.return_x.is_at_rest() && self.return_y.is_at_rest()
    }

    fn qualifies(&self, pressed_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(pressed_at) >= self.activation
    }

    fn press(&mut self, pointer: PointerId, at: Instant) -> Progress {
        if self.phase != Phase::Idle {
            log::debug!("Ignoring press from pointer {} while a gesture is active", pointer);
            return Progress::Ignored;
        }
        self.phase = Phase::Pending {
            pointer,
            pressed_at: at,
        };
        Progress::Pending
    }

    fn drag(&mut self, pointer: PointerId, translation: Vector, at: Instant) -> Progress {
        match self.phase {
            Phase::Pending {
                pointer: p,
                pressed_at,
            } if p == pointer => {
                if !self.qualifies(pressed_at, at) {
                    return Progress::Ignored;
                }
                self.open(pointer);
                self.set_displacement(translation);
                Progress::Opened
            }
            Phase::Open { pointer: p } if p == pointer => {
                self.set_displacement(translation);
                Progress::Moved
            }
            _ => Progress::Ignored,
        }
    }

    fn open(&mut self, pointer: PointerId) {
        self.phase = Phase::Open { pointer };
        self.return_x = Spring::settled(0.0, RETURN_SPRING);
        self.return_y = Spring::settled(0.0, RETURN_SPRING);
        self.write(GestureState {
            is_open: true,
            displacement: Vector::ZERO,
        });
    }

    fn set_displacement(&mut self, translation: Vector) {
        self.write(GestureState {
            is_open: true,
            displacement: translation.sanitized(),
        });
    }

    fn release(&mut self) -> Progress {
        let direction = self.active;
        let from = self.state.displacement;

        self.phase = Phase::Idle;
        self.return_x = Spring::new(from.x, 0.0, RETURN_SPRING);
        self.return_y = Spring::new(from.y, 0.0, RETURN_SPRING);
        self.write(GestureState {
            is_open: false,
            displacement: from,
        });

        log::debug!("Gesture released toward {:?}", direction);
        Progress::Released(direction)
    }

    fn write(&mut self, state: GestureState) {
        self.state = state;
        self.active = if state.is_open {
            classify_with(state.displacement, self.dead_zone)
        } else {
            None
        };
        self.shared.publish(self.snapshot());
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(LONG_PRESS, DEAD_ZONE)
    }
}
