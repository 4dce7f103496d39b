//! Line protocol spoken on the daemon socket, one command per line:
//!
//! ```text
//! press [pointer]
//! move <x> <y> [pointer]
//! release [pointer]
//! cancel
//! show | hide
//! state | frame
//! ```
//!
//! `state` and `frame` are answered on the same connection; everything else is fire and
//! forget.

use crate::geometry::Vector;
use crate::gesture::{PointerEvent, PointerId};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/joystick.sock";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Show,
    Hide,
    Press(PointerId),
    Move(Vector, PointerId),
    Release(PointerId),
    Cancel,
    State,
    Frame,
}

#[derive(Error, Debug, PartialEq)]
pub enum ProtocolError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Bad argument '{0}'")]
    BadArgument(String),
    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),
    #[error("Unexpected trailing input '{0}'")]
    Trailing(String),
}

impl Command {
    /// The pointer event this command stands for, stamped with its arrival time.
    pub fn pointer_event(&self, at: Instant) -> Option<PointerEvent> {
        match *self {
            Self::Press(pointer) => Some(PointerEvent::Press { pointer, at }),
            Self::Move(translation, pointer) => Some(PointerEvent::Move {
                pointer,
                translation,
                at,
            }),
            Self::Release(pointer) => Some(PointerEvent::Release { pointer, at }),
            Self::Cancel => Some(PointerEvent::Cancel),
            Self::Show | Self::Hide | Self::State | Self::Frame => None,
        }
    }
}

fn number(word: Option<&str>, command: &'static str) -> Result<f64, ProtocolError> {
    let word = word.ok_or(ProtocolError::MissingArgument(command))?;
    word.parse()
        .map_err(|_| ProtocolError::BadArgument(word.to_string()))
}

fn pointer(word: Option<&str>) -> Result<PointerId, ProtocolError> {
    word.map_or(Ok(PointerId::default()), |w| {
        w.parse::<u32>()
            .map(PointerId::from)
            .map_err(|_| ProtocolError::BadArgument(w.to_string()))
    })
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(ProtocolError::Empty)?;

        let command = match head.to_ascii_lowercase().as_str() {
            "show" => Self::Show,
            "hide" => Self::Hide,
            "press" => Self::Press(pointer(words.next())?),
            "move" => {
                let x = number(words.next(), "move")?;
                let y = number(words.next(), "move")?;
                Self::Move(Vector::new(x, y), pointer(words.next())?)
            }
            "release" => Self::Release(pointer(words.next())?),
            "cancel" => Self::Cancel,
            "state" => Self::State,
            "frame" => Self::Frame,
            other => return Err(ProtocolError::Unknown(other.to_string())),
        };

        match words.next() {
            Some(rest) => Err(ProtocolError::Trailing(rest.to_string())),
            None => Ok(command),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => write!(f, "show"),
            Self::Hide => write!(f, "hide"),
            Self::Press(p) => write!(f, "press {}", p),
            Self::Move(v, p) => write!(f, "move {} {} {}", v.x, v.y, p),
            Self::Release(p) => write!(f, "release {}", p),
            Self::Cancel => write!(f, "cancel"),
            Self::State => write!(f, "state"),
            Self::Frame => write!(f, "frame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let id = PointerId::default();
        let cases = vec![
            ("show", Command::Show),
            ("  HIDE ", Command::Hide),
            ("press", Command::Press(id)),
            ("press 3", Command::Press(PointerId::new(3))),
            ("move 120 -4.5", Command::Move(Vector::new(120.0, -4.5), id)),
            ("move 0 -100 2", Command::Move(Vector::new(0.0, -100.0), PointerId::new(2))),
            ("release", Command::Release(id)),
            ("cancel", Command::Cancel),
            ("state", Command::State),
            ("frame", Command::Frame),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Command>(), Ok(expected), "{line}");
        }
    }

    #[test]
    fn test_reject_malformed_lines() {
        assert_eq!("".parse::<Command>(), Err(ProtocolError::Empty));
        assert_eq!(
            "jump".parse::<Command>(),
            Err(ProtocolError::Unknown("jump".to_string()))
        );
        assert_eq!(
            "move 10".parse::<Command>(),
            Err(ProtocolError::MissingArgument("move"))
        );
        assert_eq!(
            "move ten 0".parse::<Command>(),
            Err(ProtocolError::BadArgument("ten".to_string()))
        );
        assert_eq!(
            "press -1".parse::<Command>(),
            Err(ProtocolError::BadArgument("-1".to_string()))
        );
        assert_eq!(
            "cancel now".parse::<Command>(),
            Err(ProtocolError::Trailing("now".to_string()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        let command = Command::Move(Vector::new(-12.5, 80.0), PointerId::new(1));
        assert_eq!(command.to_string().parse::<Command>(), Ok(command));
    }

    #[test]
    fn test_only_pointer_commands_become_events() {
        let now = Instant::now();
        assert!(Command::Show.pointer_event(now).is_none());
        assert!(Command::State.pointer_event(now).is_none());
        assert_eq!(Command::Cancel.pointer_event(now), Some(PointerEvent::Cancel));
        assert!(matches!(
            Command::Press(PointerId::new(4)).pointer_event(now),
            Some(PointerEvent::Press { pointer, .. }) if pointer == PointerId::new(4)
        ));
    }
}
