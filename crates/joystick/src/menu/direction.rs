use crate::geometry::Vector;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[strum(to_string = "up", serialize = "u", serialize = "north", serialize = "n")]
    Up,
    #[strum(to_string = "left", serialize = "l", serialize = "west", serialize = "w")]
    Left,
    #[strum(to_string = "right", serialize = "r", serialize = "east", serialize = "e")]
    Right,
    #[strum(to_string = "down", serialize = "d", serialize = "south", serialize = "s")]
    Down,
}

impl Direction {
    /// Registry order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    pub fn as_index(&self) -> usize {
        *self as usize
    }

    /// Unit ray from the menu center toward this direction's item.
    pub fn unit(&self) -> Vector {
        match self {
            Self::Up => Vector::new(0.0, -1.0),
            Self::Left => Vector::new(-1.0, 0.0),
            Self::Right => Vector::new(1.0, 0.0),
            Self::Down => Vector::new(0.0, 1.0),
        }
    }

    /// Rotation of the connector line in degrees, clockwise from the +x axis.
    pub fn angle(&self) -> f64 {
        match self {
            Self::Up => -90.0,
            Self::Left => 180.0,
            Self::Right => 0.0,
            Self::Down => 90.0,
        }
    }
}
