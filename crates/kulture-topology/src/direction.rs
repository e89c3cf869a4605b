//! The six hex neighbor directions and their direction codes.

use std::str::FromStr;

use thiserror::Error;

use crate::{CubeCoord, NEIGHBOR_COUNT};

/// One of the six directions from a hex cell to an adjacent cell.
///
/// Variants are named after the two axes that change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// `(0, +1, -1)`, code `0+-`
    YPlusZMinus,
    /// `(0, -1, +1)`, code `0-+`
    YMinusZPlus,
    /// `(+1, 0, -1)`, code `+0-`
    XPlusZMinus,
    /// `(+1, -1, 0)`, code `+-0`
    XPlusYMinus,
    /// `(-1, +1, 0)`, code `-+0`
    XMinusYPlus,
    /// `(-1, 0, +1)`, code `-0+`
    XMinusZPlus,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Self; NEIGHBOR_COUNT] = [
        Self::YPlusZMinus,
        Self::YMinusZPlus,
        Self::XPlusZMinus,
        Self::XPlusYMinus,
        Self::XMinusYPlus,
        Self::XMinusZPlus,
    ];

    /// Unit cube vector for this direction.
    pub const fn offset(self) -> CubeCoord {
        match self {
            Self::YPlusZMinus => CubeCoord::new(0, 1, -1),
            Self::YMinusZPlus => CubeCoord::new(0, -1, 1),
            Self::XPlusZMinus => CubeCoord::new(1, 0, -1),
            Self::XPlusYMinus => CubeCoord::new(1, -1, 0),
            Self::XMinusYPlus => CubeCoord::new(-1, 1, 0),
            Self::XMinusZPlus => CubeCoord::new(-1, 0, 1),
        }
    }

    /// Three character direction code, one sign per axis in x, y, z order.
    pub const fn code(self) -> &'static str {
        match self {
            Self::YPlusZMinus => "0+-",
            Self::YMinusZPlus => "0-+",
            Self::XPlusZMinus => "+0-",
            Self::XPlusYMinus => "+-0",
            Self::XMinusYPlus => "-+0",
            Self::XMinusZPlus => "-0+",
        }
    }

    /// Look a direction up by its code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }

    /// The direction pointing back.
    pub const fn opposite(self) -> Self {
        match self {
            Self::YPlusZMinus => Self::YMinusZPlus,
            Self::YMinusZPlus => Self::YPlusZMinus,
            Self::XPlusZMinus => Self::XMinusZPlus,
            Self::XPlusYMinus => Self::XMinusYPlus,
            Self::XMinusYPlus => Self::XPlusYMinus,
            Self::XMinusZPlus => Self::XPlusZMinus,
        }
    }

    /// Position in [`Direction::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Error for an unknown direction code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction code: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}
