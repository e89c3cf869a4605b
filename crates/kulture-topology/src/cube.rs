//! Cube coordinate system for the hexagonal world grid.
//!
//! Cube coordinates use three axes (x, y, z). On the hex plane the axes
//! always sum to zero, which makes distances and neighbor steps symmetric
//! across all six directions.

use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use thiserror::Error;

use crate::{Direction, NEIGHBOR_COUNT};

/// A position on the cube-coordinate grid.
///
/// Field order is irrelevant for equality and hashing, so two coordinates
/// built from `{x, y, z}` and `{z, y, x}` records compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubeCoord {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl CubeCoord {
    /// Origin of the coordinate system.
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new coordinate.
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Whether the coordinate lies on the hex plane (`x + y + z == 0`).
    pub fn is_hex_plane(&self) -> bool {
        self.x
            .checked_add(self.y)
            .and_then(|xy| xy.checked_add(self.z))
            == Some(0)
    }

    /// Cube distance: the largest per-axis difference.
    ///
    /// For two hex-plane cells this is the number of neighbor steps between
    /// them.
    pub fn distance(&self, other: &Self) -> u64 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }

    /// The coordinate one step away in `direction`.
    ///
    /// Uses plain `i64` arithmetic, so an axis at `i64::MAX` or `i64::MIN`
    /// overflows (a panic in debug builds). Use
    /// [`checked_neighbor`](Self::checked_neighbor) for untrusted input.
    pub fn neighbor(&self, direction: Direction) -> Self {
        *self + direction.offset()
    }

    /// Like [`neighbor`](Self::neighbor) but `None` if any axis would overflow.
    pub fn checked_neighbor(&self, direction: Direction) -> Option<Self> {
        let d = direction.offset();
        Some(Self {
            x: self.x.checked_add(d.x)?,
            y: self.y.checked_add(d.y)?,
            z: self.z.checked_add(d.z)?,
        })
    }

    /// All six neighbors, in [`Direction::ALL`] order.
    ///
    /// Overflows like [`neighbor`](Self::neighbor) at the `i64` limits.
    pub fn neighbors(&self) -> [Self; NEIGHBOR_COUNT] {
        Direction::ALL.map(|d| self.neighbor(d))
    }

    /// Dotted `x.y.z` form, used for grid-derived entity ids.
    pub fn id_string(&self) -> String {
        format!("{}.{}.{}", self.x, self.y, self.z)
    }
}

/// Axis-wise addition. Overflow follows `i64` semantics.
impl Add for CubeCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for CubeCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for CubeCoord {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Canonical location key: `x,y,z`.
impl std::fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Error parsing a `x,y,z` location key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCoordError {
    #[error("expected 3 comma-separated axes, found {0}")]
    WrongArity(usize),

    #[error("invalid axis value: {0:?}")]
    InvalidAxis(String),
}

impl FromStr for CubeCoord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseCoordError::WrongArity(parts.len()));
        }
        let axis = |p: &str| {
            p.parse::<i64>()
                .map_err(|_| ParseCoordError::InvalidAxis(p.to_string()))
        };
        Ok(Self {
            x: axis(parts[0])?,
            y: axis(parts[1])?,
            z: axis(parts[2])?,
        })
    }
}
