//! Kulture World Topology
//!
//! Cube coordinates for the hexagonal kulture grid and the six neighbor
//! directions used to resolve a cell's surroundings.
//!
//! # Coordinate System
//!
//! Every cell carries a cube coordinate `(x, y, z)`. Cells on the hex plane
//! satisfy `x + y + z == 0`; moving one step in any of the six directions
//! changes exactly two axes by one unit in opposite senses, so the plane
//! invariant is preserved by neighbor steps.
//!
//! # Direction Codes
//!
//! Each direction is named by a three character code, one character per
//! axis in `x, y, z` order: `+` for a unit increase, `-` for a unit decrease
//! and `0` for no change. The six codes are
//! `0+-`, `0-+`, `+0-`, `+-0`, `-+0` and `-0+`.

mod cube;
mod direction;

pub use cube::{CubeCoord, ParseCoordError};
pub use direction::{Direction, ParseDirectionError};

/// Number of neighbors of every cell on the hex plane.
pub const NEIGHBOR_COUNT: usize = 6;

// Compile-time check that the direction table matches the neighbor count
const _: () = assert!(Direction::ALL.len() == NEIGHBOR_COUNT);
