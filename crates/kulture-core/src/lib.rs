//! Kulture Core
//!
//! Validated world-cell entities and the in-memory cluster that indexes them
//! on the hex grid.
//!
//! # Architecture
//!
//! - **Schema**: the process-wide record schema, plus standalone validation
//!   helpers that share it with entity construction
//! - **Kulture**: one validated record with immutable identity
//! - **Kluster**: id-indexed collection of kultures with location lookup and
//!   six-direction neighbor resolution
//! - **Error**: construction errors, soft mutation failures and the error
//!   envelope used at the service boundary
//!
//! # Example
//!
//! ```
//! use kulture_core::{Kluster, Kulture};
//! use serde_json::json;
//!
//! let record = json!({
//!     "id": "0.0.0",
//!     "name": "center",
//!     "location": { "x": 0, "y": 0, "z": 0 },
//!     "image": "unknown",
//!     "attributes": { "growth": {}, "invade": {}, "defense": {} },
//!     "status": { "energy": 100, "health": 200 }
//! });
//!
//! let kulture = Kulture::from_record(&record).unwrap();
//! let kluster = Kluster::new([kulture]).unwrap();
//! let neighbors = kluster.get_neighbors("0.0.0").unwrap();
//! assert_eq!(neighbors.present_count(), 0);
//! ```

pub mod error;
pub mod kluster;
pub mod kulture;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ErrorEnvelope, KlusterError, MutationError, ValidationError};
pub use kluster::{Kluster, MutationOutcome, Neighbors};
pub use kulture::{Attributes, DisplayView, Kulture, Status};
pub use schema::{is_valid, validation_error, Schema};

pub use kulture_topology::{CubeCoord, Direction};
