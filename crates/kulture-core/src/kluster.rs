//! Kluster - an in-memory working set of kultures on the hex grid.
//!
//! Kultures are keyed by id. A secondary index maps each occupied location
//! to the ids found there, so location lookups and neighbor resolution do
//! not scan the whole kluster.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use kulture_topology::{CubeCoord, Direction, NEIGHBOR_COUNT};

use crate::error::{KlusterError, MutationError};
use crate::kulture::Kulture;

/// An id-indexed collection of kultures with spatial queries.
///
/// Mutations that would break id uniqueness are refused and leave the
/// kluster untouched. Wrap it in a lock when sharing it between tasks; a
/// single add or delete updates both indexes.
#[derive(Debug, Clone, Default)]
pub struct Kluster {
    kultures: HashMap<String, Kulture>,

    // Index
    by_location: HashMap<CubeCoord, Vec<String>>,
}

impl Kluster {
    /// Build a kluster from kultures with pairwise-distinct ids.
    pub fn new<I>(kultures: I) -> Result<Self, KlusterError>
    where
        I: IntoIterator<Item = Kulture>,
    {
        let mut kluster = Self::default();
        for kulture in kultures {
            if kluster.contains(kulture.id()) {
                debug!(id = kulture.id(), "duplicate id in kluster input");
                return Err(KlusterError::DuplicateId(kulture.id().to_string()));
            }
            kluster.insert(kulture);
        }
        debug!(count = kluster.count(), "kluster built");
        Ok(kluster)
    }

    /// Build a kluster from an untyped JSON array of kulture records.
    pub fn from_records(records: &Value) -> Result<Self, KlusterError> {
        let items = records
            .as_array()
            .ok_or(KlusterError::ArgumentType("argument is not an array"))?;

        let kultures = items
            .iter()
            .map(Kulture::from_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| {
                debug!(%err, "array element is not a valid kulture");
                KlusterError::ArgumentType("all elements in the array must be valid kulture objects")
            })?;

        Self::new(kultures)
    }

    /// Number of kultures held.
    pub fn count(&self) -> usize {
        self.kultures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kultures.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.kultures.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Kulture> {
        self.kultures.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.kultures.keys().map(String::as_str)
    }

    fn insert(&mut self, kulture: Kulture) {
        self.by_location
            .entry(*kulture.location())
            .or_default()
            .push(kulture.id().to_string());
        self.kultures.insert(kulture.id().to_string(), kulture);
    }

    /// Add a kulture whose id is not yet present.
    pub fn add_kulture(&mut self, kulture: Kulture) -> Result<(), MutationError> {
        if self.contains(kulture.id()) {
            debug!(id = kulture.id(), "add refused, id already present");
            return Err(MutationError::ExistingKulture);
        }
        debug!(id = kulture.id(), location = %kulture.location(), "adding kulture");
        self.insert(kulture);
        Ok(())
    }

    /// Add from an untyped record, refusing anything that does not validate.
    pub fn add_record(&mut self, record: &Value) -> Result<(), MutationError> {
        let kulture = Kulture::from_record(record).map_err(|err| {
            debug!(%err, "add refused, not a kulture");
            MutationError::NotAKulture
        })?;
        self.add_kulture(kulture)
    }

    /// Remove a kulture by id, handing it back.
    pub fn delete_kulture_by_id(&mut self, id: &str) -> Result<Kulture, MutationError> {
        let Some(kulture) = self.kultures.remove(id) else {
            debug!(id, "delete refused, id not present");
            return Err(MutationError::NonExistentKulture);
        };

        let location = *kulture.location();
        if let Some(ids) = self.by_location.get_mut(&location) {
            ids.retain(|other| other != id);
            if ids.is_empty() {
                self.by_location.remove(&location);
            }
        }
        debug!(id, "deleted kulture");
        Ok(kulture)
    }

    /// Delete using an untyped id, which must be a JSON string.
    pub fn delete_by_raw_id(&mut self, id: &Value) -> Result<Kulture, MutationError> {
        let id = id.as_str().ok_or(MutationError::NotAString)?;
        self.delete_kulture_by_id(id)
    }

    /// Replace the kulture carrying the same id, returning the old one.
    pub fn replace_kulture(&mut self, kulture: Kulture) -> Result<Kulture, MutationError> {
        let previous = self.delete_kulture_by_id(kulture.id())?;
        self.insert(kulture);
        Ok(previous)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Kulture> {
        self.kultures.get(id)
    }

    /// The first kulture added at `location` that is still present.
    pub fn get_by_loc(&self, location: &CubeCoord) -> Option<&Kulture> {
        self.by_location
            .get(location)
            .and_then(|ids| ids.first())
            .and_then(|id| self.kultures.get(id))
    }

    /// Location lookup from an untyped `{x, y, z}` object in any key order.
    ///
    /// Anything that is not such an object simply finds nothing.
    pub fn get_by_raw_loc(&self, location: &Value) -> Option<&Kulture> {
        let location = coord_from_value(location)?;
        self.get_by_loc(&location)
    }

    /// The six neighbors of the kulture `id`, or `None` if `id` is absent.
    pub fn get_neighbors(&self, id: &str) -> Option<Neighbors<'_>> {
        let center = self.get_by_id(id)?;
        let origin = *center.location();
        let cells = Direction::ALL.map(|direction| {
            origin
                .checked_neighbor(direction)
                .and_then(|location| self.get_by_loc(&location))
        });
        debug!(id, found = cells.iter().flatten().count(), "resolved neighbors");
        Some(Neighbors { center, cells })
    }
}

fn coord_from_value(value: &Value) -> Option<CubeCoord> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}

/// The neighborhood of one kulture, one slot per [`Direction`].
///
/// Serializes as an object keyed by direction code, with `null` for
/// directions where nothing sits.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors<'a> {
    center: &'a Kulture,
    cells: [Option<&'a Kulture>; NEIGHBOR_COUNT],
}

impl<'a> Neighbors<'a> {
    pub fn center(&self) -> &'a Kulture {
        self.center
    }

    pub fn get(&self, direction: Direction) -> Option<&'a Kulture> {
        self.cells[direction.index()]
    }

    /// Look up by direction code. Unknown codes find nothing.
    pub fn get_code(&self, code: &str) -> Option<&'a Kulture> {
        Direction::from_code(code).and_then(|d| self.get(d))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, Option<&'a Kulture>)> + '_ {
        Direction::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// How many of the six directions are occupied.
    pub fn present_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }
}

impl Serialize for Neighbors<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(NEIGHBOR_COUNT))?;
        for (direction, cell) in self.iter() {
            map.serialize_entry(direction.code(), &cell)?;
        }
        map.end()
    }
}

/// Serializable result of a kluster mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> From<Result<T, MutationError>> for MutationOutcome {
    fn from(result: Result<T, MutationError>) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                error: None,
            },
            Err(err) => Self {
                success: false,
                error: Some(err.to_string()),
            },
        }
    }
}
