//! Kulture entity - one validated world cell.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use kulture_topology::CubeCoord;

use crate::error::ValidationError;
use crate::schema::Schema;

/// Growth, invade and defense rule data.
///
/// Each map is kept as given; its contents are not interpreted here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attributes {
    pub growth: Map<String, Value>,
    pub invade: Map<String, Value>,
    pub defense: Map<String, Value>,
}

/// Gameplay state.
///
/// Numbers are held as sent, so `100` stays an integer and large integers
/// are not rounded through `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub energy: Number,
    pub health: Number,
}

impl Status {
    pub fn energy_f64(&self) -> f64 {
        self.energy.as_f64().unwrap_or_default()
    }

    pub fn health_f64(&self) -> f64 {
        self.health.as_f64().unwrap_or_default()
    }
}

/// Display projection: where a kulture sits and how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayView<'a> {
    pub location: &'a CubeCoord,
    pub image: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct KultureRecord {
    id: String,
    name: String,
    location: CubeCoord,
    image: String,
    attributes: Attributes,
    status: Status,
}

/// A validated kulture.
///
/// Only obtainable through validation, so every instance satisfies the
/// record schema. Fields are exposed read-only and the id never changes.
/// The entity owns its data outright; the record it was built from can be
/// changed or dropped freely afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Kulture {
    record: KultureRecord,
}

impl Kulture {
    /// Validate `record` and copy it into a new kulture.
    pub fn from_record(record: &Value) -> Result<Self, ValidationError> {
        Schema::kulture().validate(record)?;
        Self::decode(record.clone())
    }

    fn decode(record: Value) -> Result<Self, ValidationError> {
        serde_json::from_value(record)
            .map(|record| Self { record })
            .map_err(|e| ValidationError::new("", e.to_string()))
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn location(&self) -> &CubeCoord {
        &self.record.location
    }

    pub fn image(&self) -> &str {
        &self.record.image
    }

    /// Location and image together.
    pub fn display(&self) -> DisplayView<'_> {
        DisplayView {
            location: &self.record.location,
            image: &self.record.image,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.record.attributes
    }

    pub fn status(&self) -> &Status {
        &self.record.status
    }

    /// The canonical JSON record for this kulture.
    pub fn to_record(&self) -> Value {
        // Serializing plain maps, strings and numbers cannot fail.
        serde_json::to_value(&self.record).unwrap_or(Value::Null)
    }
}

impl TryFrom<Value> for Kulture {
    type Error = ValidationError;

    fn try_from(record: Value) -> Result<Self, Self::Error> {
        Schema::kulture().validate(&record)?;
        Self::decode(record)
    }
}

impl TryFrom<&Value> for Kulture {
    type Error = ValidationError;

    fn try_from(record: &Value) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

impl Serialize for Kulture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

impl std::fmt::Display for Kulture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) at {}", self.record.id, self.record.name, self.record.location)
    }
}
