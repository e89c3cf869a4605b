//! The kulture record schema.
//!
//! One [`Schema`] is built on first use and shared for the life of the
//! process. Entity construction and the standalone helpers [`is_valid`] and
//! [`validation_error`] all check against it, so they never disagree.
//!
//! Fields are checked depth-first in declaration order and checking stops
//! at the first failure.

use std::sync::OnceLock;

use serde_json::Value;

use crate::error::ValidationError;

pub(crate) const REQUIRED: &str = "is required";
pub(crate) const WRONG_TYPE: &str = "is the wrong type";
pub(crate) const EMPTY: &str = "must not be empty";

/// Expected JSON shape of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string
    Text,
    /// Integer fitting in `i64`
    Integer,
    /// Any JSON number
    Number,
    /// Object with no further constraints
    AnyObject,
    /// Object whose listed fields are all required
    Object(Vec<Field>),
}

/// A required field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Schema for kulture records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub title: &'static str,
    pub fields: Vec<Field>,
}

impl Schema {
    /// The process-wide kulture schema.
    pub fn kulture() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(Self::build)
    }

    fn build() -> Self {
        use FieldKind::*;

        Self {
            title: "Kulture data definition",
            fields: vec![
                Field::new("id", Text),
                Field::new("name", Text),
                Field::new(
                    "location",
                    Object(vec![
                        Field::new("x", Integer),
                        Field::new("y", Integer),
                        Field::new("z", Integer),
                    ]),
                ),
                Field::new("image", Text),
                Field::new(
                    "attributes",
                    Object(vec![
                        Field::new("growth", AnyObject),
                        Field::new("invade", AnyObject),
                        Field::new("defense", AnyObject),
                    ]),
                ),
                Field::new(
                    "status",
                    Object(vec![
                        Field::new("energy", Number),
                        Field::new("health", Number),
                    ]),
                ),
            ],
        }
    }

    /// Check `record`, returning the first violation.
    pub fn validate(&self, record: &Value) -> Result<(), ValidationError> {
        match record {
            Value::Null => Err(ValidationError::new("", REQUIRED)),
            Value::Object(_) => check_fields(&self.fields, record, ""),
            _ => Err(ValidationError::new("", WRONG_TYPE)),
        }
    }

    /// Every dotted path the schema requires, leaves and parents alike.
    pub fn required_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.fields, "", &mut paths);
        paths
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn check_fields(fields: &[Field], object: &Value, prefix: &str) -> Result<(), ValidationError> {
    for field in fields {
        let path = join(prefix, field.name);
        let value = match object.get(field.name) {
            None | Some(Value::Null) => return Err(ValidationError::new(path, REQUIRED)),
            Some(v) => v,
        };

        match &field.kind {
            FieldKind::Text => match value.as_str() {
                None => return Err(ValidationError::new(path, WRONG_TYPE)),
                Some("") => return Err(ValidationError::new(path, EMPTY)),
                Some(_) => {}
            },
            FieldKind::Integer => {
                if value.as_i64().is_none() {
                    return Err(ValidationError::new(path, WRONG_TYPE));
                }
            }
            FieldKind::Number => {
                if !value.is_number() {
                    return Err(ValidationError::new(path, WRONG_TYPE));
                }
            }
            FieldKind::AnyObject => {
                if !value.is_object() {
                    return Err(ValidationError::new(path, WRONG_TYPE));
                }
            }
            FieldKind::Object(children) => {
                if !value.is_object() {
                    return Err(ValidationError::new(path, WRONG_TYPE));
                }
                check_fields(children, value, &path)?;
            }
        }
    }
    Ok(())
}

fn collect_paths(fields: &[Field], prefix: &str, out: &mut Vec<String>) {
    for field in fields {
        let path = join(prefix, field.name);
        out.push(path.clone());
        if let FieldKind::Object(children) = &field.kind {
            collect_paths(children, &path, out);
        }
    }
}

/// Whether `record` is a valid kulture record.
pub fn is_valid(record: &Value) -> bool {
    Schema::kulture().validate(record).is_ok()
}

/// `None` for a valid record, otherwise the first violation.
pub fn validation_error(record: &Value) -> Option<ValidationError> {
    Schema::kulture().validate(record).err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record_at, remove_path};
    use serde_json::json;

    #[test]
    fn schema_is_shared() {
        assert!(std::ptr::eq(Schema::kulture(), Schema::kulture()));
    }

    #[test]
    fn valid_record_passes() {
        let record = record_at(0, 1, -1);
        assert!(is_valid(&record));
        assert_eq!(validation_error(&record), None);
    }

    #[test]
    fn null_and_non_object() {
        assert_eq!(
            validation_error(&Value::Null),
            Some(ValidationError::new("", REQUIRED))
        );
        assert_eq!(
            validation_error(&json!([1, 2, 3])),
            Some(ValidationError::new("", WRONG_TYPE))
        );
    }

    #[test]
    fn every_required_path_is_enforced() {
        let good = record_at(1, 2, 3);
        for path in Schema::kulture().required_paths() {
            let bad = remove_path(&good, &path);
            let err = validation_error(&bad).expect("missing field should fail");
            assert_eq!(err.path, path);
            assert_eq!(err.message, REQUIRED);
            assert!(!is_valid(&bad));
        }
    }

    #[test]
    fn wrong_types_are_reported() {
        let mut bad = record_at(0, 0, 0);
        bad["location"]["y"] = json!("one");
        assert_eq!(
            validation_error(&bad),
            Some(ValidationError::new("location.y", WRONG_TYPE))
        );

        let mut bad = record_at(0, 0, 0);
        bad["location"]["x"] = json!(0.5);
        assert_eq!(validation_error(&bad).unwrap().path, "location.x");

        let mut bad = record_at(0, 0, 0);
        bad["status"]["health"] = json!("full");
        assert_eq!(validation_error(&bad).unwrap().path, "status.health");

        let mut bad = record_at(0, 0, 0);
        bad["attributes"]["invade"] = json!(7);
        assert_eq!(validation_error(&bad).unwrap().path, "attributes.invade");

        let mut bad = record_at(0, 0, 0);
        bad["id"] = json!(13);
        assert_eq!(
            validation_error(&bad),
            Some(ValidationError::new("id", WRONG_TYPE))
        );
    }

    #[test]
    fn empty_strings_rejected() {
        for field in ["id", "name", "image"] {
            let mut bad = record_at(0, 0, 0);
            bad[field] = json!("");
            assert_eq!(validation_error(&bad), Some(ValidationError::new(field, EMPTY)));
        }
    }

    #[test]
    fn first_failure_only() {
        let mut bad = record_at(0, 0, 0);
        bad.as_object_mut().unwrap().remove("name");
        bad.as_object_mut().unwrap().remove("status");
        assert_eq!(validation_error(&bad).unwrap().path, "name");
    }

    #[test]
    fn extra_fields_allowed() {
        let mut record = record_at(0, 0, 0);
        record["comment"] = json!("ignored");
        assert!(is_valid(&record));
    }
}
