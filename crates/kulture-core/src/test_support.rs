//! Record and grid builders shared by the unit tests.

use serde_json::{json, Value};

use crate::Kulture;

/// A valid record at `(x, y, z)` whose id is the dotted coordinate.
pub fn record_at(x: i64, y: i64, z: i64) -> Value {
    let id = format!("{x}.{y}.{z}");
    json!({
        "id": id,
        "name": format!("I am {id}"),
        "location": { "x": x, "y": y, "z": z },
        "image": "unknown",
        "attributes": { "growth": {}, "invade": {}, "defense": {} },
        "status": { "energy": 100, "health": 200 }
    })
}

pub fn kulture_at(x: i64, y: i64, z: i64) -> Kulture {
    Kulture::from_record(&record_at(x, y, z)).unwrap()
}

/// Every integer coordinate in `[start, end]^3`, x outermost.
pub fn grid(start: i64, end: i64) -> Vec<Kulture> {
    let mut kultures = Vec::new();
    for x in start..=end {
        for y in start..=end {
            for z in start..=end {
                kultures.push(kulture_at(x, y, z));
            }
        }
    }
    kultures
}

/// Copy of `record` with the dotted `path` removed.
pub fn remove_path(record: &Value, path: &str) -> Value {
    let mut copy = record.clone();
    let mut parts: Vec<&str> = path.split('.').collect();
    let leaf = parts.pop().unwrap();
    let mut node = &mut copy;
    for part in parts {
        node = node.get_mut(part).unwrap();
    }
    node.as_object_mut().unwrap().remove(leaf);
    copy
}
