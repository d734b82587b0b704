//! Operation records: the typed payload appended to the log by the stores.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ID;

/// The kind of an [`Operation`].
///
/// Feeds and sets use `Add`/`Del`; ordered key-value stores use
/// `Put`/`Move`/`Del`. Unknown combinations are ignored during replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Op {
    Add,
    Del,
    Put,
    Move,
}

impl Op {
    /// The wire tag of this operation kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Add => "ADD",
            Op::Del => "DEL",
            Op::Put => "PUT",
            Op::Move => "MOVE",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single logged intent.
///
/// `key` is `None` for unkeyed stores (feed, set) and required for the ordered
/// key-value store. `value` is opaque JSON whose shape depends on `op`:
///
/// | store            | op     | value                         |
/// |------------------|--------|-------------------------------|
/// | feed / set       | `ADD`  | the item                      |
/// | feed             | `DEL`  | hash of the `ADD` to remove   |
/// | set              | `DEL`  | the item to remove            |
/// | ordered kv       | `PUT`  | `{"value": v, "position"?: n}`|
/// | ordered kv       | `MOVE` | the new position              |
/// | ordered kv       | `DEL`  | `null`                        |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub op: Op,
    pub key: Option<String>,
    pub value: Value,
}

impl Operation {
    /// Feed or set insertion of `value`.
    pub fn add(value: Value) -> Self {
        Self {
            op: Op::Add,
            key: None,
            value,
        }
    }

    /// Feed removal of the entry identified by `hash`.
    pub fn remove(hash: &ID) -> Self {
        Self {
            op: Op::Del,
            key: None,
            value: Value::String(hash.to_string()),
        }
    }

    /// Set removal of every occurrence of `value`.
    pub fn del_value(value: Value) -> Self {
        Self {
            op: Op::Del,
            key: None,
            value,
        }
    }

    /// Ordered key-value write of `value` under `key`, optionally at `position`.
    pub fn put(key: impl Into<String>, value: Value, position: Option<f64>) -> Self {
        let put = PutValue { value, position };
        Self {
            op: Op::Put,
            key: Some(key.into()),
            value: put.into_value(),
        }
    }

    /// Ordered key-value reposition of `key`.
    pub fn move_to(key: impl Into<String>, position: f64) -> Self {
        Self {
            op: Op::Move,
            key: Some(key.into()),
            value: Value::from(position),
        }
    }

    /// Ordered key-value removal of `key`.
    pub fn del_key(key: impl Into<String>) -> Self {
        Self {
            op: Op::Del,
            key: Some(key.into()),
            value: Value::Null,
        }
    }
}

/// The payload of a `PUT` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PutValue {
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

impl PutValue {
    /// Reads a `PUT` payload, returning `None` when it is not an object with a
    /// `value` field or when `position` is present but not a number.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let inner = object.get("value")?.clone();
        let position = match object.get("position") {
            None | Some(Value::Null) => None,
            Some(p) => Some(p.as_f64()?),
        };
        Some(Self {
            value: inner,
            position,
        })
    }

    fn into_value(self) -> Value {
        let mut object = serde_json::Map::new();
        object.insert("value".to_string(), self.value);
        if let Some(position) = self.position {
            object.insert("position".to_string(), Value::from(position));
        }
        Value::Object(object)
    }
}
