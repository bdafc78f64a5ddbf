// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field values.
//!
//! A [`Value`] is one of a small closed set of kinds: string, integer, boolean,
//! nested record, or absent (`null`).  Anything else is rejected at the conversion
//! boundary with [`Error::UnsupportedValueKind`], so the encoder never sees a value
//! it cannot represent.
//!
//! Optional values map onto `Option<T>`: `None` becomes [`Value::Null`] and
//! `Some(v)` becomes whatever `v` converts to.
//!
//! ```rust
//! use branchlog::Value;
//!
//! assert_eq!(Value::from(Some(3)), Value::Int(3));
//! assert_eq!(Value::from(None::<&str>), Value::Null);
//! ```

use crate::error::Error;
use crate::field::{Field, resolve};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::hash::{Hash, Hasher};

/// A structured field value.
///
/// Integers compare by number, not by variant: `Value::Uint(5) == Value::Int(5)`,
/// since both are written as `5`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// An absent value, encoded as `null`.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned values that do not fit in an `i64`.
    Uint(u64),
    Str(String),
    /// A nested record.  Duplicate names inside it follow the same last-wins policy
    /// as top level fields.
    Record(Vec<Field>),
}

impl Value {
    /// A short name for the kind of this value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::Uint(_) => "integer",
            Value::Str(_) => "string",
            Value::Record(_) => "record",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Nesting depth: scalars are 0, a record of scalars is 1, and so on.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((value, depth)) = pending.pop() {
            if let Value::Record(fields) = value {
                deepest = deepest.max(depth + 1);
                pending.extend(fields.iter().map(|f| (f.value(), depth + 1)));
            }
        }
        deepest
    }

    /// The integer as an `i128`, which holds every `Int` and every `Uint`.
    fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Int(i) => Some(i128::from(*i)),
            Value::Uint(u) => Some(i128::from(*u)),
            _ => None,
        }
    }

    /// Converts any serializable value into a [Value].
    ///
    /// `name` is only used to label the error.  Floats, sequences and other kinds
    /// outside the supported set fail with [`Error::UnsupportedValueKind`].
    ///
    /// ```rust
    /// use branchlog::Value;
    ///
    /// #[derive(serde::Serialize)]
    /// struct Job { id: u32, name: Option<String> }
    ///
    /// let value = Value::from_serialize("job", &Job { id: 2, name: None }).unwrap();
    /// assert_eq!(value.depth(), 1);
    /// assert!(Value::from_serialize("ratio", &0.5).is_err());
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<Value, Error> {
        let json = serde_json::to_value(value).map_err(|_| Error::UnsupportedValueKind {
            name: name.to_string(),
            kind: "unserializable",
        })?;
        Value::from_json(name, json)
    }

    /// Converts a decoded JSON value into a [Value].
    pub fn from_json(name: &str, json: serde_json::Value) -> Result<Value, Error> {
        let unsupported = |kind| Error::UnsupportedValueKind {
            name: name.to_string(),
            kind,
        };
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Value::Uint(u))
                } else {
                    Err(unsupported("float"))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Str(s)),
            serde_json::Value::Array(_) => Err(unsupported("array")),
            serde_json::Value::Object(map) => {
                let mut fields = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let value = Value::from_json(&key, value)?;
                    fields.push(Field::new(key, value));
                }
                Ok(Value::Record(fields))
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            _ => match (self.as_integer(), other.as_integer()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => state.write_u8(0),
            Value::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            Value::Int(_) | Value::Uint(_) => {
                state.write_u8(2);
                self.as_integer().hash(state);
            }
            Value::Str(s) => {
                state.write_u8(3);
                s.hash(state);
            }
            Value::Record(fields) => {
                state.write_u8(4);
                fields.hash(state);
            }
        }
    }
}

impl Drop for Value {
    // Unlinks nested records one level at a time so dropping a deep record
    // cannot exhaust the stack.
    fn drop(&mut self) {
        let Value::Record(fields) = self else {
            return;
        };
        let mut pending = std::mem::take(fields);
        while let Some(mut field) = pending.pop() {
            if let Value::Record(inner) = field.value_mut() {
                pending.append(inner);
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Record(fields) => {
                let resolved = resolve(fields);
                let mut map = serializer.serialize_map(Some(resolved.len()))?;
                for (name, value) in resolved {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::Int(i as i64)
            }
        })*
    };
}
from_signed!(i8, i16, i32, i64, isize);

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(u: $t) -> Self {
                match i64::try_from(u) {
                    Ok(i) => Value::Int(i),
                    Err(_) => Value::Uint(u as u64),
                }
            }
        })*
    };
}
from_unsigned!(u8, u16, u32, u64, usize);

impl From<Vec<Field>> for Value {
    fn from(fields: Vec<Field>) -> Self {
        Value::Record(fields)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/*
Boilerplate notes.

Copy is out since strings and records own heap data.
Ord makes no sense across kinds.
PartialEq/Hash are by number for integers, so Uint(5) and Int(5) are one value
and a decoded record compares equal to the fields that produced it.
Display is left out; the encoder decides how values look.
There is intentionally no From<f32>/From<f64>: floats are not a supported kind,
and from_serialize reports them as an error instead.
*/
