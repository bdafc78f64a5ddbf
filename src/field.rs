// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named fields and the duplicate-name policy.
//!
//! Field sequences keep every occurrence of a name.  Collisions are only resolved
//! when a sequence is encoded, by [`resolve`]: **the last occurrence wins**.  The
//! surviving entry sits at the position of the name's first occurrence and carries
//! the value of its last one.

use crate::value::Value;
use std::collections::HashMap;

/// A single `(name, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
    value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Field {
    fn from((name, value): (K, V)) -> Self {
        Field::new(name, value)
    }
}

/// Applies the last-wins policy to a sequence of fields.
///
/// ```rust
/// use branchlog::{Field, Value};
/// use branchlog::field::resolve;
///
/// let fields = [Field::new("a", 1), Field::new("b", 2), Field::new("a", 3)];
/// let resolved = resolve(&fields);
/// assert_eq!(resolved, vec![("a", &Value::Int(3)), ("b", &Value::Int(2))]);
/// ```
pub fn resolve<'f, I>(fields: I) -> Vec<(&'f str, &'f Value)>
where
    I: IntoIterator<Item = &'f Field>,
{
    let mut out: Vec<(&'f str, &'f Value)> = Vec::new();
    let mut positions: HashMap<&'f str, usize> = HashMap::new();
    for field in fields {
        match positions.get(field.name()) {
            Some(&index) => out[index].1 = field.value(),
            None => {
                positions.insert(field.name(), out.len());
                out.push((field.name(), field.value()));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_without_duplicates_is_identity() {
        let fields = vec![Field::new("x", true), Field::new("y", "z")];
        let resolved = resolve(&fields);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].0, "x");
        assert_eq!(resolved[1].1, &Value::from("z"));
    }

    #[test]
    fn resolve_keeps_first_position_and_last_value() {
        let fields = vec![
            Field::new("k", "first"),
            Field::new("other", 0),
            Field::new("k", "second"),
            Field::new("k", "third"),
        ];
        let resolved = resolve(&fields);
        assert_eq!(
            resolved,
            vec![("k", &Value::from("third")), ("other", &Value::Int(0))]
        );
    }

    #[test]
    fn tuples_convert_into_fields() {
        let field: Field = ("enabled", false).into();
        assert_eq!(field.name(), "enabled");
        assert_eq!(field.value(), &Value::Bool(false));
    }
}
