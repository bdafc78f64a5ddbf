// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared typed setters for the types that accumulate fields.

/// Implements the typed field setters on a type with `push_field(&mut self, Field)`
/// and `accepts_fields(&self) -> bool` methods.  Every setter consumes and returns
/// `self`, so calls chain.  `serialized` does no conversion when `accepts_fields`
/// is false.
macro_rules! field_setters {
    ($ty:ty) => {
        impl $ty {
            /// Adds a string field.
            pub fn str(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
                let value: String = value.into();
                self.push_field($crate::Field::new(name, value));
                self
            }

            /// Adds a signed integer field.
            pub fn int(mut self, name: impl Into<String>, value: i64) -> Self {
                self.push_field($crate::Field::new(name, value));
                self
            }

            /// Adds an unsigned integer field.
            pub fn uint(mut self, name: impl Into<String>, value: u64) -> Self {
                self.push_field($crate::Field::new(name, value));
                self
            }

            /// Adds a boolean field.
            pub fn bool(mut self, name: impl Into<String>, value: bool) -> Self {
                self.push_field($crate::Field::new(name, value));
                self
            }

            /// Adds a field whose value is absent, encoded as `null`.
            pub fn null(mut self, name: impl Into<String>) -> Self {
                self.push_field($crate::Field::new(name, $crate::Value::Null));
                self
            }

            /// Adds a nested record.
            pub fn record(mut self, name: impl Into<String>, fields: Vec<$crate::Field>) -> Self {
                self.push_field($crate::Field::new(name, $crate::Value::Record(fields)));
                self
            }

            /// Adds an optional value: `None` is written as `null`.
            pub fn optional<T: Into<$crate::Value>>(
                mut self,
                name: impl Into<String>,
                value: Option<T>,
            ) -> Self {
                self.push_field($crate::Field::new(name, value));
                self
            }

            /// Adds a field of any supported value type.
            pub fn field(mut self, name: impl Into<String>, value: impl Into<$crate::Value>) -> Self {
                self.push_field($crate::Field::new(name, value));
                self
            }

            /// Adds every field from `fields`, in order.
            pub fn fields<I, F>(mut self, fields: I) -> Self
            where
                I: IntoIterator<Item = F>,
                F: Into<$crate::Field>,
            {
                for field in fields {
                    self.push_field(field.into());
                }
                self
            }

            /// Adds any serializable value.
            ///
            /// Fails with [`Error::UnsupportedValueKind`](crate::Error::UnsupportedValueKind)
            /// if the value is a float, a sequence, or otherwise outside the supported kinds.
            pub fn serialized<T: serde::Serialize + ?Sized>(
                mut self,
                name: impl Into<String>,
                value: &T,
            ) -> $crate::Result<Self> {
                if !self.accepts_fields() {
                    return Ok(self);
                }
                let name: String = name.into();
                let value = $crate::Value::from_serialize(&name, value)?;
                self.push_field($crate::Field::new(name, value));
                Ok(self)
            }
        }
    };
}

pub(crate) use field_setters;
