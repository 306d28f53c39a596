//! Records: the caller-owned structures a parser binds into.
//!
//! A [`Record`] exposes its fields by index, in declaration order, together
//! with static [`FieldDescriptor`] metadata. `#[derive(Record)]` generates
//! the implementation; hand-written implementations look like this:
//!
//! ```rust,ignore
//! use reqparse::{FieldDescriptor, FieldMut, Record};
//!
//! struct Student {
//!     name: String,
//!     number: i64,
//! }
//!
//! impl Record for Student {
//!     fn fields(&self) -> &'static [FieldDescriptor] {
//!         const FIELDS: &[FieldDescriptor] = &[
//!             FieldDescriptor::new("name", "username; Required"),
//!             FieldDescriptor::new("number", ";Required"),
//!         ];
//!         FIELDS
//!     }
//!
//!     fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
//!         match index {
//!             0 => Some(FieldMut::Scalar(&mut self.name)),
//!             1 => Some(FieldMut::Scalar(&mut self.number)),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use crate::error::HookError;
use crate::value::{Slot, Value};

/// Static metadata of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name, used to derive the key when the tag leaves it empty.
    pub name: &'static str,
    /// Raw directive tag.
    pub tag: &'static str,
    /// Whether the parser may write the field.
    pub settable: bool,
}

impl FieldDescriptor {
    /// A settable field.
    #[must_use]
    pub const fn new(name: &'static str, tag: &'static str) -> Self {
        Self {
            name,
            tag,
            settable: true,
        }
    }

    /// Mark the field as not settable; the parser skips it entirely.
    #[must_use]
    pub const fn skipped(mut self) -> Self {
        self.settable = false;
        self
    }
}

/// Mutable handle to one field of a record.
pub enum FieldMut<'a> {
    /// A scalar field, coerced and validated through its tag.
    Scalar(&'a mut dyn Slot),
    /// A nested record, bound with its own field tags.
    Nested(&'a mut dyn Record),
}

impl std::fmt::Debug for FieldMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(slot) => f.debug_tuple("Scalar").field(&slot.value()).finish(),
            Self::Nested(_) => f.debug_tuple("Nested").field(&"<record>").finish(),
        }
    }
}

/// A structure a parser can populate.
///
/// The trait is object safe: parsers walk nested records as
/// `&mut dyn Record`.
pub trait Record {
    /// Metadata for every field, in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Handle to the field at `index`.
    ///
    /// Returns `None` for indices out of range and for fields that are not
    /// settable.
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;

    /// Run the custom validation hook named `hook_name` against the field's
    /// freshly bound `value`.
    ///
    /// `hook_name` follows [`hook_name`](crate::hooks::hook_name)
    /// (`"Validate" + TitleCase(key)`). Returns `None` when the record has no
    /// such hook, or has one whose value type does not match the field.
    fn custom_hook(&self, hook_name: &str, value: &Value) -> Option<Result<(), HookError>> {
        let _ = (hook_name, value);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldKind;
    use pretty_assertions::assert_eq;

    struct Point {
        x: i32,
        label: String,
        cache: Vec<u8>,
    }

    impl Record for Point {
        fn fields(&self) -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor::new("x", ";Required"),
                FieldDescriptor::new("label", ""),
                FieldDescriptor::new("cache", "").skipped(),
            ];
            FIELDS
        }

        fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
            match index {
                0 => Some(FieldMut::Scalar(&mut self.x)),
                1 => Some(FieldMut::Scalar(&mut self.label)),
                _ => None,
            }
        }
    }

    #[test]
    fn descriptors() {
        let point = Point {
            x: 1,
            label: String::new(),
            cache: Vec::new(),
        };
        let fields = point.fields();
        assert_eq!(fields.len(), 3);
        assert!(fields[0].settable);
        assert!(!fields[2].settable);
        assert_eq!(fields[2].name, "cache");
        assert!(point.cache.is_empty());
    }

    #[test]
    fn field_handles_write_through() {
        let mut point = Point {
            x: 1,
            label: String::new(),
            cache: vec![1],
        };

        match point.field_mut(0) {
            Some(FieldMut::Scalar(slot)) => {
                assert_eq!(slot.kind(), FieldKind::Signed);
                assert!(slot.assign(&Value::Int(9)));
            }
            other => panic!("expected scalar, got {other:?}"),
        }
        assert_eq!(point.x, 9);
        assert!(point.field_mut(2).is_none());
        assert!(point.field_mut(7).is_none());
    }

    #[test]
    fn default_hook_is_absent() {
        let point = Point {
            x: 0,
            label: String::new(),
            cache: Vec::new(),
        };
        assert!(point.custom_hook("ValidateX", &Value::Int(0)).is_none());
    }
}
