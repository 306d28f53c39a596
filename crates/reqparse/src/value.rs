//! Typed field values and the scalar field handles the engine writes through.
//!
//! Every bindable field has a [`FieldKind`], fixed by its Rust type. The
//! engine reads and writes scalar fields only through the object-safe
//! [`Slot`] view, which every [`Scalar`] type implements.

use std::fmt;

/// The kind of a bindable field.
///
/// Coercion and the built-in validators dispatch on this tag rather than
/// on the concrete Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Signed integers (`i8` .. `i64`, `isize`).
    Signed,
    /// Unsigned integers (`u8` .. `u64`, `usize`).
    Unsigned,
    /// Floating point (`f32`, `f64`).
    Float,
    /// Text (`String`).
    Text,
    /// Boolean (`bool`).
    Bool,
    /// A nested record bound with its own directives.
    Nested,
}

impl FieldKind {
    /// String identifier for messages and logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signed => "int",
            Self::Unsigned => "uint",
            Self::Float => "float",
            Self::Text => "string",
            Self::Bool => "bool",
            Self::Nested => "struct",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current value of a scalar field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Value {
    /// The field kind this value belongs to.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Int(_) => FieldKind::Signed,
            Self::Uint(_) => FieldKind::Unsigned,
            Self::Float(_) => FieldKind::Float,
            Self::Text(_) => FieldKind::Text,
            Self::Bool(_) => FieldKind::Bool,
        }
    }

    /// The zero representation of a scalar kind.
    ///
    /// Returns `None` for [`FieldKind::Nested`].
    #[must_use]
    pub fn zero(kind: FieldKind) -> Option<Self> {
        match kind {
            FieldKind::Signed => Some(Self::Int(0)),
            FieldKind::Unsigned => Some(Self::Uint(0)),
            FieldKind::Float => Some(Self::Float(0.0)),
            FieldKind::Text => Some(Self::Text(String::new())),
            FieldKind::Bool => Some(Self::Bool(false)),
            FieldKind::Nested => None,
        }
    }

    /// Whether this is the zero representation of its kind.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Int(n) => *n == 0,
            Self::Uint(n) => *n == 0,
            Self::Float(n) => *n == 0.0,
            Self::Text(s) => s.is_empty(),
            Self::Bool(b) => !*b,
        }
    }

    /// Parse raw text into a value of the given kind.
    ///
    /// Integers are parsed as base-10, booleans accept the usual
    /// spellings (see [`parse_bool`]), text passes through unchanged.
    #[must_use]
    pub fn parse(kind: FieldKind, raw: &str) -> Option<Self> {
        match kind {
            FieldKind::Signed => raw.parse().ok().map(Self::Int),
            FieldKind::Unsigned => raw.parse().ok().map(Self::Uint),
            FieldKind::Float => raw.parse().ok().map(Self::Float),
            FieldKind::Text => Some(Self::Text(raw.to_owned())),
            FieldKind::Bool => parse_bool(raw).map(Self::Bool),
            FieldKind::Nested => None,
        }
    }

    /// Try to get the value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as `bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Parse a boolean the way HTTP form values usually spell one.
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

// ============================================================================
// SCALAR TYPES
// ============================================================================

/// A Rust type that can back a bindable scalar field.
///
/// The zero representation is the type's `Default`.
pub trait Scalar: Default + Sized {
    /// Kind tag of every value of this type.
    const KIND: FieldKind;

    /// Convert a value of the same kind into `Self`.
    ///
    /// Returns `None` when the kind differs or the value does not fit.
    fn from_value(value: &Value) -> Option<Self>;

    /// The current value.
    fn to_value(&self) -> Value;
}

macro_rules! signed_scalar {
    ($($ty:ty: |$n:ident| $widen:expr),+ $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: FieldKind = FieldKind::Signed;

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Int(n) => Self::try_from(*n).ok(),
                    _ => None,
                }
            }

            fn to_value(&self) -> Value {
                let $n = *self;
                Value::Int($widen)
            }
        }
    )+};
}

macro_rules! unsigned_scalar {
    ($($ty:ty: |$n:ident| $widen:expr),+ $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: FieldKind = FieldKind::Unsigned;

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Uint(n) => Self::try_from(*n).ok(),
                    _ => None,
                }
            }

            fn to_value(&self) -> Value {
                let $n = *self;
                Value::Uint($widen)
            }
        }
    )+};
}

signed_scalar!(
    i8: |n| i64::from(n),
    i16: |n| i64::from(n),
    i32: |n| i64::from(n),
    i64: |n| n,
    isize: |n| n as i64,
);
unsigned_scalar!(
    u8: |n| u64::from(n),
    u16: |n| u64::from(n),
    u32: |n| u64::from(n),
    u64: |n| n,
    usize: |n| n as u64,
);

impl Scalar for f64 {
    const KIND: FieldKind = FieldKind::Float;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Scalar for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64().map(|n| n as f32)
    }

    /// Widened through the shortest decimal form, so `0.1f32` reads back
    /// as `0.1` rather than `0.10000000149011612`.
    fn to_value(&self) -> Value {
        let widened = self.to_string().parse().unwrap_or_else(|_| f64::from(*self));
        Value::Float(widened)
    }
}

impl Scalar for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl Scalar for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

/// Object-safe handle to a scalar field.
///
/// Implemented for every [`Scalar`]; records hand these out through
/// [`FieldMut::Scalar`](crate::record::FieldMut::Scalar).
pub trait Slot {
    /// Kind of the underlying field.
    fn kind(&self) -> FieldKind;

    /// Current value of the field.
    fn value(&self) -> Value;

    /// Overwrite the field. Returns `false`, leaving the field untouched,
    /// when the value has the wrong kind or does not fit.
    fn assign(&mut self, value: &Value) -> bool;

    /// Reset the field to its zero representation.
    fn reset(&mut self);
}

impl<T: Scalar> Slot for T {
    fn kind(&self) -> FieldKind {
        T::KIND
    }

    fn value(&self) -> Value {
        self.to_value()
    }

    fn assign(&mut self, value: &Value) -> bool {
        match T::from_value(value) {
            Some(v) => {
                *self = v;
                true
            }
            None => false,
        }
    }

    fn reset(&mut self) {
        *self = T::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_matches_textual_form() {
        assert_eq!(Value::Int(-2).to_string(), "-2");
        assert_eq!(Value::Uint(7).to_string(), "7");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Text("A".into()).to_string(), "A");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn parse_per_kind() {
        assert_eq!(Value::parse(FieldKind::Signed, "-42"), Some(Value::Int(-42)));
        assert_eq!(Value::parse(FieldKind::Signed, "4x"), None);
        assert_eq!(Value::parse(FieldKind::Unsigned, "-1"), None);
        assert_eq!(Value::parse(FieldKind::Float, "1.5"), Some(Value::Float(1.5)));
        assert_eq!(
            Value::parse(FieldKind::Text, " keep "),
            Some(Value::Text(" keep ".into()))
        );
        assert_eq!(Value::parse(FieldKind::Bool, "T"), Some(Value::Bool(true)));
        assert_eq!(Value::parse(FieldKind::Bool, "yes"), None);
        assert_eq!(Value::parse(FieldKind::Nested, "x"), None);
    }

    #[test]
    fn zero_values() {
        for kind in [
            FieldKind::Signed,
            FieldKind::Unsigned,
            FieldKind::Float,
            FieldKind::Text,
            FieldKind::Bool,
        ] {
            let zero = Value::zero(kind).unwrap();
            assert_eq!(zero.kind(), kind);
            assert!(zero.is_zero());
        }
        assert_eq!(Value::zero(FieldKind::Nested), None);
        assert!(!Value::Int(1).is_zero());
        assert!(!Value::Text("x".into()).is_zero());
    }

    #[test]
    fn slot_assign_checks_kind_and_width() {
        let mut small: i8 = 5;
        assert!(!small.assign(&Value::Int(300)));
        assert_eq!(small, 5);
        assert!(small.assign(&Value::Int(-7)));
        assert_eq!(small, -7);
        assert!(!small.assign(&Value::Text("1".into())));

        let mut count: u16 = 0;
        assert!(count.assign(&Value::Uint(65535)));
        assert!(!count.assign(&Value::Uint(65536)));
        assert_eq!(Slot::kind(&count), FieldKind::Unsigned);
    }

    #[test]
    fn f32_keeps_its_shortest_decimal_form() {
        let ratio = 0.1_f32;
        assert_eq!(ratio.to_value(), Value::Float(0.1));
        assert_eq!(ratio.to_value().to_string(), "0.1");
        assert_eq!(3.25_f32.to_value().to_string(), "3.25");
        assert_eq!((-1e-3_f32).to_value(), Value::Float(-0.001));
        assert!(matches!(f32::NAN.to_value(), Value::Float(n) if n.is_nan()));
        assert_eq!(f32::INFINITY.to_value(), Value::Float(f64::INFINITY));
    }

    #[test]
    fn integers_widen_without_loss() {
        assert_eq!(i64::MIN.to_value(), Value::Int(i64::MIN));
        assert_eq!((-5_isize).to_value(), Value::Int(-5));
        assert_eq!(i8::MIN.to_value(), Value::Int(-128));
        assert_eq!(u64::MAX.to_value(), Value::Uint(u64::MAX));
        assert_eq!(usize::MAX.to_value(), Value::Uint(usize::MAX as u64));
        assert_eq!(u8::MAX.to_value(), Value::Uint(255));
    }

    #[test]
    fn slot_reset_restores_default() {
        let mut name = String::from("dd");
        name.reset();
        assert_eq!(name, "");

        let mut ratio = 0.5_f32;
        ratio.reset();
        assert_eq!(ratio, 0.0);

        let mut flag = true;
        flag.reset();
        assert!(!flag);
    }

    #[test]
    fn bool_spellings() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_bool("tRuE"), None);
    }
}
