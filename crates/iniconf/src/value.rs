//! Scalar kinds, the tagged value they travel as, and text coercion.

use crate::error::CoercionError;
use std::fmt;

/// Semantic type of a leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    SignedInt,
    UnsignedInt,
    Float,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::SignedInt => "signed integer",
            Self::UnsignedInt => "unsigned integer",
            Self::Float => "float",
        };
        f.write_str(name)
    }
}

/// A leaf value in its widest representation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    String(String),
    SignedInt(i64),
    UnsignedInt(u64),
    Float(f64),
}

impl ScalarValue {
    /// Coerce already-trimmed text into a value of `kind`.
    pub fn parse(kind: ScalarKind, text: &str) -> Result<Self, CoercionError> {
        let value = match kind {
            ScalarKind::String => Self::String(text.to_string()),
            ScalarKind::SignedInt => Self::SignedInt(text.parse()?),
            ScalarKind::UnsignedInt => Self::UnsignedInt(text.parse()?),
            ScalarKind::Float => Self::Float(text.parse()?),
        };
        Ok(value)
    }

    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::String(_) => ScalarKind::String,
            Self::SignedInt(_) => ScalarKind::SignedInt,
            Self::UnsignedInt(_) => ScalarKind::UnsignedInt,
            Self::Float(_) => ScalarKind::Float,
        }
    }

    fn mismatch(&self, expected: ScalarKind) -> CoercionError {
        CoercionError::KindMismatch {
            expected,
            found: self.kind(),
        }
    }
}

/// Canonical text form: plain decimal for numbers, the raw text for strings.
impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::SignedInt(value) => write!(f, "{value}"),
            Self::UnsignedInt(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

/// A Rust type that can sit in a leaf field.
///
/// Implemented for `String`, the primitive integers up to 64 bits and both
/// float widths. Newtypes can implement it to appear as fields directly.
pub trait Scalar: Sized + 'static {
    const KIND: ScalarKind;

    fn to_value(&self) -> ScalarValue;

    /// Convert from the widest representation, failing when the value does not
    /// fit `Self`.
    fn from_value(value: ScalarValue) -> Result<Self, CoercionError>;
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn to_value(&self) -> ScalarValue {
        ScalarValue::String(self.clone())
    }

    fn from_value(value: ScalarValue) -> Result<Self, CoercionError> {
        match value {
            ScalarValue::String(value) => Ok(value),
            other => Err(other.mismatch(Self::KIND)),
        }
    }
}

macro_rules! integer_scalar {
    ($variant:ident, $wide:ty, $($ty:ty),+) => {
        $(
            impl Scalar for $ty {
                const KIND: ScalarKind = ScalarKind::$variant;

                fn to_value(&self) -> ScalarValue {
                    ScalarValue::$variant(<$wide>::try_from(*self).unwrap_or(<$wide>::MAX))
                }

                fn from_value(value: ScalarValue) -> Result<Self, CoercionError> {
                    match value {
                        ScalarValue::$variant(wide) => {
                            <$ty>::try_from(wide).map_err(|_| CoercionError::OutOfRange {
                                value: wide.to_string(),
                                target: stringify!($ty),
                            })
                        }
                        other => Err(other.mismatch(Self::KIND)),
                    }
                }
            }
        )+
    };
}

integer_scalar!(SignedInt, i64, i8, i16, i32, i64, isize);
integer_scalar!(UnsignedInt, u64, u8, u16, u32, u64, usize);

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn to_value(&self) -> ScalarValue {
        ScalarValue::Float(*self)
    }

    fn from_value(value: ScalarValue) -> Result<Self, CoercionError> {
        match value {
            ScalarValue::Float(value) => Ok(value),
            other => Err(other.mismatch(Self::KIND)),
        }
    }
}

impl Scalar for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    // Widen through the shortest f32 text so 0.1f32 renders as 0.1 rather than
    // 0.10000000149011612.
    fn to_value(&self) -> ScalarValue {
        let widened = self
            .to_string()
            .parse::<f64>()
            .unwrap_or_else(|_| f64::from(*self));
        ScalarValue::Float(widened)
    }

    fn from_value(value: ScalarValue) -> Result<Self, CoercionError> {
        match value {
            ScalarValue::Float(value) => {
                let narrowed = value as f32;
                if narrowed.is_infinite() && value.is_finite() {
                    return Err(CoercionError::OutOfRange {
                        value: value.to_string(),
                        target: "f32",
                    });
                }
                Ok(narrowed)
            }
            other => Err(other.mismatch(Self::KIND)),
        }
    }
}
