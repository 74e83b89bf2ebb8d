//! Scalar conversion registry
//!
//! Every bindable property has one of a fixed set of scalar types. Each type
//! maps to a [`Converter`]: a parse function turning stored text into a
//! [`Value`] and a format function turning it back into text. Formatting is
//! the value's canonical `Display` output for every type.

use crate::error::{Error, Result};
use std::fmt;

/// Scalar types that can be stored in a properties file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Text,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
}

impl ScalarType {
    /// All supported scalar types
    pub const ALL: [ScalarType; 13] = [
        ScalarType::Text,
        ScalarType::Bool,
        ScalarType::I8,
        ScalarType::I16,
        ScalarType::I32,
        ScalarType::I64,
        ScalarType::U8,
        ScalarType::U16,
        ScalarType::U32,
        ScalarType::U64,
        ScalarType::F32,
        ScalarType::F64,
        ScalarType::Char,
    ];

    /// Resolve a Rust type name (as written in source or as reported by
    /// `std::any::type_name`) to a scalar type.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        let scalar = match name.trim() {
            "String" | "str" | "alloc::string::String" | "std::string::String" => {
                ScalarType::Text
            }
            "bool" => ScalarType::Bool,
            "i8" => ScalarType::I8,
            "i16" => ScalarType::I16,
            "i32" => ScalarType::I32,
            "i64" => ScalarType::I64,
            "u8" => ScalarType::U8,
            "u16" => ScalarType::U16,
            "u32" => ScalarType::U32,
            "u64" => ScalarType::U64,
            "f32" => ScalarType::F32,
            "f64" => ScalarType::F64,
            "char" => ScalarType::Char,
            _ => return None,
        };
        Some(scalar)
    }

    /// Canonical Rust type name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Text => "String",
            ScalarType::Bool => "bool",
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
            ScalarType::Char => "char",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed scalar value moving between a settings instance and its store
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
}

impl Value {
    /// The scalar type of this value
    #[must_use]
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Value::Text(_) => ScalarType::Text,
            Value::Bool(_) => ScalarType::Bool,
            Value::I8(_) => ScalarType::I8,
            Value::I16(_) => ScalarType::I16,
            Value::I32(_) => ScalarType::I32,
            Value::I64(_) => ScalarType::I64,
            Value::U8(_) => ScalarType::U8,
            Value::U16(_) => ScalarType::U16,
            Value::U32(_) => ScalarType::U32,
            Value::U64(_) => ScalarType::U64,
            Value::F32(_) => ScalarType::F32,
            Value::F64(_) => ScalarType::F64,
            Value::Char(_) => ScalarType::Char,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(v) => f.write_str(v),
            Value::Bool(v) => v.fmt(f),
            Value::I8(v) => v.fmt(f),
            Value::I16(v) => v.fmt(f),
            Value::I32(v) => v.fmt(f),
            Value::I64(v) => v.fmt(f),
            Value::U8(v) => v.fmt(f),
            Value::U16(v) => v.fmt(f),
            Value::U32(v) => v.fmt(f),
            Value::U64(v) => v.fmt(f),
            Value::F32(v) => v.fmt(f),
            Value::F64(v) => v.fmt(f),
            Value::Char(v) => v.fmt(f),
        }
    }
}

// =============================================================================
// Converters
// =============================================================================

type ParseFn = fn(&str) -> Result<Value>;
type FormatFn = fn(&Value) -> String;

/// Parse/format function pair for one scalar type
#[derive(Clone, Copy)]
pub struct Converter {
    scalar_type: ScalarType,
    parse: ParseFn,
    format: FormatFn,
}

impl Converter {
    /// Look up the converter for a Rust type name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] if no converter is registered for
    /// the type.
    pub fn lookup(type_name: &str) -> Result<Self> {
        ScalarType::from_type_name(type_name)
            .map(Self::for_type)
            .ok_or_else(|| Error::UnsupportedType(type_name.to_string()))
    }

    /// The converter for a scalar type
    #[must_use]
    pub fn for_type(scalar_type: ScalarType) -> Self {
        let parse: ParseFn = match scalar_type {
            ScalarType::Text => parse_text,
            ScalarType::Bool => parse_bool,
            ScalarType::I8 => parse_i8,
            ScalarType::I16 => parse_i16,
            ScalarType::I32 => parse_i32,
            ScalarType::I64 => parse_i64,
            ScalarType::U8 => parse_u8,
            ScalarType::U16 => parse_u16,
            ScalarType::U32 => parse_u32,
            ScalarType::U64 => parse_u64,
            ScalarType::F32 => parse_f32,
            ScalarType::F64 => parse_f64,
            ScalarType::Char => parse_char,
        };

        Self {
            scalar_type,
            parse,
            format: Value::to_string,
        }
    }

    /// Scalar type handled by this converter
    #[must_use]
    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    /// Parse stored text into a typed value
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if the text is not in the type's
    /// lexical grammar.
    pub fn parse(&self, text: &str) -> Result<Value> {
        (self.parse)(text)
    }

    /// Format a value as stored text
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        (self.format)(value)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("scalar_type", &self.scalar_type)
            .finish_non_exhaustive()
    }
}

fn invalid(type_name: &str, value: &str, reason: impl fmt::Display) -> Error {
    Error::InvalidValue {
        type_name: type_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[allow(clippy::unnecessary_wraps)]
fn parse_text(text: &str) -> Result<Value> {
    Ok(Value::Text(text.to_string()))
}

fn parse_bool(text: &str) -> Result<Value> {
    if text.eq_ignore_ascii_case("true") {
        Ok(Value::Bool(true))
    } else if text.eq_ignore_ascii_case("false") {
        Ok(Value::Bool(false))
    } else {
        Err(invalid("bool", text, "expected 'true' or 'false'"))
    }
}

fn parse_char(text: &str) -> Result<Value> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Value::Char(c)),
        (None, _) => Err(invalid("char", text, "empty text")),
        (Some(_), Some(_)) => Err(invalid("char", text, "more than one character")),
    }
}

macro_rules! numeric_parsers {
    ($($fn_name:ident => $ty:ty, $variant:ident;)*) => {
        $(
            fn $fn_name(text: &str) -> Result<Value> {
                text.parse::<$ty>()
                    .map(Value::$variant)
                    .map_err(|e| invalid(stringify!($ty), text, e))
            }
        )*
    };
}

numeric_parsers! {
    parse_i8 => i8, I8;
    parse_i16 => i16, I16;
    parse_i32 => i32, I32;
    parse_i64 => i64, I64;
    parse_u8 => u8, U8;
    parse_u16 => u16, U16;
    parse_u32 => u32, U32;
    parse_u64 => u64, U64;
    parse_f32 => f32, F32;
    parse_f64 => f64, F64;
}

// =============================================================================
// Typed access
// =============================================================================

/// Rust types with a registered converter
pub trait Scalar: Sized {
    /// Scalar type of `Self`
    const TYPE: ScalarType;

    /// Wrap into a [`Value`]
    fn into_value(self) -> Value;

    /// Unwrap from a [`Value`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value holds another type.
    fn from_value(value: Value) -> Result<Self>;
}

/// Field types a settings struct can bind: every [`Scalar`] and its
/// `Option`, where `None` is a null value.
pub trait Bindable: Sized {
    /// Declared type name used for converter lookup
    fn value_type() -> &'static str;

    /// Current value, `None` when null
    fn read_value(&self) -> Option<Value>;

    /// Build a field value from a parsed value
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value holds another type.
    fn write_value(value: Value) -> Result<Self>;
}

macro_rules! scalars {
    ($($ty:ty => $variant:ident;)*) => {
        $(
            impl Scalar for $ty {
                const TYPE: ScalarType = ScalarType::$variant;

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(Error::TypeMismatch {
                            expected: Self::TYPE.name().to_string(),
                            actual: other.scalar_type().name().to_string(),
                        }),
                    }
                }
            }

            impl Bindable for $ty {
                fn value_type() -> &'static str {
                    <$ty as Scalar>::TYPE.name()
                }

                fn read_value(&self) -> Option<Value> {
                    Some(self.clone().into_value())
                }

                fn write_value(value: Value) -> Result<Self> {
                    <$ty as Scalar>::from_value(value)
                }
            }

            impl Bindable for Option<$ty> {
                fn value_type() -> &'static str {
                    <$ty as Scalar>::TYPE.name()
                }

                fn read_value(&self) -> Option<Value> {
                    self.clone().map(Scalar::into_value)
                }

                fn write_value(value: Value) -> Result<Self> {
                    <$ty as Scalar>::from_value(value).map(Some)
                }
            }
        )*
    };
}

scalars! {
    String => Text;
    bool => Bool;
    i8 => I8;
    i16 => I16;
    i32 => I32;
    i64 => I64;
    u8 => U8;
    u16 => U16;
    u32 => U32;
    u64 => U64;
    f32 => F32;
    f64 => F64;
    char => Char;
}
