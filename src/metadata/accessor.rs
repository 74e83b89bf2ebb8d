//! Accessor surface of a settings type

use crate::convert::Value;
use crate::error::Result;
use std::fmt;

/// Read accessor: returns the current value, `None` when null
pub type ReadFn<T> = fn(&T) -> Option<Value>;

/// Write accessor: stores a parsed value into the instance
pub type WriteFn<T> = fn(&mut T, Value) -> Result<()>;

/// A type whose accessors can be bound to a properties file.
///
/// The zero-argument initializer is `Default`. Implement `accessors` by hand
/// or with `#[derive(Settings)]`, which emits `get_`/`is_` and `set_`
/// accessors for every named field.
///
/// # Example
///
/// ```
/// use propman::{Accessor, Scalar, Settings, Value};
///
/// #[derive(Default)]
/// struct Window {
///     width: u32,
/// }
///
/// impl Settings for Window {
///     fn accessors() -> Vec<Accessor<Self>> {
///         vec![
///             Accessor::read("getWidth", "u32", |w: &Window| Some(Value::U32(w.width))),
///             Accessor::write("setWidth", "u32", |w: &mut Window, v| {
///                 w.width = u32::from_value(v)?;
///                 Ok(())
///             }),
///         ]
///     }
/// }
/// ```
pub trait Settings: Default + 'static {
    /// Every accessor the type exposes, in declaration order
    fn accessors() -> Vec<Accessor<Self>>;
}

/// Read or write half of an accessor
pub enum AccessorKind<T> {
    Read(ReadFn<T>),
    Write(WriteFn<T>),
}

impl<T> Clone for AccessorKind<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AccessorKind<T> {}

/// One named accessor method
pub struct Accessor<T> {
    name: &'static str,
    value_type: &'static str,
    kind: AccessorKind<T>,
}

impl<T> Accessor<T> {
    /// A read accessor returning values of `value_type`
    pub fn read(name: &'static str, value_type: &'static str, read: ReadFn<T>) -> Self {
        Self {
            name,
            value_type,
            kind: AccessorKind::Read(read),
        }
    }

    /// A write accessor taking values of `value_type`
    pub fn write(name: &'static str, value_type: &'static str, write: WriteFn<T>) -> Self {
        Self {
            name,
            value_type,
            kind: AccessorKind::Write(write),
        }
    }

    /// Method name, e.g. `get_port` or `isEnabled`
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type name of the value read or written
    #[must_use]
    pub fn value_type(&self) -> &'static str {
        self.value_type
    }

    #[must_use]
    pub fn kind(&self) -> AccessorKind<T> {
        self.kind
    }

    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(self.kind, AccessorKind::Read(_))
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Accessor<T> {}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("read", &self.is_read())
            .finish()
    }
}
