//! A single bindable property

use super::accessor::{ReadFn, WriteFn};
use crate::convert::Converter;
use crate::error::{Error, Result};
use std::fmt;

/// One bindable scalar field with paired accessors and its converter
pub struct Property<T> {
    name: String,
    read_name: &'static str,
    write_name: &'static str,
    read: ReadFn<T>,
    write: WriteFn<T>,
    converter: Converter,
}

impl<T> Property<T> {
    pub(crate) fn new(
        name: String,
        read_name: &'static str,
        read: ReadFn<T>,
        write_name: &'static str,
        write: WriteFn<T>,
        converter: Converter,
    ) -> Self {
        Self {
            name,
            read_name,
            write_name,
            read,
            write,
            converter,
        }
    }

    /// Property name, the key used in the backing store
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the read accessor method
    #[must_use]
    pub fn read_accessor(&self) -> &'static str {
        self.read_name
    }

    /// Name of the write accessor method
    #[must_use]
    pub fn write_accessor(&self) -> &'static str {
        self.write_name
    }

    #[must_use]
    pub fn converter(&self) -> Converter {
        self.converter
    }

    /// Parse `text` and apply it through the write accessor.
    ///
    /// # Errors
    ///
    /// - [`Error::NullValue`] if `text` is `null` in any case
    /// - [`Error::InvalidValue`] if `text` does not parse as the property type
    pub fn write(&self, instance: &mut T, text: &str) -> Result<()> {
        if text.eq_ignore_ascii_case("null") {
            return Err(Error::NullValue(self.name.clone()));
        }

        let value = self.converter.parse(text)?;
        (self.write)(instance, value)
    }

    /// Read the current value through the read accessor and format it.
    ///
    /// # Errors
    ///
    /// - [`Error::NullValue`] if the accessor reports no value
    /// - [`Error::TypeMismatch`] if the accessor returns another scalar type
    ///   than the property's converter handles
    pub fn read(&self, instance: &T) -> Result<String> {
        let value = (self.read)(instance).ok_or_else(|| Error::NullValue(self.name.clone()))?;
        if value.scalar_type() != self.converter.scalar_type() {
            return Err(Error::TypeMismatch {
                expected: self.converter.scalar_type().name().to_string(),
                actual: value.scalar_type().name().to_string(),
            });
        }
        Ok(self.converter.format(&value))
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("read", &self.read_name)
            .field("write", &self.write_name)
            .field("converter", &self.converter)
            .finish()
    }
}
