//! Schema introspection: turning a [`Shape`] into ordered sections and fields.

use crate::error::{CoercionError, IniError};
use crate::shape::{Accessor, Describe, Member, Shape};
use crate::value::{ScalarKind, ScalarValue};
use crate::{decoder, encoder};
use log::debug;
use std::collections::HashSet;
use std::fmt;

/// Ordered sections of a two-level configuration type `T`.
///
/// Derived from `T`'s description; holds accessors but no values.
pub struct Schema<T> {
    sections: Vec<Section<T>>,
}

/// One `[name]` block: a nested struct of the root type.
pub struct Section<T> {
    name: &'static str,
    fields: Vec<Field<T>>,
}

/// One `key=value` line: a scalar leaf of a section struct.
pub struct Field<T> {
    name: &'static str,
    accessor: Accessor<T>,
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("sections", &self.sections)
            .finish()
    }
}

impl<T> fmt::Debug for Section<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("type_name", &self.type_name())
            .finish()
    }
}

impl<T: Describe> Schema<T> {
    /// Build the schema of `T` from its [`Describe`] impl.
    pub fn introspect() -> Result<Self, IniError> {
        Self::from_shape(T::describe())
    }
}

impl<T: 'static> Schema<T> {
    /// Build a schema from an explicit description of `T`.
    ///
    /// Struct members of the root become sections and scalar root members are
    /// skipped. Inside a section, scalar members become fields, unsupported
    /// types are rejected and nested structs are not visited.
    pub fn from_shape(shape: Shape<T>) -> Result<Self, IniError> {
        let Shape::Struct(members) = shape else {
            return Err(IniError::InvalidSchemaKind {
                type_name: std::any::type_name::<T>(),
            });
        };

        let mut sections = Vec::new();
        let mut seen = HashSet::new();
        for member in members {
            let (name, shape) = member.into_parts();
            let Shape::Struct(children) = shape else {
                debug!("skipping non-struct root member `{name}`");
                continue;
            };
            validate_section_name(name)?;
            if !seen.insert(name) {
                return Err(IniError::DuplicateSection(name.to_string()));
            }
            sections.push(Section::build(name, children)?);
        }

        Ok(Self { sections })
    }
}

impl<T> Schema<T> {
    pub fn sections(&self) -> &[Section<T>] {
        &self.sections
    }

    /// Look up a section by its exact external name.
    pub fn section(&self, name: &str) -> Option<&Section<T>> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Render `config` as canonical text.
    pub fn render(&self, config: &T) -> Result<String, IniError> {
        encoder::render(self, config)
    }

    pub fn encode(&self, config: &T) -> Result<Vec<u8>, IniError> {
        self.render(config).map(String::into_bytes)
    }

    /// Populate `config` from `bytes`.
    ///
    /// On error, fields assigned before the failing line keep their new
    /// values; treat the whole object as unreliable.
    pub fn decode(&self, bytes: &[u8], config: &mut T) -> Result<(), IniError> {
        decoder::apply(self, bytes, config)
    }
}

impl<T> Section<T> {
    fn build(name: &'static str, members: Vec<Member<T>>) -> Result<Self, IniError> {
        let mut fields = Vec::with_capacity(members.len());
        let mut seen = HashSet::new();
        for member in members {
            let (key, shape) = member.into_parts();
            let accessor = match shape {
                Shape::Scalar(accessor) => accessor,
                Shape::Unsupported { type_name } => {
                    return Err(IniError::UnsupportedType {
                        section: name.to_string(),
                        key: key.to_string(),
                        type_name,
                    });
                }
                Shape::Struct(_) => {
                    debug!("skipping nested struct `{name}.{key}`");
                    continue;
                }
            };
            validate_key(key)?;
            if !seen.insert(key) {
                return Err(IniError::DuplicateKey {
                    section: name.to_string(),
                    key: key.to_string(),
                });
            }
            fields.push(Field {
                name: key,
                accessor,
            });
        }
        Ok(Self { name, fields })
    }

    /// External name, as written between the brackets.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// Look up a field by its exact external name.
    pub fn field(&self, key: &str) -> Option<&Field<T>> {
        self.fields.iter().find(|field| field.name == key)
    }
}

impl<T> Field<T> {
    /// External name, as written before the `=`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ScalarKind {
        self.accessor.kind()
    }

    pub fn type_name(&self) -> &'static str {
        self.accessor.type_name()
    }

    pub fn get(&self, config: &T) -> ScalarValue {
        self.accessor.get(config)
    }

    /// Coerce `text` to this field's kind and store it in `config`.
    pub fn assign(&self, config: &mut T, text: &str) -> Result<(), CoercionError> {
        let value = ScalarValue::parse(self.kind(), text)?;
        self.accessor.set(config, value)
    }
}

fn validate_section_name(name: &str) -> Result<(), IniError> {
    validate_common(name)?;
    if name.contains(['[', ']']) {
        return Err(invalid_name(name, "section names cannot contain brackets"));
    }
    Ok(())
}

fn validate_key(key: &str) -> Result<(), IniError> {
    validate_common(key)?;
    if key.contains('=') {
        return Err(invalid_name(key, "keys cannot contain `=`"));
    }
    if key.starts_with('[') {
        return Err(invalid_name(key, "keys cannot start with `[`"));
    }
    Ok(())
}

fn validate_common(name: &str) -> Result<(), IniError> {
    if name.is_empty() {
        return Err(invalid_name(name, "names cannot be empty"));
    }
    if name.trim() != name {
        return Err(invalid_name(name, "names cannot have surrounding whitespace"));
    }
    if name.contains(['\n', '\r']) {
        return Err(invalid_name(name, "names cannot contain line breaks"));
    }
    if name.starts_with(['#', ';']) {
        return Err(invalid_name(name, "names cannot start with a comment marker"));
    }
    Ok(())
}

fn invalid_name(name: &str, reason: &'static str) -> IniError {
    IniError::InvalidName {
        name: name.to_string(),
        reason,
    }
}
