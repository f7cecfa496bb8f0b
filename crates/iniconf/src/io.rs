//! Byte- and path-level entry points.

use crate::error::IniError;
use crate::schema::Schema;
use crate::shape::Describe;
use log::info;
use std::fs;
use std::path::Path;

/// Render `config` as canonical INI bytes.
pub fn encode<T: Describe>(config: &T) -> Result<Vec<u8>, IniError> {
    Schema::<T>::introspect()?.encode(config)
}

/// Populate `config` from INI bytes.
///
/// Unknown sections and keys are ignored. On error, fields assigned before the
/// failing line keep their new values.
pub fn decode<T: Describe>(bytes: &[u8], config: &mut T) -> Result<(), IniError> {
    Schema::<T>::introspect()?.decode(bytes, config)
}

/// Render `config` and write it to `path`, replacing any existing file.
pub fn encode_to_path<T: Describe>(
    path: impl AsRef<Path>,
    config: &T,
) -> Result<(), IniError> {
    let path = path.as_ref();
    let bytes = encode(config)?;
    info!("writing ini config to path: {}", path.display());
    fs::write(path, bytes).map_err(|source| IniError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Read `path` and populate `config` from its contents.
pub fn decode_from_path<T: Describe>(
    path: impl AsRef<Path>,
    config: &mut T,
) -> Result<(), IniError> {
    let path = path.as_ref();
    let schema = Schema::<T>::introspect()?;
    info!("loading ini config from path: {}", path.display());
    let bytes = fs::read(path).map_err(|source| IniError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    schema.decode(&bytes, config)
}

/// Load/save helpers available on every describable type.
pub trait IniConfig: Describe {
    /// Decode into a default-initialised value.
    fn load_from_bytes(bytes: &[u8]) -> Result<Self, IniError>
    where
        Self: Default,
    {
        let mut config = Self::default();
        decode(bytes, &mut config)?;
        Ok(config)
    }

    fn load_from_str(contents: &str) -> Result<Self, IniError>
    where
        Self: Default,
    {
        Self::load_from_bytes(contents.as_bytes())
    }

    fn load_from_path(path: impl AsRef<Path>) -> Result<Self, IniError>
    where
        Self: Default,
    {
        let mut config = Self::default();
        decode_from_path(path, &mut config)?;
        Ok(config)
    }

    fn to_ini_bytes(&self) -> Result<Vec<u8>, IniError> {
        encode(self)
    }

    fn to_ini_string(&self) -> Result<String, IniError> {
        Schema::<Self>::introspect()?.render(self)
    }

    fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), IniError> {
        encode_to_path(path, self)
    }
}

impl<T: Describe> IniConfig for T {}
