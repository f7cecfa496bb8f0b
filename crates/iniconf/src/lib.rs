//! Schema-driven INI marshaling.
//!
//! A configuration type is a struct whose struct members are sections and
//! whose sections hold scalar fields. The type describes itself once through
//! [`Describe`] (usually via `#[derive(Ini)]`); [`encode`] renders a value as
//! canonical `[section]` / `key=value` text and [`decode`] writes matching
//! lines back into a value in place.
//!
//! ```
//! use iniconf::{Ini, IniConfig};
//!
//! #[derive(Debug, Default, Ini)]
//! struct Config {
//!     server: Server,
//! }
//!
//! #[derive(Debug, Default, Ini)]
//! struct Server {
//!     ip: String,
//!     port: u16,
//! }
//!
//! let config = Config::load_from_str("[server]\nip=127.0.0.1\nport=8080\n").unwrap();
//! assert_eq!(config.server.port, 8080);
//! assert_eq!(config.to_ini_string().unwrap(), "[server]\nip=127.0.0.1\nport=8080\n");
//! ```

mod decoder;
mod encoder;
mod error;
mod io;
mod lexer;
mod schema;
mod shape;
mod value;

/// Error types returned by introspection, encoding and decoding.
pub use error::{CoercionError, IniError};
/// Byte and path entry points plus the load/save extension trait.
pub use io::{IniConfig, decode, decode_from_path, encode, encode_to_path};
/// Derived schema types.
pub use schema::{Field, Schema, Section};
/// Type description building blocks.
pub use shape::{Accessor, Describe, Member, Shape};
/// Scalar kinds and values.
pub use value::{Scalar, ScalarKind, ScalarValue};

#[cfg(feature = "derive")]
pub use iniconf_derive::Ini;
