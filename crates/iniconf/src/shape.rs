//! Type descriptions consumed by the schema introspector.
//!
//! A [`Describe`] impl states, for one Rust type, whether it is a struct (and
//! which members it has, in declaration order), a supported scalar, or
//! something the text format cannot carry. Struct descriptions are built from
//! their members' descriptions by projecting each one through a pair of field
//! lenses, so every leaf ends up with an [`Accessor`] bound to the root type.
//! `#[derive(Ini)]` writes these impls; they can also be written by hand:
//!
//! ```
//! use iniconf::{Describe, Member, Shape};
//!
//! #[derive(Default)]
//! struct Server {
//!     port: u16,
//! }
//!
//! impl Describe for Server {
//!     fn describe() -> Shape<Self> {
//!         fn port(this: &Server) -> &u16 {
//!             &this.port
//!         }
//!         fn port_mut(this: &mut Server) -> &mut u16 {
//!             &mut this.port
//!         }
//!         Shape::Struct(vec![Member::of("port", port, port_mut).tag("listen_port")])
//!     }
//! }
//! ```

use crate::error::CoercionError;
use crate::value::{Scalar, ScalarKind, ScalarValue};
use std::fmt;

/// Implemented by every type that can appear in a configuration tree.
pub trait Describe: Sized + 'static {
    fn describe() -> Shape<Self>;
}

/// Description of a type `T`, with leaf accessors bound to `T`.
pub enum Shape<T> {
    /// A struct and its members in declaration order.
    Struct(Vec<Member<T>>),
    /// One of the supported scalar kinds.
    Scalar(Accessor<T>),
    /// A type the text format has no representation for.
    Unsupported { type_name: &'static str },
}

impl<T: 'static> Shape<T> {
    /// Rebind this description to a parent type `R` that holds a `T`.
    pub fn project<R: 'static>(
        self,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
    ) -> Shape<R> {
        match self {
            Self::Struct(members) => Shape::Struct(
                members
                    .into_iter()
                    .map(|member| member.project(get, get_mut))
                    .collect(),
            ),
            Self::Scalar(accessor) => Shape::Scalar(accessor.project(get, get_mut)),
            Self::Unsupported { type_name } => Shape::Unsupported { type_name },
        }
    }
}

impl<T> fmt::Debug for Shape<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct(members) => f.debug_tuple("Struct").field(members).finish(),
            Self::Scalar(accessor) => f.debug_tuple("Scalar").field(accessor).finish(),
            Self::Unsupported { type_name } => f
                .debug_struct("Unsupported")
                .field("type_name", type_name)
                .finish(),
        }
    }
}

/// One member of a struct description.
pub struct Member<T> {
    name: &'static str,
    tag: Option<&'static str>,
    shape: Shape<T>,
}

impl<T: 'static> Member<T> {
    pub fn new(name: &'static str, shape: Shape<T>) -> Self {
        Self {
            name,
            tag: None,
            shape,
        }
    }

    /// Describe the member reached through `get`/`get_mut` by projecting the
    /// member type's own description.
    pub fn of<V: Describe>(
        name: &'static str,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        Self::new(name, V::describe().project(get, get_mut))
    }

    /// Override the name used in text form.
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    fn project<R: 'static>(
        self,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
    ) -> Member<R> {
        Member {
            name: self.name,
            tag: self.tag,
            shape: self.shape.project(get, get_mut),
        }
    }
}

impl<T> Member<T> {
    /// Declared member name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tag_value(&self) -> Option<&'static str> {
        self.tag
    }

    /// The tag when present and non-empty, otherwise the declared name.
    pub fn external_name(&self) -> &'static str {
        match self.tag {
            Some(tag) if !tag.is_empty() => tag,
            _ => self.name,
        }
    }

    pub fn shape(&self) -> &Shape<T> {
        &self.shape
    }

    pub(crate) fn into_parts(self) -> (&'static str, Shape<T>) {
        (self.external_name(), self.shape)
    }
}

impl<T> fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("shape", &self.shape)
            .finish()
    }
}

type Getter<T> = Box<dyn Fn(&T) -> ScalarValue + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, ScalarValue) -> Result<(), CoercionError> + Send + Sync>;

/// Getter/setter pair for one leaf, bound to the root type `T`.
pub struct Accessor<T> {
    kind: ScalarKind,
    type_name: &'static str,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T: 'static> Accessor<T> {
    pub fn new<V: Scalar>(get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> Self {
        Self {
            kind: V::KIND,
            type_name: std::any::type_name::<V>(),
            get: Box::new(move |this: &T| get(this).to_value()),
            set: Box::new(
                move |this: &mut T, value: ScalarValue| -> Result<(), CoercionError> {
                    *get_mut(this) = V::from_value(value)?;
                    Ok(())
                },
            ),
        }
    }

    fn project<R: 'static>(
        self,
        outer: fn(&R) -> &T,
        outer_mut: fn(&mut R) -> &mut T,
    ) -> Accessor<R> {
        let Accessor {
            kind,
            type_name,
            get,
            set,
        } = self;
        Accessor {
            kind,
            type_name,
            get: Box::new(move |this: &R| get(outer(this))),
            set: Box::new(move |this: &mut R, value: ScalarValue| {
                set(outer_mut(this), value)
            }),
        }
    }
}

impl<T> Accessor<T> {
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Rust type of the leaf, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn get(&self, target: &T) -> ScalarValue {
        (self.get)(target)
    }

    pub fn set(&self, target: &mut T, value: ScalarValue) -> Result<(), CoercionError> {
        (self.set)(target, value)
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

fn itself<V>(value: &V) -> &V {
    value
}

fn itself_mut<V>(value: &mut V) -> &mut V {
    value
}

macro_rules! describe_scalar {
    ($($ty:ty),+) => {
        $(
            impl Describe for $ty {
                fn describe() -> Shape<Self> {
                    Shape::Scalar(Accessor::new(itself::<$ty>, itself_mut::<$ty>))
                }
            }
        )+
    };
}

describe_scalar!(String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

macro_rules! describe_unsupported {
    ($($ty:ty),+) => {
        $(
            impl Describe for $ty {
                fn describe() -> Shape<Self> {
                    Shape::Unsupported { type_name: std::any::type_name::<Self>() }
                }
            }
        )+
    };
}

describe_unsupported!(bool, char, i128, u128);

impl<V: 'static> Describe for Option<V> {
    fn describe() -> Shape<Self> {
        Shape::Unsupported {
            type_name: std::any::type_name::<Self>(),
        }
    }
}

impl<V: 'static> Describe for Vec<V> {
    fn describe() -> Shape<Self> {
        Shape::Unsupported {
            type_name: std::any::type_name::<Self>(),
        }
    }
}
