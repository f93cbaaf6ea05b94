//! Read-only projection of a message, supplied by a schema-reflection layer.
//!
//! The hasher never sees generated types or wire bytes. Anything that can list
//! its present fields as [`FieldView`]s can be fingerprinted: the in-crate
//! [`DynamicMessage`](crate::dynamic::DynamicMessage), `prost_reflect` messages
//! (feature `prost-reflect`), or a hand-written implementation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HashError;

/// Closed set of value kinds known to the hasher.
///
/// Integer widths and wire variants are already folded into their family:
/// `int32`, `sint64` and `sfixed32` are all [`Kind::Int`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Boolean.
    Bool,
    /// Signed integer family.
    Int,
    /// Unsigned integer family.
    Uint,
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
    /// UTF-8 string.
    String,
    /// Raw bytes.
    Bytes,
    /// Enum number.
    Enum,
    /// Nested message or group.
    Message,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Enum => "enum",
            Kind::Message => "message",
        };
        f.write_str(name)
    }
}

/// How many values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Exactly one value.
    Singular,
    /// An ordered sequence of values.
    List,
    /// A set of key/value associations.
    Map,
}

/// One value, already widened to its canonical native representation.
#[derive(Clone, Copy)]
pub enum ValueRef<'a> {
    /// Boolean.
    Bool(bool),
    /// Any signed integer, widened to 64 bits.
    Int(i64),
    /// Any unsigned integer, widened to 64 bits.
    Uint(u64),
    /// Single-precision float; promoted to double when encoded.
    Float(f32),
    /// Double-precision float.
    Double(f64),
    /// UTF-8 string.
    String(&'a str),
    /// Raw bytes.
    Bytes(&'a [u8]),
    /// Enum number.
    Enum(i32),
    /// Nested message handle.
    Message(&'a dyn ReflectMessage),
}

impl ValueRef<'_> {
    /// The kind this value belongs to.
    pub fn kind(&self) -> Kind {
        match self {
            ValueRef::Bool(_) => Kind::Bool,
            ValueRef::Int(_) => Kind::Int,
            ValueRef::Uint(_) => Kind::Uint,
            ValueRef::Float(_) => Kind::Float,
            ValueRef::Double(_) => Kind::Double,
            ValueRef::String(_) => Kind::String,
            ValueRef::Bytes(_) => Kind::Bytes,
            ValueRef::Enum(_) => Kind::Enum,
            ValueRef::Message(_) => Kind::Message,
        }
    }
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueRef::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            ValueRef::Int(v) => f.debug_tuple("Int").field(v).finish(),
            ValueRef::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            ValueRef::Float(v) => f.debug_tuple("Float").field(v).finish(),
            ValueRef::Double(v) => f.debug_tuple("Double").field(v).finish(),
            ValueRef::String(v) => f.debug_tuple("String").field(v).finish(),
            ValueRef::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            ValueRef::Enum(v) => f.debug_tuple("Enum").field(v).finish(),
            ValueRef::Message(_) => f.write_str("Message(..)"),
        }
    }
}

/// Contents of one present field.
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    /// A single value.
    Singular(ValueRef<'a>),
    /// Elements in declaration order.
    List(Vec<ValueRef<'a>>),
    /// Entries in unspecified order; keys are unique.
    Map {
        /// Kind shared by every key.
        key_kind: Kind,
        /// Key/value pairs.
        entries: Vec<(ValueRef<'a>, ValueRef<'a>)>,
    },
}

impl FieldValue<'_> {
    /// The cardinality of this field.
    pub fn cardinality(&self) -> Cardinality {
        match self {
            FieldValue::Singular(_) => Cardinality::Singular,
            FieldValue::List(_) => Cardinality::List,
            FieldValue::Map { .. } => Cardinality::Map,
        }
    }
}

/// Projection of one present field.
#[derive(Debug, Clone)]
pub struct FieldView<'a> {
    /// Field number; for a oneof member, the member's own number.
    pub number: u32,
    /// Declared kind of the value (of the elements for lists, of the values for maps).
    pub kind: Kind,
    /// The field's contents.
    pub value: FieldValue<'a>,
}

impl<'a> FieldView<'a> {
    /// A singular field whose kind is taken from the value.
    pub fn singular(number: u32, value: ValueRef<'a>) -> Self {
        Self {
            number,
            kind: value.kind(),
            value: FieldValue::Singular(value),
        }
    }

    /// A repeated field of `kind` elements.
    pub fn list(number: u32, kind: Kind, items: Vec<ValueRef<'a>>) -> Self {
        Self {
            number,
            kind,
            value: FieldValue::List(items),
        }
    }

    /// A map field from `key_kind` to `value_kind`.
    pub fn map(
        number: u32,
        key_kind: Kind,
        value_kind: Kind,
        entries: Vec<(ValueRef<'a>, ValueRef<'a>)>,
    ) -> Self {
        Self {
            number,
            kind: value_kind,
            value: FieldValue::Map { key_kind, entries },
        }
    }
}

/// A message that can describe its present fields.
pub trait ReflectMessage {
    /// Returns `false` when the handle is corrupt or only partially built.
    fn is_valid(&self) -> bool {
        true
    }

    /// Present fields in ascending field-number order.
    ///
    /// Unset fields, implicit-presence scalars holding their default, and empty
    /// lists or maps must be left out. Paths in returned errors are relative
    /// to this message; the hasher prefixes the location of the message itself.
    fn present_fields(&self) -> Result<Vec<FieldView<'_>>, HashError>;
}

impl<T: ReflectMessage + ?Sized> ReflectMessage for &T {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn present_fields(&self) -> Result<Vec<FieldView<'_>>, HashError> {
        (**self).present_fields()
    }
}

impl<T: ReflectMessage + ?Sized> ReflectMessage for Box<T> {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn present_fields(&self) -> Result<Vec<FieldView<'_>>, HashError> {
        (**self).present_fields()
    }
}
