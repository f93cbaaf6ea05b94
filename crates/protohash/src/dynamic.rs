//! An owned, schema-less message model with proto3 presence rules.
//!
//! Useful when values are assembled at runtime rather than decoded from a
//! generated type. Fields are addressed by number only; the kind of each field
//! is taken from the values stored in it.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::error::HashError;
use crate::reflect::{FieldView, Kind, ReflectMessage, ValueRef};

/// An owned field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `bool`
    Bool(bool),
    /// `int32`, `sint32`, `sfixed32`
    Int32(i32),
    /// `int64`, `sint64`, `sfixed64`
    Int64(i64),
    /// `uint32`, `fixed32`
    Uint32(u32),
    /// `uint64`, `fixed64`
    Uint64(u64),
    /// `float`
    Float(f32),
    /// `double`
    Double(f64),
    /// `string`
    String(String),
    /// `bytes`
    Bytes(Vec<u8>),
    /// An enum number.
    Enum(i32),
    /// A nested message.
    Message(DynamicMessage),
}

impl Value {
    /// The hashing kind of this value.
    pub fn kind(&self) -> Kind {
        self.as_value_ref().kind()
    }

    /// Whether this is the zero value of its type.
    ///
    /// Messages are never default: a set sub-message is present even when empty.
    /// `-0.0` is not default, matching protobuf's bitwise comparison.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Bool(v) => !v,
            Value::Int32(v) => *v == 0,
            Value::Int64(v) => *v == 0,
            Value::Uint32(v) => *v == 0,
            Value::Uint64(v) => *v == 0,
            Value::Float(v) => v.to_bits() == 0,
            Value::Double(v) => v.to_bits() == 0,
            Value::String(v) => v.is_empty(),
            Value::Bytes(v) => v.is_empty(),
            Value::Enum(v) => *v == 0,
            Value::Message(_) => false,
        }
    }

    fn as_value_ref(&self) -> ValueRef<'_> {
        match self {
            Value::Bool(v) => ValueRef::Bool(*v),
            Value::Int32(v) => ValueRef::Int(i64::from(*v)),
            Value::Int64(v) => ValueRef::Int(*v),
            Value::Uint32(v) => ValueRef::Uint(u64::from(*v)),
            Value::Uint64(v) => ValueRef::Uint(*v),
            Value::Float(v) => ValueRef::Float(*v),
            Value::Double(v) => ValueRef::Double(*v),
            Value::String(v) => ValueRef::String(v),
            Value::Bytes(v) => ValueRef::Bytes(v),
            Value::Enum(v) => ValueRef::Enum(*v),
            Value::Message(v) => ValueRef::Message(v),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float,
    f64 => Double,
    String => String,
    &str => String,
    Vec<u8> => Bytes,
    &[u8] => Bytes,
    DynamicMessage => Message,
}

/// A map key. Protobuf only allows integral, boolean and string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    /// `bool` key.
    Bool(bool),
    /// 32-bit signed key.
    Int32(i32),
    /// 64-bit signed key.
    Int64(i64),
    /// 32-bit unsigned key.
    Uint32(u32),
    /// 64-bit unsigned key.
    Uint64(u64),
    /// `string` key.
    String(String),
}

impl MapKey {
    /// The hashing kind of this key.
    pub fn kind(&self) -> Kind {
        self.as_value_ref().kind()
    }

    fn as_value_ref(&self) -> ValueRef<'_> {
        match self {
            MapKey::Bool(v) => ValueRef::Bool(*v),
            MapKey::Int32(v) => ValueRef::Int(i64::from(*v)),
            MapKey::Int64(v) => ValueRef::Int(*v),
            MapKey::Uint32(v) => ValueRef::Uint(u64::from(*v)),
            MapKey::Uint64(v) => ValueRef::Uint(*v),
            MapKey::String(v) => ValueRef::String(v),
        }
    }
}

macro_rules! map_key_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for MapKey {
                fn from(value: $ty) -> Self {
                    MapKey::$variant(value.into())
                }
            }
        )*
    };
}

map_key_from! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    u32 => Uint32,
    u64 => Uint64,
    String => String,
    &str => String,
}

#[derive(Debug, Clone, PartialEq)]
enum Field {
    Singular {
        value: Value,
        explicit: bool,
    },
    List {
        kind: Kind,
        values: Vec<Value>,
    },
    Map {
        key_kind: Kind,
        value_kind: Kind,
        entries: IndexMap<MapKey, Value>,
    },
}

impl Field {
    fn is_present(&self) -> bool {
        match self {
            Field::Singular { value, explicit } => *explicit || !value.is_default(),
            Field::List { values, .. } => !values.is_empty(),
            Field::Map { entries, .. } => !entries.is_empty(),
        }
    }
}

/// A message assembled at runtime.
///
/// ```rust
/// use protohash::dynamic::DynamicMessage;
///
/// let mut message = DynamicMessage::new();
/// message
///     .set(1, 0i32) // implicit presence: a zero is the same as unset
///     .push(2, "a")
///     .insert_entry(3, "key", 7u64);
/// assert!(!message.has_field(1));
/// assert!(message.has_field(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicMessage {
    fields: BTreeMap<u32, Field>,
    oneofs: HashMap<String, u32>,
}

impl DynamicMessage {
    /// An empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an implicit-presence field; storing its default value makes it absent.
    pub fn set(&mut self, number: u32, value: impl Into<Value>) -> &mut Self {
        self.detach_oneof(number);
        self.fields.insert(
            number,
            Field::Singular {
                value: value.into(),
                explicit: false,
            },
        );
        self
    }

    /// Sets an explicit-presence field (`optional`, proto2): present even at its default.
    pub fn set_explicit(&mut self, number: u32, value: impl Into<Value>) -> &mut Self {
        self.detach_oneof(number);
        self.fields.insert(
            number,
            Field::Singular {
                value: value.into(),
                explicit: true,
            },
        );
        self
    }

    /// Selects `number` as the member of oneof `group`, clearing the previous member.
    ///
    /// The member hashes exactly like a plain field with the same number.
    pub fn set_oneof(
        &mut self,
        group: impl Into<String>,
        number: u32,
        value: impl Into<Value>,
    ) -> &mut Self {
        let group = group.into();
        if let Some(previous) = self.oneofs.get(&group).copied() {
            self.fields.remove(&previous);
        }
        self.detach_oneof(number);
        self.fields.insert(
            number,
            Field::Singular {
                value: value.into(),
                explicit: true,
            },
        );
        self.oneofs.insert(group, number);
        self
    }

    /// Replaces a repeated field.
    pub fn set_list<V: Into<Value>>(
        &mut self,
        number: u32,
        kind: Kind,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.detach_oneof(number);
        self.fields.insert(
            number,
            Field::List {
                kind,
                values: values.into_iter().map(Into::into).collect(),
            },
        );
        self
    }

    /// Appends to a repeated field; a new field takes its kind from `value`.
    pub fn push(&mut self, number: u32, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match self.fields.get_mut(&number) {
            Some(Field::List { values, .. }) => values.push(value),
            _ => {
                self.detach_oneof(number);
                self.fields.insert(
                    number,
                    Field::List {
                        kind: value.kind(),
                        values: vec![value],
                    },
                );
            }
        }
        self
    }

    /// Inserts a map entry into a field declared as `key_kind -> value_kind`.
    ///
    /// Redeclaring an existing map field with other kinds starts it afresh.
    pub fn insert_map_entry(
        &mut self,
        number: u32,
        key_kind: Kind,
        value_kind: Kind,
        key: impl Into<MapKey>,
        value: impl Into<Value>,
    ) -> &mut Self {
        let (key, value) = (key.into(), value.into());
        match self.fields.get_mut(&number) {
            Some(Field::Map {
                key_kind: k,
                value_kind: v,
                entries,
            }) if *k == key_kind && *v == value_kind => {
                entries.insert(key, value);
            }
            _ => {
                self.detach_oneof(number);
                let mut entries = IndexMap::new();
                entries.insert(key, value);
                self.fields.insert(
                    number,
                    Field::Map {
                        key_kind,
                        value_kind,
                        entries,
                    },
                );
            }
        }
        self
    }

    /// Inserts a map entry; a new field takes its kinds from the first entry.
    pub fn insert_entry(
        &mut self,
        number: u32,
        key: impl Into<MapKey>,
        value: impl Into<Value>,
    ) -> &mut Self {
        let (key, value) = (key.into(), value.into());
        let (key_kind, value_kind) = match self.fields.get(&number) {
            Some(Field::Map {
                key_kind,
                value_kind,
                ..
            }) => (*key_kind, *value_kind),
            _ => (key.kind(), value.kind()),
        };
        self.insert_map_entry(number, key_kind, value_kind, key, value)
    }

    /// Removes a field, whatever its cardinality.
    pub fn clear_field(&mut self, number: u32) -> &mut Self {
        self.detach_oneof(number);
        self.fields.remove(&number);
        self
    }

    /// Whether the field contributes to the digest.
    pub fn has_field(&self, number: u32) -> bool {
        self.fields.get(&number).is_some_and(Field::is_present)
    }

    /// The value of a singular field, if stored (present or not).
    pub fn get(&self, number: u32) -> Option<&Value> {
        match self.fields.get(&number) {
            Some(Field::Singular { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.fields.values().filter(|f| f.is_present()).count()
    }

    /// Whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn detach_oneof(&mut self, number: u32) {
        self.oneofs.retain(|_, member| *member != number);
    }
}

impl ReflectMessage for DynamicMessage {
    fn present_fields(&self) -> Result<Vec<FieldView<'_>>, HashError> {
        let views = self
            .fields
            .iter()
            .filter(|(_, field)| field.is_present())
            .map(|(&number, field)| match field {
                Field::Singular { value, .. } => FieldView::singular(number, value.as_value_ref()),
                Field::List { kind, values } => FieldView::list(
                    number,
                    *kind,
                    values.iter().map(Value::as_value_ref).collect(),
                ),
                Field::Map {
                    key_kind,
                    value_kind,
                    entries,
                } => FieldView::map(
                    number,
                    *key_kind,
                    *value_kind,
                    entries
                        .iter()
                        .map(|(k, v)| (k.as_value_ref(), v.as_value_ref()))
                        .collect(),
                ),
            })
            .collect();
        Ok(views)
    }
}
