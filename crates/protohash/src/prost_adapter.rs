//! Hashing of `prost_reflect::DynamicMessage`.
//!
//! ```rust
//! # fn demo(message: &prost_reflect::DynamicMessage) -> Result<(), protohash::HashError> {
//! let digest = protohash::ProtoHasher::new().hash_message(message)?;
//! # let _ = digest;
//! # Ok(())
//! # }
//! ```

use prost_reflect::{DynamicMessage, FieldDescriptor, Kind as ProstKind, MapKey, Value};

use crate::error::{FieldPath, HashError};
use crate::reflect::{FieldView, Kind, ReflectMessage, ValueRef};

impl ReflectMessage for DynamicMessage {
    fn present_fields(&self) -> Result<Vec<FieldView<'_>>, HashError> {
        let mut present: Vec<(FieldDescriptor, &Value)> = self
            .fields()
            .filter(|(field, value)| is_present(field, value))
            .collect();
        present.sort_by_key(|(field, _)| field.number());

        present
            .into_iter()
            .map(|(field, value)| field_view(&field, value))
            .collect()
    }
}

fn is_present(field: &FieldDescriptor, value: &Value) -> bool {
    match value {
        Value::List(items) => !items.is_empty(),
        Value::Map(entries) => !entries.is_empty(),
        _ => field.supports_presence() || !value.is_default_for_field(field),
    }
}

fn field_view<'a>(field: &FieldDescriptor, value: &'a Value) -> Result<FieldView<'a>, HashError> {
    let number = field.number();
    // Relative to this message.
    let path = FieldPath::root().push_field(number);

    if field.is_map() {
        let (key_kind, value_kind) = match field.kind() {
            ProstKind::Message(entry) => (
                kind_of(&entry.map_entry_key_field().kind()),
                kind_of(&entry.map_entry_value_field().kind()),
            ),
            _ => return Err(malformed(&path, field, "map field without an entry type")),
        };
        let Value::Map(entries) = value else {
            return Err(malformed(&path, field, "map field does not hold a map"));
        };
        let entries = entries
            .iter()
            .map(|(key, value)| Ok((key_ref(key), value_ref(value, &path, field)?)))
            .collect::<Result<Vec<_>, HashError>>()?;
        return Ok(FieldView::map(number, key_kind, value_kind, entries));
    }

    let kind = kind_of(&field.kind());
    if field.is_list() {
        let Value::List(items) = value else {
            return Err(malformed(&path, field, "repeated field does not hold a list"));
        };
        let items = items
            .iter()
            .map(|item| value_ref(item, &path, field))
            .collect::<Result<Vec<_>, HashError>>()?;
        return Ok(FieldView::list(number, kind, items));
    }

    let mut view = FieldView::singular(number, value_ref(value, &path, field)?);
    view.kind = kind;
    Ok(view)
}

/// Folds protobuf's scalar types into their hashing family.
fn kind_of(kind: &ProstKind) -> Kind {
    match kind {
        ProstKind::Bool => Kind::Bool,
        ProstKind::Int32
        | ProstKind::Int64
        | ProstKind::Sint32
        | ProstKind::Sint64
        | ProstKind::Sfixed32
        | ProstKind::Sfixed64 => Kind::Int,
        ProstKind::Uint32 | ProstKind::Uint64 | ProstKind::Fixed32 | ProstKind::Fixed64 => {
            Kind::Uint
        }
        ProstKind::Float => Kind::Float,
        ProstKind::Double => Kind::Double,
        ProstKind::String => Kind::String,
        ProstKind::Bytes => Kind::Bytes,
        ProstKind::Enum(_) => Kind::Enum,
        ProstKind::Message(_) => Kind::Message,
    }
}

fn value_ref<'a>(
    value: &'a Value,
    path: &FieldPath,
    field: &FieldDescriptor,
) -> Result<ValueRef<'a>, HashError> {
    Ok(match value {
        Value::Bool(v) => ValueRef::Bool(*v),
        Value::I32(v) => ValueRef::Int(i64::from(*v)),
        Value::I64(v) => ValueRef::Int(*v),
        Value::U32(v) => ValueRef::Uint(u64::from(*v)),
        Value::U64(v) => ValueRef::Uint(*v),
        Value::F32(v) => ValueRef::Float(*v),
        Value::F64(v) => ValueRef::Double(*v),
        Value::String(v) => ValueRef::String(v),
        Value::Bytes(v) => ValueRef::Bytes(v.as_ref()),
        Value::EnumNumber(v) => ValueRef::Enum(*v),
        Value::Message(v) => ValueRef::Message(v),
        Value::List(_) | Value::Map(_) => {
            return Err(malformed(path, field, "collection nested inside a collection"))
        }
    })
}

fn key_ref(key: &MapKey) -> ValueRef<'_> {
    match key {
        MapKey::Bool(v) => ValueRef::Bool(*v),
        MapKey::I32(v) => ValueRef::Int(i64::from(*v)),
        MapKey::I64(v) => ValueRef::Int(*v),
        MapKey::U32(v) => ValueRef::Uint(u64::from(*v)),
        MapKey::U64(v) => ValueRef::Uint(*v),
        MapKey::String(v) => ValueRef::String(v),
    }
}

fn malformed(path: &FieldPath, field: &FieldDescriptor, reason: &str) -> HashError {
    HashError::InvalidState {
        path: path.clone(),
        reason: format!("{} ({}): {}", field.full_name(), field.number(), reason),
    }
}
