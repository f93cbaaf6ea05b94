//! Recursive traversal of a message's present fields.

use crate::combine::{ordered, UnorderedFold};
use crate::digest::Digest;
use crate::encoder::{encode, hash_scalar, Encoded};
use crate::error::{FieldPath, HashError};
use crate::primitive::DigestPrimitive;
use crate::reflect::{FieldValue, FieldView, Kind, ReflectMessage, ValueRef};

/// Walks one message tree, folding leaf digests with the combinators.
pub(crate) struct MessageWalker<'p, P: ?Sized> {
    primitive: &'p P,
    max_depth: usize,
}

impl<'p, P: DigestPrimitive + ?Sized> MessageWalker<'p, P> {
    pub(crate) fn new(primitive: &'p P, max_depth: usize) -> Self {
        Self {
            primitive,
            max_depth,
        }
    }

    /// Digest of a message: its field digests folded in field-number order.
    pub(crate) fn hash_message<M: ReflectMessage + ?Sized>(
        &self,
        message: &M,
        path: &FieldPath,
        depth: usize,
    ) -> Result<Digest, HashError> {
        if depth > self.max_depth {
            return Err(HashError::RecursionLimit {
                path: path.clone(),
                limit: self.max_depth,
            });
        }
        if !message.is_valid() {
            return Err(HashError::InvalidState {
                path: path.clone(),
                reason: "message cannot be introspected".into(),
            });
        }

        // Views report paths relative to their own message.
        let fields = message.present_fields().map_err(|e| e.within(path))?;
        let mut acc = Digest::ZERO;
        let mut previous: Option<u32> = None;
        for field in &fields {
            if let Some(previous) = previous {
                if field.number <= previous {
                    tracing::warn!(
                        path = %path,
                        previous,
                        number = field.number,
                        "message view is not in ascending field order"
                    );
                    return Err(HashError::InvalidState {
                        path: path.clone(),
                        reason: format!(
                            "field {} listed after field {}",
                            field.number, previous
                        ),
                    });
                }
            }
            previous = Some(field.number);

            let field_path = path.push_field(field.number);
            let Some(digest) = self.hash_field(field, &field_path, depth)? else {
                continue;
            };
            tracing::trace!(path = %field_path, digest = %digest, "folding field");
            acc = ordered(self.primitive, acc, digest)?;
        }
        Ok(acc)
    }

    /// `None` for an empty collection, which contributes nothing.
    fn hash_field(
        &self,
        field: &FieldView<'_>,
        path: &FieldPath,
        depth: usize,
    ) -> Result<Option<Digest>, HashError> {
        match &field.value {
            FieldValue::Singular(value) => {
                self.hash_value(field.kind, value, path, depth).map(Some)
            }
            FieldValue::List(items) if items.is_empty() => Ok(None),
            FieldValue::List(items) => {
                self.hash_list(field.kind, items, path, depth).map(Some)
            }
            FieldValue::Map { entries, .. } if entries.is_empty() => Ok(None),
            FieldValue::Map { key_kind, entries } => self
                .hash_map(*key_kind, field.kind, entries, path, depth)
                .map(Some),
        }
    }

    /// Folds elements from last to first, so that list order matters.
    fn hash_list(
        &self,
        kind: Kind,
        items: &[ValueRef<'_>],
        path: &FieldPath,
        depth: usize,
    ) -> Result<Digest, HashError> {
        let mut acc = Digest::ZERO;
        for (index, item) in items.iter().enumerate().rev() {
            let leaf = self.hash_value(kind, item, &path.push_index(index), depth)?;
            acc = ordered(self.primitive, acc, leaf)?;
        }
        Ok(acc)
    }

    /// XOR-folds `ordered(key, value)` per entry and hardens the result.
    fn hash_map(
        &self,
        key_kind: Kind,
        value_kind: Kind,
        entries: &[(ValueRef<'_>, ValueRef<'_>)],
        path: &FieldPath,
        depth: usize,
    ) -> Result<Digest, HashError> {
        let entry_path = path.push_entry();
        let mut fold = UnorderedFold::new();
        for (key, value) in entries {
            let key = self.hash_value(key_kind, key, &entry_path, depth)?;
            let value = self.hash_value(value_kind, value, &entry_path, depth)?;
            fold.add(ordered(self.primitive, key, value)?);
        }
        fold.finish(self.primitive)
    }

    fn hash_value(
        &self,
        expected: Kind,
        value: &ValueRef<'_>,
        path: &FieldPath,
        depth: usize,
    ) -> Result<Digest, HashError> {
        let found = value.kind();
        if found != expected {
            return Err(HashError::UnsupportedKind {
                path: path.clone(),
                expected,
                found,
            });
        }
        match encode(value) {
            Encoded::Scalar(bytes) => hash_scalar(self.primitive, bytes),
            Encoded::Message(message) => self.hash_message(message, path, depth + 1),
        }
    }
}
