//! Canonical byte encoding of scalar values.
//!
//! Numeric families share one representative width so that, for example, an
//! `int32` and an `int64` holding the same number encode identically.

use crate::digest::Digest;
use crate::error::HashError;
use crate::primitive::DigestPrimitive;
use crate::reflect::{ReflectMessage, ValueRef};

/// Canonical bytes of one scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalBytes<'a> {
    /// A single byte (booleans).
    Byte([u8; 1]),
    /// An 8-byte little-endian word (integers, enums, floats, digests).
    Word([u8; 8]),
    /// Raw contents (strings and bytes), without a length prefix.
    Raw(&'a [u8]),
}

impl CanonicalBytes<'_> {
    /// The encoded bytes.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            CanonicalBytes::Byte(b) => &b[..],
            CanonicalBytes::Word(w) => &w[..],
            CanonicalBytes::Raw(r) => *r,
        }
    }
}

/// A value ready to be digested.
pub enum Encoded<'a> {
    /// A scalar and its canonical bytes.
    Scalar(CanonicalBytes<'a>),
    /// A nested message. Its canonical form is the 8-byte encoding of its own
    /// digest, which only the walker can compute.
    Message(&'a dyn ReflectMessage),
}

/// Encodes one value.
pub fn encode<'a>(value: &ValueRef<'a>) -> Encoded<'a> {
    let bytes = match *value {
        ValueRef::Bool(b) => CanonicalBytes::Byte([u8::from(b)]),
        ValueRef::Int(i) => CanonicalBytes::Word(i.to_le_bytes()),
        ValueRef::Uint(u) => CanonicalBytes::Word(u.to_le_bytes()),
        ValueRef::Enum(e) => CanonicalBytes::Word(i64::from(e).to_le_bytes()),
        // Promotion is exact, so a float only matches a double holding the
        // very same number.
        ValueRef::Float(f) => CanonicalBytes::Word(f64::from(f).to_le_bytes()),
        ValueRef::Double(d) => CanonicalBytes::Word(d.to_le_bytes()),
        ValueRef::String(s) => CanonicalBytes::Raw(s.as_bytes()),
        ValueRef::Bytes(b) => CanonicalBytes::Raw(b),
        ValueRef::Message(message) => return Encoded::Message(message),
    };
    Encoded::Scalar(bytes)
}

/// Digest of one scalar leaf, computed from a fresh primitive state.
pub(crate) fn hash_scalar<P: DigestPrimitive + ?Sized>(
    primitive: &P,
    bytes: CanonicalBytes<'_>,
) -> Result<Digest, HashError> {
    primitive.digest(&[bytes.as_slice()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(value: ValueRef<'_>) -> Vec<u8> {
        match encode(&value) {
            Encoded::Scalar(bytes) => bytes.as_slice().to_vec(),
            Encoded::Message(_) => panic!("expected a scalar"),
        }
    }

    #[test]
    fn booleans_are_one_byte() {
        assert_eq!(bytes(ValueRef::Bool(true)), vec![1]);
        assert_eq!(bytes(ValueRef::Bool(false)), vec![0]);
    }

    #[test]
    fn integers_are_widened_little_endian() {
        assert_eq!(bytes(ValueRef::Int(-1)), vec![0xff; 8]);
        assert_eq!(bytes(ValueRef::Uint(1)), vec![1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes(ValueRef::Enum(-2)), bytes(ValueRef::Int(-2)));
    }

    #[test]
    fn floats_promote_to_double() {
        assert_eq!(bytes(ValueRef::Float(1.5)), bytes(ValueRef::Double(1.5)));
        assert_ne!(bytes(ValueRef::Float(0.1)), bytes(ValueRef::Double(0.1)));
        assert_eq!(
            bytes(ValueRef::Float(0.1)),
            bytes(ValueRef::Double(1.0000000149011612e-1))
        );
    }

    #[test]
    fn strings_and_bytes_are_raw() {
        assert_eq!(bytes(ValueRef::String("ab")), b"ab".to_vec());
        assert_eq!(bytes(ValueRef::Bytes(&[0, 0, 0])), vec![0, 0, 0]);
        assert!(bytes(ValueRef::String("")).is_empty());
    }
}
