//! Stable 64-bit content fingerprints for schema-typed messages.
//!
//! Two messages that carry the same information digest identically, no matter
//! how they were encoded on the wire, in which order their map entries were
//! inserted, or whether a field was set as a oneof member or as a plain field
//! with the same number. Integer widths collapse into their family (`int32`
//! and `int64` holding `5` are equal), and a `float` equals a `double` exactly
//! when promotion preserves the value.
//!
//! Messages are read through the [`ReflectMessage`] seam. The crate ships an
//! owned [`DynamicMessage`](dynamic::DynamicMessage) and, with the
//! `prost-reflect` feature, an implementation for `prost_reflect::DynamicMessage`.
//!
#![deny(missing_docs)]

/// Combination algebras: ordered and unordered folds.
pub mod combine;
/// Serde-loadable hasher settings.
pub mod config;
/// The 64-bit digest value.
pub mod digest;
/// Owned runtime message model.
pub mod dynamic;
/// Canonical byte encoding of scalars.
pub mod encoder;
/// Error type and field paths.
pub mod error;
/// The hashing facade.
pub mod hasher;
/// Digest primitives (FNV-1a, truncated SHA-256).
pub mod primitive;
/// Reflection seam between messages and the hasher.
pub mod reflect;
/// `ReflectMessage` for `prost_reflect::DynamicMessage`.
#[cfg(feature = "prost-reflect")]
pub mod prost_adapter;

mod walker;

pub use config::{HasherConfig, PrimitiveKind};
pub use digest::{Digest, ParseDigestError};
pub use error::{FieldPath, HashError};
pub use hasher::{ProtoHasher, DEFAULT_MAX_DEPTH};
pub use primitive::{BuildHasherPrimitive, DigestPrimitive, Fnv1a64, Sha256Truncated};
pub use reflect::{Cardinality, FieldValue, FieldView, Kind, ReflectMessage, ValueRef};
