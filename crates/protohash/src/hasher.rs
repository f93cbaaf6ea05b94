//! The hashing facade: configuration and entry points.

use crate::config::HasherConfig;
use crate::digest::Digest;
use crate::error::{FieldPath, HashError};
use crate::primitive::{DigestPrimitive, Fnv1a64};
use crate::reflect::ReflectMessage;
use crate::walker::MessageWalker;

/// Default bound on message nesting, matching protobuf's decode recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Computes stable digests of reflectable messages.
///
/// The primitive is stateless between calls, so a `ProtoHasher` can be reused
/// indefinitely and shared across threads whenever `P: Sync`.
///
/// # Example
///
/// ```rust
/// use protohash::dynamic::{DynamicMessage, Value};
/// use protohash::ProtoHasher;
///
/// let mut message = DynamicMessage::new();
/// message.set(25, Value::String("TEST!".into()));
///
/// let digest = ProtoHasher::new().hash_message(&message)?;
/// assert_eq!(digest.to_string(), "6e388481a9f4259e");
/// # Ok::<(), protohash::HashError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProtoHasher<P = Fnv1a64> {
    primitive: P,
    max_depth: usize,
}

impl ProtoHasher<Fnv1a64> {
    /// A hasher using 64-bit FNV-1a.
    pub fn new() -> Self {
        Self::with_primitive(Fnv1a64)
    }
}

impl Default for ProtoHasher<Fnv1a64> {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtoHasher<Box<dyn DigestPrimitive + Send + Sync>> {
    /// Builds a hasher from configuration.
    pub fn from_config(config: &HasherConfig) -> Self {
        Self::with_primitive(config.primitive.build()).with_max_depth(config.max_depth)
    }
}

impl<P: DigestPrimitive> ProtoHasher<P> {
    /// A hasher using a substitute digest primitive.
    pub fn with_primitive(primitive: P) -> Self {
        Self {
            primitive,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how deeply messages may nest before hashing fails.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured nesting bound.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The digest primitive in use.
    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    /// Digest of `message`.
    ///
    /// A message with no present fields digests to [`Digest::ZERO`].
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidState`] if the message (or a nested one)
    /// cannot be introspected; see [`HashError`] for the rest. No partial
    /// digest is ever returned.
    pub fn hash_message<M: ReflectMessage + ?Sized>(
        &self,
        message: &M,
    ) -> Result<Digest, HashError> {
        let walker = MessageWalker::new(&self.primitive, self.max_depth);
        let digest = walker.hash_message(message, &FieldPath::root(), 0)?;
        tracing::debug!(digest = %digest, "hashed message");
        Ok(digest)
    }

    /// Like [`hash_message`](Self::hash_message), but a missing message is an
    /// [`HashError::InvalidArgument`] rather than a type error.
    pub fn hash_optional<M: ReflectMessage + ?Sized>(
        &self,
        message: Option<&M>,
    ) -> Result<Digest, HashError> {
        match message {
            Some(message) => self.hash_message(message),
            None => Err(HashError::InvalidArgument("message is missing".into())),
        }
    }
}
