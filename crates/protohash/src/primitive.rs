//! Pluggable digest primitives.
//!
//! A primitive turns a byte sequence into a [`Digest`]. Every call starts from a
//! fresh state, so no residue ever crosses from one leaf computation into
//! another, and a primitive can be shared by concurrent callers.

use std::hash::{BuildHasher, Hasher};

use sha2::{Digest as Sha2Digest, Sha256};

use crate::digest::Digest;
use crate::error::HashError;

/// FNV-1a 64-bit offset basis.
pub const FNV1A_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
const FNV1A_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A resettable hash function producing (at least) 64 bits.
pub trait DigestPrimitive {
    /// Hashes `chunks` in one pass, as if they were concatenated.
    fn digest(&self, chunks: &[&[u8]]) -> Result<Digest, HashError>;
}

impl<P: DigestPrimitive + ?Sized> DigestPrimitive for Box<P> {
    fn digest(&self, chunks: &[&[u8]]) -> Result<Digest, HashError> {
        (**self).digest(chunks)
    }
}

impl<P: DigestPrimitive + ?Sized> DigestPrimitive for &P {
    fn digest(&self, chunks: &[&[u8]]) -> Result<Digest, HashError> {
        (**self).digest(chunks)
    }
}

/// FNV-1a, 64-bit. The default primitive; fast and non-cryptographic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1a64;

/// Streaming FNV-1a state, usable as a [`std::hash::Hasher`].
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a64Hasher(u64);

impl Default for Fnv1a64Hasher {
    fn default() -> Self {
        Fnv1a64Hasher(FNV1A_OFFSET)
    }
}

impl Hasher for Fnv1a64Hasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &byte in bytes {
            h = (h ^ u64::from(byte)).wrapping_mul(FNV1A_PRIME);
        }
        self.0 = h;
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

impl BuildHasher for Fnv1a64 {
    type Hasher = Fnv1a64Hasher;

    fn build_hasher(&self) -> Fnv1a64Hasher {
        Fnv1a64Hasher::default()
    }
}

impl DigestPrimitive for Fnv1a64 {
    fn digest(&self, chunks: &[&[u8]]) -> Result<Digest, HashError> {
        let mut hasher = self.build_hasher();
        for chunk in chunks {
            hasher.write(chunk);
        }
        Ok(Digest::from_u64(hasher.finish()))
    }
}

/// SHA-256 truncated to its first eight bytes (read little-endian).
///
/// Slower than [`Fnv1a64`] but with far better mixing; digests are not
/// comparable with the default primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Truncated;

impl DigestPrimitive for Sha256Truncated {
    fn digest(&self, chunks: &[&[u8]]) -> Result<Digest, HashError> {
        let mut hasher = Sha256::new();
        for chunk in chunks {
            hasher.update(chunk);
        }
        let out = hasher.finalize();
        let head: [u8; 8] = out[..8].try_into().map_err(|_| {
            HashError::EncodingFailure("sha-256 output shorter than 8 bytes".into())
        })?;
        Ok(Digest::from_u64(u64::from_le_bytes(head)))
    }
}

/// Adapts any [`BuildHasher`] (e.g. `BuildHasherDefault<H>`) into a primitive.
///
/// Only the `write`/`finish` pair of the built hasher is used.
#[derive(Debug, Clone, Default)]
pub struct BuildHasherPrimitive<S>(pub S);

impl<S: BuildHasher> DigestPrimitive for BuildHasherPrimitive<S> {
    fn digest(&self, chunks: &[&[u8]]) -> Result<Digest, HashError> {
        let mut hasher = self.0.build_hasher();
        for chunk in chunks {
            hasher.write(chunk);
        }
        Ok(Digest::from_u64(hasher.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::BuildHasherDefault;

    fn hash(primitive: &impl DigestPrimitive, bytes: &[u8]) -> u64 {
        primitive.digest(&[bytes]).unwrap().as_u64()
    }

    #[test]
    fn fnv1a_known_values() {
        assert_eq!(Fnv1a64.digest(&[]).unwrap().as_u64(), FNV1A_OFFSET);
        assert_eq!(hash(&Fnv1a64, b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(hash(&Fnv1a64, b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn chunks_hash_like_their_concatenation() {
        let chunks: [&[u8]; 2] = [b"foo", b"bar"];
        assert_eq!(
            Fnv1a64.digest(&chunks).unwrap().as_u64(),
            hash(&Fnv1a64, b"foobar")
        );
        assert_eq!(
            Sha256Truncated.digest(&chunks).unwrap().as_u64(),
            hash(&Sha256Truncated, b"foobar")
        );
    }

    #[test]
    fn every_call_starts_fresh() {
        let first = hash(&Fnv1a64, b"x");
        hash(&Fnv1a64, b"something else");
        assert_eq!(hash(&Fnv1a64, b"x"), first);
    }

    #[test]
    fn build_hasher_adapter_matches_native() {
        let adapted = BuildHasherPrimitive(BuildHasherDefault::<Fnv1a64Hasher>::default());
        assert_eq!(hash(&adapted, b"hello"), hash(&Fnv1a64, b"hello"));
    }

    #[test]
    fn sha256_truncation_reads_little_endian() {
        // sha256("") = e3b0c442 98fc1c14 ...
        assert_eq!(hash(&Sha256Truncated, b""), 0x141cfc9842c4b0e3);
    }

    #[test]
    fn boxed_primitive_forwards() {
        let boxed: Box<dyn DigestPrimitive> = Box::new(Fnv1a64);
        assert_eq!(hash(&boxed, b"a"), hash(&Fnv1a64, b"a"));
    }
}
