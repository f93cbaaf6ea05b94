//! The two combination algebras.
//!
//! * [`ordered`]: non-commutative, used for message fields, list elements and
//!   the key/value pair of a map entry.
//! * [`UnorderedFold`]: commutative XOR accumulation for map entries, which must
//!   be hardened before the result meets any other digest. The accumulator
//!   only leaves through [`UnorderedFold::finish`], which does exactly that.

use crate::digest::Digest;
use crate::error::HashError;
use crate::primitive::DigestPrimitive;

/// Combines `a` then `b` through the primitive in one pass.
pub fn ordered<P: DigestPrimitive + ?Sized>(
    primitive: &P,
    a: Digest,
    b: Digest,
) -> Result<Digest, HashError> {
    let (a, b) = (a.to_le_bytes(), b.to_le_bytes());
    primitive.digest(&[&a[..], &b[..]])
}

/// One-way remix of an XOR-folded value.
///
/// `H(A)^H(B) ^ H(A)^H(C)` equals `H(B)^H(C)` whatever `A` was; mixing the raw
/// accumulator again keeps such cancellations from leaking into the digest of
/// an enclosing value.
pub fn harden<P: DigestPrimitive + ?Sized>(
    primitive: &P,
    a: Digest,
) -> Result<Digest, HashError> {
    let a = a.to_le_bytes();
    primitive.digest(&[&a[..]])
}

/// Order-insensitive accumulator over a set of digests.
#[derive(Debug, Default)]
#[must_use = "an unordered fold is meaningless until finished"]
pub struct UnorderedFold {
    acc: u64,
    len: usize,
}

impl UnorderedFold {
    /// An empty fold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one member.
    pub fn add(&mut self, digest: Digest) {
        self.acc ^= digest.as_u64();
        self.len += 1;
    }

    /// Number of members added so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing was added.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Hardens the accumulated value; an empty fold yields zero unhardened.
    pub fn finish<P: DigestPrimitive + ?Sized>(
        self,
        primitive: &P,
    ) -> Result<Digest, HashError> {
        if self.is_empty() {
            return Ok(Digest::ZERO);
        }
        harden(primitive, Digest::from_u64(self.acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Fnv1a64;

    fn d(v: u64) -> Digest {
        Digest::from_u64(v)
    }

    #[test]
    fn ordered_is_not_commutative() {
        let p = Fnv1a64;
        let ab = ordered(&p, d(1), d(2)).unwrap();
        let ba = ordered(&p, d(2), d(1)).unwrap();
        assert_ne!(ab, ba);
    }

    #[test]
    fn ordered_hashes_both_words() {
        let p = Fnv1a64;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&7u64.to_le_bytes());
        bytes.extend_from_slice(&9u64.to_le_bytes());
        assert_eq!(
            ordered(&p, d(7), d(9)).unwrap(),
            p.digest(&[bytes.as_slice()]).unwrap()
        );
    }

    #[test]
    fn unordered_fold_ignores_order() {
        let p = Fnv1a64;
        let mut forward = UnorderedFold::new();
        let mut backward = UnorderedFold::new();
        for v in [3, 5, 11] {
            forward.add(d(v));
        }
        for v in [11, 5, 3] {
            backward.add(d(v));
        }
        assert_eq!(forward.len(), 3);
        assert_eq!(forward.finish(&p).unwrap(), backward.finish(&p).unwrap());
    }

    #[test]
    fn empty_fold_is_zero_and_not_hardened() {
        assert_eq!(UnorderedFold::new().finish(&Fnv1a64).unwrap(), Digest::ZERO);
    }

    #[test]
    fn finish_hardens_the_raw_xor() {
        let p = Fnv1a64;
        let mut fold = UnorderedFold::new();
        fold.add(d(0b0110));
        fold.add(d(0b0011));
        let raw = d(0b0101);
        assert_eq!(fold.finish(&p).unwrap(), harden(&p, raw).unwrap());
        assert_ne!(harden(&p, raw).unwrap(), raw);
    }

    #[test]
    fn hardening_separates_cancelling_sets() {
        // Raw, (A^B) ^ (A^C) == (Z^B) ^ (Z^C) == B^C.
        let p = Fnv1a64;
        let (a, b, c, z) = (d(0xa), d(0xb), d(0xc), d(0xf0));
        assert_eq!(
            a.as_u64() ^ b.as_u64() ^ a.as_u64() ^ c.as_u64(),
            z.as_u64() ^ b.as_u64() ^ z.as_u64() ^ c.as_u64()
        );

        let set = |x: Digest, y: Digest| {
            let mut fold = UnorderedFold::new();
            fold.add(x);
            fold.add(y);
            fold.finish(&p).unwrap()
        };
        assert_ne!(set(set(a, b), set(a, c)), set(set(z, b), set(z, c)));
    }
}
