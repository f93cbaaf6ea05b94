use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A 64-bit content fingerprint.
///
/// [`Digest::ZERO`] is both the identity of the combinators and the legitimate
/// digest of a message with no present fields; it never signals an error.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(u64);

/// Error returned when a digest string is malformed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a digest (expected 1-16 hex digits)")]
pub struct ParseDigestError(String);

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(0x)?[0-9a-fA-F]{1,16}$").expect("invalid regex"))
}

impl Digest {
    /// The identity digest.
    pub const ZERO: Digest = Digest(0);

    /// Wraps a raw 64-bit value.
    pub const fn from_u64(value: u64) -> Self {
        Digest(value)
    }

    /// Returns the raw 64-bit value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns `true` for the identity digest.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The 8-byte little-endian encoding fed to the combinators.
    pub const fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Parses a hex digest; leading zeros and an `0x` prefix are optional.
    pub fn parse_hex(value: &str) -> Result<Self, ParseDigestError> {
        let value = value.trim();
        if !hex_pattern().is_match(value) {
            return Err(ParseDigestError(value.to_string()));
        }
        let digits = value.trim_start_matches("0x");
        u64::from_str_radix(digits, 16)
            .map(Digest)
            .map_err(|_| ParseDigestError(value.to_string()))
    }
}

impl From<u64> for Digest {
    fn from(value: u64) -> Self {
        Digest(value)
    }
}

impl From<Digest> for u64 {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Digest::parse_hex(s)
    }
}

impl TryFrom<String> for Digest {
    type Error = ParseDigestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Digest::parse_hex(&value)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.to_string()
    }
}
