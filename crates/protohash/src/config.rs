use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::hasher::DEFAULT_MAX_DEPTH;
use crate::primitive::{DigestPrimitive, Fnv1a64, Sha256Truncated};

/// Selectable digest primitives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// 64-bit FNV-1a (the default).
    #[default]
    #[serde(rename = "fnv1a64")]
    Fnv1a64,
    /// SHA-256 truncated to 64 bits.
    #[serde(rename = "sha256")]
    Sha256,
}

impl PrimitiveKind {
    /// Instantiates the primitive.
    pub fn build(self) -> Box<dyn DigestPrimitive + Send + Sync> {
        match self {
            PrimitiveKind::Fnv1a64 => Box::new(Fnv1a64),
            PrimitiveKind::Sha256 => Box::new(Sha256Truncated),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Fnv1a64 => f.write_str("fnv1a64"),
            PrimitiveKind::Sha256 => f.write_str("sha256"),
        }
    }
}

impl FromStr for PrimitiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fnv1a64" => Ok(PrimitiveKind::Fnv1a64),
            "sha256" => Ok(PrimitiveKind::Sha256),
            other => Err(format!(
                "unknown primitive '{}' (expected fnv1a64 or sha256)",
                other
            )),
        }
    }
}

/// Hasher settings, typically loaded from a JSON document.
///
/// Missing keys take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HasherConfig {
    /// Digest primitive.
    pub primitive: PrimitiveKind,
    /// Maximum message nesting depth.
    pub max_depth: usize,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            primitive: PrimitiveKind::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
