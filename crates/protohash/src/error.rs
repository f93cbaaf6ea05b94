use std::fmt;

use crate::reflect::Kind;

/// Error returned when a message cannot be hashed.
///
/// Any error aborts the whole call; no partial digest is ever returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// No message was supplied.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The message handle is present but cannot be introspected.
    #[error("invalid message state at {path}: {reason}")]
    InvalidState {
        /// Location of the offending message.
        path: FieldPath,
        /// Why introspection failed.
        reason: String,
    },
    /// A value does not belong to the kind its field declares.
    #[error("unsupported kind at {path}: field declares {expected}, value is {found}")]
    UnsupportedKind {
        /// Location of the offending value.
        path: FieldPath,
        /// Kind declared by the field.
        expected: Kind,
        /// Kind of the value actually carried.
        found: Kind,
    },
    /// Writing into the digest primitive failed.
    #[error("digest primitive failed: {0}")]
    EncodingFailure(String),
    /// Messages are nested deeper than the configured limit.
    #[error("nesting depth limit {limit} exceeded at {path}")]
    RecursionLimit {
        /// Location where the limit was crossed.
        path: FieldPath,
        /// Configured maximum depth.
        limit: usize,
    },
}

impl HashError {
    /// Re-roots a path reported relative to a nested message under `parent`.
    pub(crate) fn within(self, parent: &FieldPath) -> Self {
        match self {
            HashError::InvalidState { path, reason } => HashError::InvalidState {
                path: parent.join(&path),
                reason,
            },
            HashError::UnsupportedKind {
                path,
                expected,
                found,
            } => HashError::UnsupportedKind {
                path: parent.join(&path),
                expected,
                found,
            },
            HashError::RecursionLimit { path, limit } => HashError::RecursionLimit {
                path: parent.join(&path),
                limit,
            },
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Field(u32),
    Index(usize),
    Entry,
}

/// Location of a value inside a message tree, used in error reports.
///
/// Rendered as `root`, `root.3`, `root.3[1].7`, `root.4{}` (map entry).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The path of the top-level message.
    pub fn root() -> Self {
        Self::default()
    }

    pub(crate) fn push_field(&self, number: u32) -> Self {
        self.with(Segment::Field(number))
    }

    pub(crate) fn push_index(&self, index: usize) -> Self {
        self.with(Segment::Index(index))
    }

    pub(crate) fn push_entry(&self) -> Self {
        self.with(Segment::Entry)
    }

    /// `relative` appended to this path.
    pub(crate) fn join(&self, relative: &FieldPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(relative.segments.iter().cloned());
        Self { segments }
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for segment in &self.segments {
            match segment {
                Segment::Field(number) => write!(f, ".{}", number)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::Entry => write!(f, "{{}}")?,
            }
        }
        Ok(())
    }
}
