//! Typed TLV errors.
//!
//! [`DecodeError`] is what a cursor reports about its input. [`TlvError`] is
//! what the traversal utilities return: cursor faults, depth-limit faults,
//! and handler-raised errors, each carried through unchanged.
//!
//! "Not found" is never an error; see [`crate::utilities::find::FindOutcome`].

use std::fmt;

use crate::element::ElementType;

/// A fault reported by a cursor about the stream it reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream ended inside an open container.
    Truncated { detail: String },
    /// The stream contains bytes that do not decode to an element.
    Malformed { detail: String },
    /// A typed read did not match the element under the cursor.
    UnexpectedType {
        expected: ElementType,
        found: ElementType,
    },
    /// `enter_container` on an element that is not a container.
    NotAContainer { found: ElementType },
    /// An element operation before the first successful advance, or after
    /// end of scope.
    NoCurrentElement,
    /// `exit_container` with no open container.
    ScopeUnderflow,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { detail } => write!(f, "truncated stream: {detail}"),
            Self::Malformed { detail } => write!(f, "malformed element: {detail}"),
            Self::UnexpectedType { expected, found } => {
                write!(f, "unexpected element type: expected {expected}, found {found}")
            }
            Self::NotAContainer { found } => write!(f, "cannot enter {found}: not a container"),
            Self::NoCurrentElement => write!(f, "no current element"),
            Self::ScopeUnderflow => write!(f, "exit_container with no open container"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Failure of a traversal, count, or search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlvError {
    /// The cursor reported a decoding fault.
    Decode(DecodeError),
    /// Entering the next container would exceed the configured depth limit.
    MaxDepthExceeded { limit: usize },
    /// A handler rejected an element.
    Rejected { code: u32, detail: String },
    /// `run` was called on a traversal that already reached a terminal state.
    TraversalFinished,
}

impl TlvError {
    /// Convenience constructor for handler-raised errors.
    #[must_use]
    pub fn rejected(code: u32, detail: impl Into<String>) -> Self {
        Self::Rejected {
            code,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for TlvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "decode error: {e}"),
            Self::MaxDepthExceeded { limit } => {
                write!(f, "container nesting exceeds max depth {limit}")
            }
            Self::Rejected { code, detail } => write!(f, "rejected by handler ({code}): {detail}"),
            Self::TraversalFinished => write!(f, "traversal already finished"),
        }
    }
}

impl std::error::Error for TlvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeError> for TlvError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}
