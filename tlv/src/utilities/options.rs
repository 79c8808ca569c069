//! Traversal options.

/// Default bound on container nesting during recursive traversal.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// How a traversal treats nested containers.
///
/// Input is untrusted, so recursion is bounded by `max_depth` regardless of
/// how deep the data claims to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalOptions {
    /// Descend into containers. When `false`, a container is visited as one
    /// element and its contents are skipped.
    pub recurse: bool,
    /// Maximum depth of any visited element. Top-level elements are depth 0,
    /// so this is also the number of containers that may be open at once.
    pub max_depth: usize,
}

impl TraversalOptions {
    /// Recursive traversal with the default depth bound.
    #[must_use]
    pub const fn recursive() -> Self {
        Self {
            recurse: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Visit only the immediate elements of the current scope.
    #[must_use]
    pub const fn flat() -> Self {
        Self {
            recurse: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub const fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self::recursive()
    }
}

impl From<bool> for TraversalOptions {
    fn from(recurse: bool) -> Self {
        if recurse {
            Self::recursive()
        } else {
            Self::flat()
        }
    }
}
