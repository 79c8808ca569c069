//! Traversal utilities: `iterate`, `count`, and the `find` family.
//!
//! All of them are pure functions of (cursor, options, handler). None keeps
//! state between calls.

pub mod count;
pub mod find;
pub mod iterate;
pub mod options;

#[cfg(test)]
pub(crate) mod fixtures;

pub use count::count;
pub use find::{find, find_shallowest, find_tag, FindOutcome, Found};
pub use iterate::{
    iterate, HandlerResult, IterateOutcome, Termination, Traversal, TraversalState,
};
pub use options::{TraversalOptions, DEFAULT_MAX_DEPTH};
