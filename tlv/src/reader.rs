//! Cursor contract consumed by the traversal utilities.

use crate::element::{ElementType, Tag};
use crate::error::DecodeError;

/// Result of a successful [`TlvReader::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor is positioned on a new element.
    Element,
    /// No more elements in the current scope. Not an error.
    EndOfScope,
}

/// A forward-only TLV cursor.
///
/// # Contract
///
/// - `next` moves to the following sibling in the current scope. If the
///   current element is a container that was not entered, its contents are
///   skipped wholesale.
/// - `enter_container` / `exit_container` follow stack discipline. Exiting
///   skips whatever is left unread inside the container and leaves the
///   cursor positioned on the container element in the parent scope.
/// - `tag` and `element_type` describe the current element and are only
///   meaningful after `next` returned [`Advance::Element`].
/// - `snapshot` returns an independent cursor at the same position; reading
///   from either must not affect the other. Implementations should make it
///   cheap (positional copy, shared backing store).
///
/// The utilities borrow a reader mutably for one call and never retain it.
pub trait TlvReader: Sized {
    /// Advance to the next element in the current scope.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the stream is truncated or malformed.
    fn next(&mut self) -> Result<Advance, DecodeError>;

    /// Tag of the current element.
    fn tag(&self) -> Tag;

    /// Type of the current element.
    fn element_type(&self) -> ElementType;

    /// Enter the container under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::NotAContainer`] for primitives and
    /// [`DecodeError::NoCurrentElement`] when nothing is under the cursor.
    fn enter_container(&mut self) -> Result<(), DecodeError>;

    /// Leave the innermost entered container.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::ScopeUnderflow`] at top level, or a decoding
    /// fault met while skipping the unread remainder.
    fn exit_container(&mut self) -> Result<(), DecodeError>;

    /// Independent positional copy of this cursor.
    #[must_use]
    fn snapshot(&self) -> Self;

    /// # Errors
    ///
    /// [`DecodeError::UnexpectedType`] unless the element is a signed integer.
    fn get_i64(&self) -> Result<i64, DecodeError>;

    /// # Errors
    ///
    /// [`DecodeError::UnexpectedType`] unless the element is an unsigned integer.
    fn get_u64(&self) -> Result<u64, DecodeError>;

    /// # Errors
    ///
    /// [`DecodeError::UnexpectedType`] unless the element is a boolean.
    fn get_bool(&self) -> Result<bool, DecodeError>;

    /// # Errors
    ///
    /// [`DecodeError::UnexpectedType`] unless the element is a float.
    fn get_f64(&self) -> Result<f64, DecodeError>;

    /// # Errors
    ///
    /// [`DecodeError::UnexpectedType`] unless the element is a UTF-8 string.
    fn get_str(&self) -> Result<&str, DecodeError>;

    /// # Errors
    ///
    /// [`DecodeError::UnexpectedType`] unless the element is a byte string.
    fn get_bytes(&self) -> Result<&[u8], DecodeError>;
}
