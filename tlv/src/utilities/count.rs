//! Element counting.

use crate::error::TlvError;
use crate::reader::TlvReader;
use crate::utilities::iterate::{iterate, HandlerResult};
use crate::utilities::options::TraversalOptions;

/// Count the elements of the current scope.
///
/// Flat: one per immediate element, a container counts as one.
/// Recursive: every element at every depth, containers included.
/// Never stops early.
///
/// # Errors
///
/// Any cursor fault, or [`TlvError::MaxDepthExceeded`].
pub fn count<R: TlvReader>(reader: &mut R, options: TraversalOptions) -> Result<usize, TlvError> {
    let mut total = 0usize;
    iterate(reader, options, |_, _| {
        total += 1;
        HandlerResult::Continue
    })?;
    Ok(total)
}
