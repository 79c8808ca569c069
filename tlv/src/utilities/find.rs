//! Search: locate an element by tag or by predicate.
//!
//! A match is returned as an independent snapshot cursor positioned on the
//! element. "Not found" is an outcome, never an error, so callers can tell
//! absent data from corrupt data.

use std::collections::VecDeque;

use crate::element::Tag;
use crate::error::TlvError;
use crate::reader::TlvReader;
use crate::utilities::iterate::{iterate, HandlerResult, Termination};
use crate::utilities::options::TraversalOptions;

/// A located element.
#[derive(Debug, Clone)]
pub struct Found<R> {
    /// Snapshot cursor positioned on the element. Independent of the cursor
    /// the search was driven with.
    pub reader: R,
    /// Depth of the element relative to the searched scope.
    pub depth: usize,
}

/// Result of a search.
#[derive(Debug, Clone)]
pub enum FindOutcome<R> {
    Found(Found<R>),
    NotFound,
}

impl<R> FindOutcome<R> {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The match, if any.
    #[must_use]
    pub fn found(self) -> Option<Found<R>> {
        match self {
            Self::Found(found) => Some(found),
            Self::NotFound => None,
        }
    }
}

/// Find the first element, in pre-order, for which `predicate` returns
/// [`HandlerResult::Stop`].
///
/// `Continue` keeps searching; `Error` aborts and is returned unchanged.
/// The driving cursor is left on the match, or past the scope if none.
///
/// # Errors
///
/// Cursor faults, depth-limit faults, and predicate errors.
pub fn find<R, P>(
    reader: &mut R,
    options: TraversalOptions,
    predicate: P,
) -> Result<FindOutcome<R>, TlvError>
where
    R: TlvReader,
    P: FnMut(&R, usize) -> HandlerResult,
{
    let outcome = iterate(reader, options, predicate)?;
    Ok(match outcome.termination {
        Termination::Stopped { depth } => FindOutcome::Found(Found {
            reader: reader.snapshot(),
            depth,
        }),
        Termination::Done => FindOutcome::NotFound,
    })
}

/// Find the first element, in pre-order, whose tag equals `tag` exactly.
///
/// Pre-order means a matching container wins over its matching descendants,
/// and a nested match earlier in the document wins over a later shallower
/// one. Use [`find_shallowest`] for the latter.
///
/// # Errors
///
/// Cursor faults and depth-limit faults.
pub fn find_tag<R: TlvReader>(
    reader: &mut R,
    tag: Tag,
    options: TraversalOptions,
) -> Result<FindOutcome<R>, TlvError> {
    find(reader, options, |r, _| {
        if r.tag() == tag {
            HandlerResult::Stop
        } else {
            HandlerResult::Continue
        }
    })
}

/// Find the element tagged `tag` with the smallest depth; ties go to the
/// earliest in document order.
///
/// Scans level by level. Each container met on one level is queued as a
/// snapshot already entered, so nothing is rewound or copied beyond the
/// cursor positions. The driving cursor only walks the top level.
///
/// With `recurse == false` this is [`find_tag`].
///
/// # Errors
///
/// Cursor faults. [`TlvError::MaxDepthExceeded`] if no match exists within
/// `max_depth` levels and the data nests deeper.
pub fn find_shallowest<R: TlvReader>(
    reader: &mut R,
    tag: Tag,
    options: TraversalOptions,
) -> Result<FindOutcome<R>, TlvError> {
    if !options.recurse {
        return find_tag(reader, tag, options);
    }

    let mut pending: VecDeque<(R, usize)> = VecDeque::new();
    if let Some(found) = scan_level(reader, tag, 0, &mut pending)? {
        return Ok(FindOutcome::Found(found));
    }
    while let Some((mut scope, depth)) = pending.pop_front() {
        if depth > options.max_depth {
            return Err(TlvError::MaxDepthExceeded {
                limit: options.max_depth,
            });
        }
        if let Some(found) = scan_level(&mut scope, tag, depth, &mut pending)? {
            return Ok(FindOutcome::Found(found));
        }
    }
    Ok(FindOutcome::NotFound)
}

/// Flat scan of one scope. Containers are queued, entered, for the next level.
fn scan_level<R: TlvReader>(
    scope: &mut R,
    tag: Tag,
    depth: usize,
    pending: &mut VecDeque<(R, usize)>,
) -> Result<Option<Found<R>>, TlvError> {
    let outcome = iterate(scope, TraversalOptions::flat(), |r, _| {
        if r.tag() == tag {
            return HandlerResult::Stop;
        }
        if r.element_type().is_container() {
            let mut inner = r.snapshot();
            if let Err(e) = inner.enter_container() {
                return HandlerResult::Error(e.into());
            }
            pending.push_back((inner, depth + 1));
        }
        HandlerResult::Continue
    })?;
    Ok(match outcome.termination {
        Termination::Stopped { .. } => Some(Found {
            reader: scope.snapshot(),
            depth,
        }),
        Termination::Done => None,
    })
}
