//! Traversal engine: depth-first, pre-order walk over a cursor's scope.
//!
//! # State machine
//!
//! ```text
//! Ready ─► Scanning ─► ElementVisited ─► Recursing ─┐
//!             ▲              │                      │
//!             └──────────────┴──────────────────────┘
//!
//! terminal: Done (scope exhausted) | Stopped (handler) | Failed (error)
//! ```
//!
//! Nesting is tracked on an explicit stack, never on the call stack, and is
//! bounded by [`TraversalOptions::max_depth`]. Errors from the cursor or the
//! handler are returned exactly as raised.

use crate::element::ElementType;
use crate::error::TlvError;
use crate::reader::{Advance, TlvReader};
use crate::utilities::options::TraversalOptions;

/// Handler verdict for one visited element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResult {
    /// Keep walking.
    Continue,
    /// Terminate now; the cursor stays on the current element.
    Stop,
    /// Terminate now and return this error unchanged.
    Error(TlvError),
}

/// Where a [`Traversal`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalState {
    Ready,
    Scanning,
    ElementVisited,
    Recursing,
    Done,
    Stopped,
    Failed,
}

impl TraversalState {
    /// `Done`, `Stopped` and `Failed` have no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Stopped | Self::Failed)
    }
}

/// How a successful traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The scope was exhausted.
    Done,
    /// The handler returned [`HandlerResult::Stop`] on an element at `depth`.
    Stopped { depth: usize },
}

/// Audit record of a successful traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterateOutcome {
    pub termination: Termination,
    /// Handler invocations made.
    pub visited: usize,
    /// Greatest depth at which the handler was invoked.
    pub deepest: usize,
}

impl IterateOutcome {
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        matches!(self.termination, Termination::Stopped { .. })
    }
}

/// One traversal over a borrowed cursor.
///
/// Most callers want [`iterate`]. `Traversal` exists for callers that need
/// to observe the engine state after the run.
pub struct Traversal<'r, R: TlvReader> {
    reader: &'r mut R,
    options: TraversalOptions,
    state: TraversalState,
    /// Types of the containers entered by this traversal, innermost last.
    open: Vec<ElementType>,
    visited: usize,
    deepest: usize,
}

impl<'r, R: TlvReader> Traversal<'r, R> {
    /// Prepare a traversal of the scope `reader` is positioned in.
    #[must_use]
    pub fn new(reader: &'r mut R, options: TraversalOptions) -> Self {
        Self {
            reader,
            options,
            state: TraversalState::Ready,
            open: Vec::new(),
            visited: 0,
            deepest: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> TraversalState {
        self.state
    }

    /// The driven cursor, as the traversal left it.
    #[must_use]
    pub fn reader(&self) -> &R {
        self.reader
    }

    /// Number of containers this traversal currently has open.
    #[must_use]
    pub fn open_depth(&self) -> usize {
        self.open.len()
    }

    /// Run to a terminal state, invoking `handler` once per element.
    ///
    /// # Errors
    ///
    /// - [`TlvError::Decode`] for any cursor fault.
    /// - [`TlvError::MaxDepthExceeded`] when entering a container would
    ///   exceed `max_depth`.
    /// - Whatever the handler returned in [`HandlerResult::Error`].
    /// - [`TlvError::TraversalFinished`] if this traversal already ran.
    pub fn run<H>(&mut self, mut handler: H) -> Result<IterateOutcome, TlvError>
    where
        H: FnMut(&R, usize) -> HandlerResult,
    {
        if self.state.is_terminal() {
            return Err(TlvError::TraversalFinished);
        }
        match self.drive(&mut handler) {
            Ok(termination) => {
                self.state = match termination {
                    Termination::Done => TraversalState::Done,
                    Termination::Stopped { .. } => TraversalState::Stopped,
                };
                Ok(IterateOutcome {
                    termination,
                    visited: self.visited,
                    deepest: self.deepest,
                })
            }
            Err(e) => {
                self.state = TraversalState::Failed;
                Err(e)
            }
        }
    }

    fn drive<H>(&mut self, handler: &mut H) -> Result<Termination, TlvError>
    where
        H: FnMut(&R, usize) -> HandlerResult,
    {
        loop {
            self.state = TraversalState::Scanning;
            if self.reader.next()? == Advance::EndOfScope {
                if self.open.pop().is_none() {
                    return Ok(Termination::Done);
                }
                self.reader.exit_container()?;
                continue;
            }

            let depth = self.open.len();
            self.visited += 1;
            self.deepest = self.deepest.max(depth);
            self.state = TraversalState::ElementVisited;
            match handler(&*self.reader, depth) {
                HandlerResult::Continue => {}
                HandlerResult::Stop => return Ok(Termination::Stopped { depth }),
                HandlerResult::Error(e) => return Err(e),
            }

            let element_type = self.reader.element_type();
            if self.options.recurse && element_type.is_container() {
                if depth + 1 > self.options.max_depth {
                    return Err(TlvError::MaxDepthExceeded {
                        limit: self.options.max_depth,
                    });
                }
                self.reader.enter_container()?;
                self.open.push(element_type);
                self.state = TraversalState::Recursing;
            }
        }
    }
}

/// Visit every element of the current scope in document order.
///
/// The cursor is left wherever the traversal ended: past the scope on
/// `Done`, on the stopping element on `Stopped`, at the fault on error.
///
/// # Errors
///
/// See [`Traversal::run`].
pub fn iterate<R, H>(
    reader: &mut R,
    options: TraversalOptions,
    handler: H,
) -> Result<IterateOutcome, TlvError>
where
    R: TlvReader,
    H: FnMut(&R, usize) -> HandlerResult,
{
    Traversal::new(reader, options).run(handler)
}
