//! Shared helpers for the traversal lock tests and the `traversal_fixture`
//! binary.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
