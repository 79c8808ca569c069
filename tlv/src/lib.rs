//! Onboard TLV: traversal, counting and search over tag-length-value streams.
//!
//! # API Surface
//!
//! - [`reader::TlvReader`] -- the forward-only cursor contract
//! - [`utilities::iterate`] -- depth-first, pre-order walk with a handler
//! - [`utilities::count`] -- element count, flat or recursive
//! - [`utilities::find_tag`] / [`utilities::find`] -- first match, pre-order
//! - [`utilities::find_shallowest`] -- match at the smallest depth
//!
//! [`token::TokenReader`] implements the cursor over decoded tokens held in
//! memory. Byte-level decoding is out of scope for this crate.
//!
//! # Module Dependency Direction
//!
//! `element` ← `error` ← `reader` ← `token`, `utilities`
//!
//! `utilities` depends only on the `TlvReader` trait, never on `token`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod element;
pub mod error;
pub mod reader;
pub mod token;
pub mod utilities;
