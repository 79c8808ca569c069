//! Onboard Tools: JSON fixtures, element rendering, and the `tlv_inspect` CLI.
//!
//! - [`fixture`] -- element trees described in JSON, loaded as token readers
//! - [`render`] -- one text line per visited element
//! - [`inspect`] -- argv parsing and the command runner behind `tlv_inspect`

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod fixture;
pub mod inspect;
pub mod render;
