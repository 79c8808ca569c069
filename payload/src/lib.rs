//! Onboard Payload: device setup payloads for commissioning.
//!
//! - [`setup::SetupPayload`] -- the commissioning fields and their limits
//! - [`manual::ManualCodeGenerator`] -- the decimal manual pairing code
//! - [`from_tlv`] -- read a payload out of a TLV structure
//!
//! Depends only on `onboard_tlv`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod from_tlv;
pub mod manual;
pub mod setup;
