//! Read a [`SetupPayload`] out of a TLV structure.
//!
//! # Layout
//!
//! ```text
//! Structure {
//!   ctx:0  uint  version               (optional, default 0)
//!   ctx:1  uint  vendor_id
//!   ctx:2  uint  product_id
//!   ctx:3  bool  requires_custom_flow  (optional, default false)
//!   ctx:4  uint  discriminator
//!   ctx:5  uint  setup_pin_code
//! }
//! ```
//!
//! Members may appear in any order; unknown members are ignored. Each field
//! is located with a flat tag search on its own snapshot of the structure's
//! inner scope, so the caller's cursor is never moved.

use onboard_tlv::element::{ElementType, Tag};
use onboard_tlv::reader::TlvReader;
use onboard_tlv::utilities::{find_tag, TraversalOptions};

use crate::error::PayloadError;
use crate::setup::SetupPayload;

pub const TAG_VERSION: u8 = 0;
pub const TAG_VENDOR_ID: u8 = 1;
pub const TAG_PRODUCT_ID: u8 = 2;
pub const TAG_CUSTOM_FLOW: u8 = 3;
pub const TAG_DISCRIMINATOR: u8 = 4;
pub const TAG_SETUP_PIN_CODE: u8 = 5;

impl SetupPayload {
    /// Decode the structure under `reader`.
    ///
    /// # Errors
    ///
    /// - [`PayloadError::NotAStructure`] if the element is not a structure.
    /// - [`PayloadError::MissingField`] for an absent required field.
    /// - [`PayloadError::FieldOutOfRange`] if a value exceeds its field width.
    /// - [`PayloadError::Tlv`] for decoding faults and type mismatches.
    pub fn from_tlv<R: TlvReader>(reader: &R) -> Result<Self, PayloadError> {
        let found = reader.element_type();
        if found != ElementType::Structure {
            return Err(PayloadError::NotAStructure { found });
        }
        let mut scope = reader.snapshot();
        scope.enter_container()?;

        let version = match field(&scope, TAG_VERSION)? {
            Some(r) => narrow::<u8>(TAG_VERSION, r.get_u64()?)?,
            None => 0,
        };
        let requires_custom_flow = match field(&scope, TAG_CUSTOM_FLOW)? {
            Some(r) => r.get_bool()?,
            None => false,
        };

        Ok(Self {
            version,
            vendor_id: required_uint(&scope, TAG_VENDOR_ID)?,
            product_id: required_uint(&scope, TAG_PRODUCT_ID)?,
            requires_custom_flow,
            discriminator: required_uint(&scope, TAG_DISCRIMINATOR)?,
            setup_pin_code: required_uint(&scope, TAG_SETUP_PIN_CODE)?,
        })
    }
}

/// Locate `ctx:tag` among the immediate members of `scope`.
fn field<R: TlvReader>(scope: &R, tag: u8) -> Result<Option<R>, PayloadError> {
    let mut cursor = scope.snapshot();
    let outcome = find_tag(&mut cursor, Tag::context(tag), TraversalOptions::flat())?;
    Ok(outcome.found().map(|found| found.reader))
}

fn required_uint<R, T>(scope: &R, tag: u8) -> Result<T, PayloadError>
where
    R: TlvReader,
    T: TryFrom<u64>,
{
    let reader = field(scope, tag)?.ok_or(PayloadError::MissingField { tag })?;
    narrow(tag, reader.get_u64()?)
}

fn narrow<T: TryFrom<u64>>(tag: u8, value: u64) -> Result<T, PayloadError> {
    T::try_from(value).map_err(|_| PayloadError::FieldOutOfRange { tag, value })
}
