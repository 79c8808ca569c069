//! Manual pairing code: the decimal string a user types to pair a device.
//!
//! ```text
//! short   = custom_flow | pin << 1 | discriminator << 28     (u32)
//! code    = pad10(short)                                    (no custom flow)
//!         | pad10(short) pad5(vendor_id) pad5(product_id)   (custom flow)
//! ```

use crate::error::PayloadError;
use crate::setup::{
    SetupPayload, MANUAL_PRODUCT_ID_CHARS, MANUAL_SHORT_CODE_CHARS, MANUAL_VENDOR_ID_CHARS,
    SETUP_PIN_CODE_FIELD_BITS,
};

/// Renders a [`SetupPayload`] as a manual pairing code.
#[derive(Debug, Clone, Copy)]
pub struct ManualCodeGenerator {
    payload: SetupPayload,
}

impl ManualCodeGenerator {
    #[must_use]
    pub fn new(payload: SetupPayload) -> Self {
        Self { payload }
    }

    /// The 10- or 20-digit manual code.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::InvalidManualCode`] if the payload fails
    /// [`SetupPayload::validate_manual_code`].
    pub fn decimal_string(&self) -> Result<String, PayloadError> {
        self.payload.validate_manual_code()?;

        let mut code = pad_decimal(
            u64::from(short_representation(&self.payload)),
            MANUAL_SHORT_CODE_CHARS,
        );
        if self.payload.requires_custom_flow {
            code.push_str(&pad_decimal(
                u64::from(self.payload.vendor_id),
                MANUAL_VENDOR_ID_CHARS,
            ));
            code.push_str(&pad_decimal(
                u64::from(self.payload.product_id),
                MANUAL_PRODUCT_ID_CHARS,
            ));
        }
        Ok(code)
    }
}

/// Pack flow bit, pin and discriminator. Caller has validated field widths.
fn short_representation(payload: &SetupPayload) -> u32 {
    let mut offset = 1;
    let mut result = u32::from(payload.requires_custom_flow);
    result |= payload.setup_pin_code << offset;
    offset += SETUP_PIN_CODE_FIELD_BITS;
    result |= u32::from(payload.discriminator) << offset;
    result
}

fn pad_decimal(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}
