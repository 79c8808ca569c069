//! `SetupPayload`: the fields a device advertises for commissioning.
//!
//! # Manual code field widths
//!
//! | Field                  | Bits |
//! |------------------------|------|
//! | `requires_custom_flow` | 1    |
//! | `setup_pin_code`       | 27   |
//! | `discriminator`        | 4    |
//!
//! The three pack into one `u32`. Vendor and product ids are appended in
//! decimal only when the custom flow bit is set.

use crate::error::PayloadError;

pub const SETUP_PIN_CODE_FIELD_BITS: u32 = 27;
pub const MANUAL_DISCRIMINATOR_FIELD_BITS: u32 = 4;

/// Decimal width of the packed short code.
pub const MANUAL_SHORT_CODE_CHARS: usize = 10;
/// Decimal width of each of vendor id and product id.
pub const MANUAL_VENDOR_ID_CHARS: usize = 5;
pub const MANUAL_PRODUCT_ID_CHARS: usize = 5;

/// Commissioning metadata for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetupPayload {
    pub version: u8,
    pub vendor_id: u16,
    pub product_id: u16,
    /// The device needs vendor-specific steps before pairing.
    pub requires_custom_flow: bool,
    pub discriminator: u16,
    pub setup_pin_code: u32,
}

impl SetupPayload {
    /// Check the fields fit the manual code layout.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::InvalidManualCode`] for a zero or oversized
    /// pin code, or a discriminator wider than the manual code allows.
    pub fn validate_manual_code(&self) -> Result<(), PayloadError> {
        if self.setup_pin_code == 0 {
            return Err(PayloadError::InvalidManualCode {
                detail: "setup pin code is zero".into(),
            });
        }
        if self.setup_pin_code >= 1 << SETUP_PIN_CODE_FIELD_BITS {
            return Err(PayloadError::InvalidManualCode {
                detail: format!(
                    "setup pin code {} exceeds {SETUP_PIN_CODE_FIELD_BITS} bits",
                    self.setup_pin_code
                ),
            });
        }
        if u32::from(self.discriminator) >= 1 << MANUAL_DISCRIMINATOR_FIELD_BITS {
            return Err(PayloadError::InvalidManualCode {
                detail: format!(
                    "discriminator {} exceeds {MANUAL_DISCRIMINATOR_FIELD_BITS} bits",
                    self.discriminator
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn is_valid_manual_code(&self) -> bool {
        self.validate_manual_code().is_ok()
    }
}
