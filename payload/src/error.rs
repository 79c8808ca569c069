//! Typed setup payload errors.

use onboard_tlv::element::ElementType;
use onboard_tlv::error::{DecodeError, TlvError};

/// Failure to validate, encode, or read a setup payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The payload cannot be expressed as a manual pairing code.
    InvalidManualCode { detail: String },
    /// The TLV element holding the payload is not a structure.
    NotAStructure { found: ElementType },
    /// A required context-tagged field is absent.
    MissingField { tag: u8 },
    /// A field value does not fit its target width.
    FieldOutOfRange { tag: u8, value: u64 },
    /// The TLV stream could not be traversed.
    Tlv(TlvError),
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidManualCode { detail } => {
                write!(f, "payload not encodable as manual code: {detail}")
            }
            Self::NotAStructure { found } => write!(f, "expected structure, found {found}"),
            Self::MissingField { tag } => write!(f, "missing field ctx:{tag}"),
            Self::FieldOutOfRange { tag, value } => {
                write!(f, "field ctx:{tag} value {value} out of range")
            }
            Self::Tlv(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tlv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TlvError> for PayloadError {
    fn from(e: TlvError) -> Self {
        Self::Tlv(e)
    }
}

impl From<DecodeError> for PayloadError {
    fn from(e: DecodeError) -> Self {
        Self::Tlv(TlvError::Decode(e))
    }
}
