//! Element renderer: one text line per visited element.
//!
//! ```text
//! ctx:1 int 5
//! ctx:2 structure
//!   ctx:3 int 7
//! ```
//!
//! Two spaces of indent per depth level. Byte strings render as lowercase
//! hex, strings as JSON string literals.

use onboard_tlv::element::ElementType;
use onboard_tlv::error::{DecodeError, TlvError};
use onboard_tlv::reader::TlvReader;
use onboard_tlv::utilities::{iterate, HandlerResult, IterateOutcome, TraversalOptions};

/// Render the element under `reader`, without indentation.
///
/// # Errors
///
/// Returns [`DecodeError`] if the value cannot be read as its own type.
pub fn render_element<R: TlvReader>(reader: &R) -> Result<String, DecodeError> {
    let element_type = reader.element_type();
    let head = format!("{} {element_type}", reader.tag());
    let value = match element_type {
        ElementType::SignedInteger => reader.get_i64()?.to_string(),
        ElementType::UnsignedInteger => reader.get_u64()?.to_string(),
        ElementType::Boolean => reader.get_bool()?.to_string(),
        ElementType::FloatingPoint => reader.get_f64()?.to_string(),
        ElementType::Utf8String => serde_json::Value::from(reader.get_str()?).to_string(),
        ElementType::ByteString => hex::encode(reader.get_bytes()?),
        ElementType::Null | ElementType::Structure | ElementType::Array | ElementType::List => {
            return Ok(head);
        }
    };
    Ok(format!("{head} {value}"))
}

/// Render every element of the current scope.
///
/// # Errors
///
/// Any traversal error, including value decoding faults.
pub fn render_scope<R: TlvReader>(
    reader: &mut R,
    options: TraversalOptions,
) -> Result<(Vec<String>, IterateOutcome), TlvError> {
    let mut lines = Vec::new();
    let outcome = iterate(reader, options, |r, depth| match render_element(r) {
        Ok(line) => {
            lines.push(format!("{}{line}", "  ".repeat(depth)));
            HandlerResult::Continue
        }
        Err(e) => HandlerResult::Error(e.into()),
    })?;
    Ok((lines, outcome))
}
