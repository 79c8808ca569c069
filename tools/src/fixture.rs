//! JSON fixtures: element trees described in JSON, flattened to tokens.
//!
//! # Format
//!
//! A fixture is a JSON array: the top-level scope. Each element is an object
//! with an optional `tag` and exactly one kind key:
//!
//! ```text
//! {"tag": 1, "int": -5}                      ctx:1, signed
//! {"tag": {"profile": 9, "num": 2}, "uint": 5}
//! {"bool": true}                             anonymous
//! {"float": 1.5} {"string": "x"} {"null": null}
//! {"bytes": "deadbeef"}                      hex
//! {"tag": 2, "structure": [ ... ]}           also "array", "list"
//! {"invalid": "bad length"}                  decoding fault at this point
//! ```
//!
//! Fail-closed: unknown keys, multiple kind keys, and out-of-range tags are
//! rejected with the JSON path of the offending element.

use std::path::Path;

use onboard_tlv::element::{ContainerKind, Tag, Value};
use onboard_tlv::token::{Token, TokenReader};
use serde_json::{Map, Value as Json};

/// Error loading a fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// I/O error reading the fixture file.
    Io { detail: String },
    /// The file is not valid JSON.
    Json { detail: String },
    /// An element does not follow the fixture format.
    InvalidElement { path: String, detail: String },
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::Json { detail } => write!(f, "fixture JSON error: {detail}"),
            Self::InvalidElement { path, detail } => {
                write!(f, "invalid fixture element at {path}: {detail}")
            }
        }
    }
}

impl std::error::Error for FixtureError {}

const KIND_KEYS: &[&str] = &[
    "int",
    "uint",
    "bool",
    "float",
    "string",
    "bytes",
    "null",
    "structure",
    "array",
    "list",
    "invalid",
];

/// Parse fixture JSON bytes into a token stream.
///
/// # Errors
///
/// Returns [`FixtureError::Json`] for invalid JSON and
/// [`FixtureError::InvalidElement`] for format violations.
pub fn parse_fixture(bytes: &[u8]) -> Result<Vec<Token>, FixtureError> {
    let json: Json = serde_json::from_slice(bytes).map_err(|e| FixtureError::Json {
        detail: e.to_string(),
    })?;
    let elements = json.as_array().ok_or_else(|| FixtureError::InvalidElement {
        path: "$".into(),
        detail: "fixture root must be an array".into(),
    })?;
    let mut tokens = Vec::new();
    flatten_scope(elements, "$", &mut tokens)?;
    Ok(tokens)
}

/// Read and parse a fixture file.
///
/// # Errors
///
/// Returns [`FixtureError::Io`] if the file cannot be read, otherwise as
/// [`parse_fixture`].
pub fn load_fixture(path: &Path) -> Result<Vec<Token>, FixtureError> {
    let bytes = std::fs::read(path).map_err(|e| FixtureError::Io {
        detail: format!("{}: {e}", path.display()),
    })?;
    parse_fixture(&bytes)
}

/// Read a fixture file into a reader positioned before its first element.
///
/// # Errors
///
/// As [`load_fixture`].
pub fn load_reader(path: &Path) -> Result<TokenReader, FixtureError> {
    load_fixture(path).map(TokenReader::new)
}

// serde_json caps nesting at 128 levels, which bounds this recursion.
fn flatten_scope(elements: &[Json], path: &str, out: &mut Vec<Token>) -> Result<(), FixtureError> {
    for (i, element) in elements.iter().enumerate() {
        flatten_element(element, &format!("{path}[{i}]"), out)?;
    }
    Ok(())
}

fn flatten_element(element: &Json, path: &str, out: &mut Vec<Token>) -> Result<(), FixtureError> {
    let obj = element.as_object().ok_or_else(|| invalid(path, "element must be an object"))?;

    for key in obj.keys() {
        if key != "tag" && !KIND_KEYS.contains(&key.as_str()) {
            return Err(invalid(path, &format!("unknown key \"{key}\"")));
        }
    }
    let mut kinds = KIND_KEYS.iter().filter(|k| obj.contains_key(**k));
    let Some(&kind) = kinds.next() else {
        return Err(invalid(path, "missing element kind"));
    };
    if let Some(extra) = kinds.next() {
        return Err(invalid(path, &format!("both \"{kind}\" and \"{extra}\" given")));
    }

    let tag = parse_tag(obj, path)?;
    let body = &obj[kind];
    let container = |kind: ContainerKind, out: &mut Vec<Token>| -> Result<(), FixtureError> {
        let members = body
            .as_array()
            .ok_or_else(|| invalid(path, "container members must be an array"))?;
        out.push(Token::start(tag, kind));
        flatten_scope(members, path, out)?;
        out.push(Token::End);
        Ok(())
    };

    match kind {
        "structure" => return container(ContainerKind::Structure, out),
        "array" => return container(ContainerKind::Array, out),
        "list" => return container(ContainerKind::List, out),
        "invalid" => {
            let detail = body.as_str().unwrap_or("invalid element");
            out.push(Token::invalid(detail));
            return Ok(());
        }
        _ => {}
    }

    let value = match kind {
        "int" => Value::Signed(body.as_i64().ok_or_else(|| invalid(path, "int must be an i64"))?),
        "uint" => {
            Value::Unsigned(body.as_u64().ok_or_else(|| invalid(path, "uint must be a u64"))?)
        }
        "bool" => Value::Bool(body.as_bool().ok_or_else(|| invalid(path, "bool must be a boolean"))?),
        "float" => Value::Float(body.as_f64().ok_or_else(|| invalid(path, "float must be a number"))?),
        "string" => Value::Utf8(
            body.as_str()
                .ok_or_else(|| invalid(path, "string must be a string"))?
                .to_string(),
        ),
        "bytes" => {
            let text = body
                .as_str()
                .ok_or_else(|| invalid(path, "bytes must be a hex string"))?;
            Value::Bytes(hex::decode(text).map_err(|e| invalid(path, &format!("bytes: {e}")))?)
        }
        "null" => {
            if !body.is_null() {
                return Err(invalid(path, "null must be null"));
            }
            Value::Null
        }
        other => return Err(invalid(path, &format!("unhandled kind \"{other}\""))),
    };
    out.push(Token::leaf(tag, value));
    Ok(())
}

fn parse_tag(obj: &Map<String, Json>, path: &str) -> Result<Tag, FixtureError> {
    match obj.get("tag") {
        None | Some(Json::Null) => Ok(Tag::ANONYMOUS),
        Some(Json::Number(n)) => {
            let num = n
                .as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .ok_or_else(|| invalid(path, "context tag must be 0..=255"))?;
            Ok(Tag::context(num))
        }
        Some(Json::Object(t)) => {
            let profile = get_u32(t, "profile", path)?;
            let num = get_u32(t, "num", path)?;
            Ok(Tag::profile(profile, num))
        }
        Some(_) => Err(invalid(path, "tag must be a number, an object, or null")),
    }
}

fn get_u32(obj: &Map<String, Json>, key: &str, path: &str) -> Result<u32, FixtureError> {
    obj.get(key)
        .and_then(Json::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| invalid(path, &format!("tag \"{key}\" must be a u32")))
}

fn invalid(path: &str, detail: &str) -> FixtureError {
    FixtureError::InvalidElement {
        path: path.into(),
        detail: detail.into(),
    }
}
