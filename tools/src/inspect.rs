//! `tlv_inspect`: command line definition and the command runner.
//!
//! ```text
//! tlv_inspect <FIXTURE> <COMMAND> [--flat] [--max-depth N]
//!
//! COMMAND:  count | dump | find --tag T | shallowest --tag T | payload
//! T:        N (context tag 0..=255) | P:N (profile P, tag number N)
//! ```
//!
//! Output is deterministic `key=value` lines (and rendered element lines for
//! `dump`), so runs can be compared byte for byte.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use onboard_payload::error::PayloadError;
use onboard_payload::manual::ManualCodeGenerator;
use onboard_payload::setup::SetupPayload;
use onboard_tlv::element::Tag;
use onboard_tlv::error::TlvError;
use onboard_tlv::reader::{Advance, TlvReader};
use onboard_tlv::utilities::{
    count, find_shallowest, find_tag, FindOutcome, Termination, TraversalOptions,
    DEFAULT_MAX_DEPTH,
};

use crate::fixture::{load_reader, FixtureError};
use crate::render::{render_element, render_scope};

/// Traverse, count, and search a JSON TLV fixture.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "tlv_inspect")]
pub struct InspectConfig {
    /// JSON fixture describing the element tree.
    pub fixture: PathBuf,
    #[command(subcommand)]
    pub command: InspectCommand,
    /// Visit only the top-level scope.
    #[arg(long, global = true)]
    pub flat: bool,
    /// Deepest container nesting a traversal may enter.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// What to do with the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum InspectCommand {
    /// Count elements.
    Count,
    /// Render every visited element.
    Dump,
    /// First match in document order.
    Find {
        #[arg(long, value_parser = parse_tag)]
        tag: Tag,
    },
    /// Match at the smallest depth.
    Shallowest {
        #[arg(long, value_parser = parse_tag)]
        tag: Tag,
    },
    /// Decode the first element as a setup payload and print its manual code.
    Payload,
}

impl InspectConfig {
    #[must_use]
    pub fn options(&self) -> TraversalOptions {
        TraversalOptions {
            recurse: !self.flat,
            max_depth: self.max_depth,
        }
    }
}

/// Failure running an inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectError {
    Fixture(FixtureError),
    Tlv(TlvError),
    Payload(PayloadError),
    /// `payload` on a fixture with no top-level element.
    EmptyFixture,
}

impl std::fmt::Display for InspectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixture(e) => write!(f, "{e}"),
            Self::Tlv(e) => write!(f, "{e}"),
            Self::Payload(e) => write!(f, "payload error: {e}"),
            Self::EmptyFixture => write!(f, "fixture has no elements"),
        }
    }
}

impl std::error::Error for InspectError {}

impl From<FixtureError> for InspectError {
    fn from(e: FixtureError) -> Self {
        Self::Fixture(e)
    }
}

impl From<TlvError> for InspectError {
    fn from(e: TlvError) -> Self {
        Self::Tlv(e)
    }
}

impl From<PayloadError> for InspectError {
    fn from(e: PayloadError) -> Self {
        Self::Payload(e)
    }
}

/// `N` is a context tag, `P:N` a profile tag.
fn parse_tag(text: &str) -> Result<Tag, String> {
    let invalid = || format!("expected N (0..=255) or PROFILE:NUM, got \"{text}\"");
    match text.split_once(':') {
        Some((profile, num)) => {
            let profile = profile.parse().map_err(|_| invalid())?;
            let num = num.parse().map_err(|_| invalid())?;
            Ok(Tag::profile(profile, num))
        }
        None => text.parse().map(Tag::context).map_err(|_| invalid()),
    }
}

/// Load the fixture and run the command, returning the output lines.
///
/// # Errors
///
/// Returns [`InspectError`] on fixture, traversal, or payload failure.
pub fn run(config: &InspectConfig) -> Result<Vec<String>, InspectError> {
    let mut reader = load_reader(&config.fixture)?;
    let options = config.options();
    let mut lines = Vec::new();

    match config.command {
        InspectCommand::Count => {
            let total = count(&mut reader, options)?;
            lines.push(format!("count={total}"));
        }
        InspectCommand::Dump => {
            let (rendered, outcome) = render_scope(&mut reader, options)?;
            lines.extend(rendered);
            lines.push(format!("visited={}", outcome.visited));
            lines.push(format!("deepest={}", outcome.deepest));
            let termination = match outcome.termination {
                Termination::Done => "done",
                Termination::Stopped { .. } => "stopped",
            };
            lines.push(format!("termination={termination}"));
        }
        InspectCommand::Find { tag } => {
            let outcome = find_tag(&mut reader, tag, options)?;
            push_find_lines(&mut lines, outcome)?;
        }
        InspectCommand::Shallowest { tag } => {
            let outcome = find_shallowest(&mut reader, tag, options)?;
            push_find_lines(&mut lines, outcome)?;
        }
        InspectCommand::Payload => {
            if reader.next().map_err(TlvError::from)? == Advance::EndOfScope {
                return Err(InspectError::EmptyFixture);
            }
            let payload = SetupPayload::from_tlv(&reader)?;
            lines.push(format!("version={}", payload.version));
            lines.push(format!("vendor_id={}", payload.vendor_id));
            lines.push(format!("product_id={}", payload.product_id));
            lines.push(format!("custom_flow={}", payload.requires_custom_flow));
            lines.push(format!("discriminator={}", payload.discriminator));
            let code = ManualCodeGenerator::new(payload).decimal_string()?;
            lines.push(format!("manual_code={code}"));
        }
    }
    Ok(lines)
}

fn push_find_lines<R: TlvReader>(
    lines: &mut Vec<String>,
    outcome: FindOutcome<R>,
) -> Result<(), InspectError> {
    match outcome {
        FindOutcome::Found(found) => {
            lines.push("found=true".into());
            lines.push(format!("depth={}", found.depth));
            let element = render_element(&found.reader).map_err(TlvError::from)?;
            lines.push(format!("element={element}"));
        }
        FindOutcome::NotFound => lines.push("found=false".into()),
    }
    Ok(())
}
