//! Binary that loads a JSON TLV fixture, runs every traversal utility over
//! it, and prints deterministic output lines for cross-process verification.
//!
//! Usage: `traversal_fixture <fixture.json>`
//!
//! Output: key=value lines. A failed operation prints `error:<message>` as
//! its value. `tags=` is the number of distinct tags reached; when the walk
//! faults, the tags seen before the fault are still searched. Per-tag
//! search lines follow, ordered by raw tag value:
//!
//! ```text
//! find[ctx:3]=1          depth of the first pre-order match
//! shallowest[ctx:3]=1    depth of the shallowest match
//! ```

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::PathBuf;

use lock_tests::traversal_helpers::lines_digest;
use onboard_tlv::element::Tag;
use onboard_tlv::error::TlvError;
use onboard_tlv::reader::TlvReader;
use onboard_tlv::token::TokenReader;
use onboard_tlv::utilities::{
    count, find_shallowest, find_tag, iterate, FindOutcome, HandlerResult, Termination,
    TraversalOptions,
};
use onboard_tools::fixture::load_reader;
use onboard_tools::render::render_scope;

fn value_or_error<T: Display>(result: Result<T, TlvError>) -> String {
    match result {
        Ok(v) => v.to_string(),
        Err(e) => format!("error:{e}"),
    }
}

fn found_depth(result: Result<FindOutcome<TokenReader>, TlvError>) -> String {
    match result {
        Ok(FindOutcome::Found(found)) => found.depth.to_string(),
        Ok(FindOutcome::NotFound) => "none".into(),
        Err(e) => format!("error:{e}"),
    }
}

fn main() {
    let path: PathBuf = std::env::args()
        .nth(1)
        .expect("usage: traversal_fixture <fixture.json>")
        .into();
    let pristine = load_reader(&path).expect("fixture loads");
    let recursive = TraversalOptions::recursive();

    println!(
        "flat_count={}",
        value_or_error(count(&mut pristine.snapshot(), TraversalOptions::flat()))
    );
    println!(
        "recursive_count={}",
        value_or_error(count(&mut pristine.snapshot(), recursive))
    );

    match render_scope(&mut pristine.snapshot(), recursive) {
        Ok((lines, outcome)) => {
            let termination = match outcome.termination {
                Termination::Done => "done",
                Termination::Stopped { .. } => "stopped",
            };
            println!("visited={}", outcome.visited);
            println!("deepest={}", outcome.deepest);
            println!("termination={termination}");
            println!("dump_digest={}", lines_digest(&lines));
        }
        Err(e) => println!("dump=error:{e}"),
    }

    // Every tag reached before the end of the data or the first fault.
    let mut tags: BTreeMap<u64, Tag> = BTreeMap::new();
    let collected = iterate(&mut pristine.snapshot(), recursive, |r, _| {
        let tag = r.tag();
        tags.insert(tag.raw(), tag);
        HandlerResult::Continue
    });
    println!("tags={}", value_or_error(collected.map(|_| tags.len())));

    for tag in tags.values() {
        println!(
            "find[{tag}]={}",
            found_depth(find_tag(&mut pristine.snapshot(), *tag, recursive))
        );
        println!(
            "shallowest[{tag}]={}",
            found_depth(find_shallowest(&mut pristine.snapshot(), *tag, recursive))
        );
    }
}
