//! Traversal properties checked against the checked-in JSON fixtures.
//!
//! Unit tests in `onboard-tlv` cover the engine on hand-built token streams;
//! these run the same properties end to end through the fixture loader.

use lock_tests::traversal_helpers::{fixture_reader, visits};
use onboard_payload::manual::ManualCodeGenerator;
use onboard_payload::setup::SetupPayload;
use onboard_tlv::element::{ElementType, Tag};
use onboard_tlv::error::{DecodeError, TlvError};
use onboard_tlv::reader::{Advance, TlvReader};
use onboard_tlv::token::TokenReader;
use onboard_tlv::utilities::{
    count, find, find_shallowest, find_tag, iterate, HandlerResult, Termination,
    TraversalOptions,
};
use onboard_tools::fixture::parse_fixture;

const FIXTURES: &[&str] = &["scenario.json", "nested.json", "payload.json"];

fn reader_from(json: &str) -> TokenReader {
    TokenReader::new(parse_fixture(json.as_bytes()).unwrap())
}

#[test]
fn flat_invocations_equal_flat_count() {
    for name in FIXTURES {
        let seen = visits(&mut fixture_reader(name), TraversalOptions::flat()).unwrap();
        let total = count(&mut fixture_reader(name), TraversalOptions::flat()).unwrap();
        assert_eq!(seen.len(), total, "{name}");
        assert!(seen.iter().all(|&(_, depth)| depth == 0), "{name}");
    }
}

#[test]
fn recursive_invocations_equal_recursive_count() {
    for name in FIXTURES {
        let seen = visits(&mut fixture_reader(name), TraversalOptions::recursive()).unwrap();
        let total = count(&mut fixture_reader(name), TraversalOptions::recursive()).unwrap();
        assert_eq!(seen.len(), total, "{name}");
    }
}

#[test]
fn wrapping_adds_exactly_one() {
    let leaves = r#"[{"int": 1}, {"uint": 2}, {"string": "three"}, {"null": null}]"#;
    let wrapped = r#"[{"list": [{"int": 1}, {"uint": 2}, {"string": "three"}, {"null": null}]}]"#;
    let bare = count(&mut reader_from(leaves), TraversalOptions::recursive()).unwrap();
    let outer = count(&mut reader_from(wrapped), TraversalOptions::recursive()).unwrap();
    assert_eq!(bare, 4);
    assert_eq!(outer, bare + 1);
}

#[test]
fn scenario_counts_and_search() {
    assert_eq!(
        count(&mut fixture_reader("scenario.json"), TraversalOptions::flat()).unwrap(),
        2
    );
    assert_eq!(
        count(&mut fixture_reader("scenario.json"), TraversalOptions::recursive()).unwrap(),
        3
    );

    let found = find_tag(
        &mut fixture_reader("scenario.json"),
        Tag::context(3),
        TraversalOptions::recursive(),
    )
    .unwrap()
    .found()
    .expect("ctx:3 is nested in ctx:2");
    assert_eq!(found.reader.get_i64().unwrap(), 7);
    assert_eq!(found.depth, 1);

    let flat = find_tag(
        &mut fixture_reader("scenario.json"),
        Tag::context(3),
        TraversalOptions::flat(),
    )
    .unwrap();
    assert!(!flat.is_found());
}

#[test]
fn preorder_and_shallowest_disagree_on_nested_fixture() {
    let tag = Tag::context(9);
    let first = find_tag(&mut fixture_reader("nested.json"), tag, TraversalOptions::recursive())
        .unwrap()
        .found()
        .unwrap();
    assert_eq!(first.depth, 2);
    assert_eq!(first.reader.get_str().unwrap(), "deep");

    let shallow = find_shallowest(
        &mut fixture_reader("nested.json"),
        tag,
        TraversalOptions::recursive(),
    )
    .unwrap()
    .found()
    .unwrap();
    assert_eq!(shallow.depth, 0);
    assert!(shallow.reader.get_bool().unwrap());
}

#[test]
fn ancestor_found_before_descendant() {
    let json = r#"[{"tag": 4, "structure": [{"tag": 4, "int": 1}]}]"#;
    let found = find_tag(&mut reader_from(json), Tag::context(4), TraversalOptions::recursive())
        .unwrap()
        .found()
        .unwrap();
    assert_eq!(found.depth, 0);
    assert_eq!(found.reader.element_type(), ElementType::Structure);
}

#[test]
fn equal_depth_ties_go_to_document_order() {
    let json = r#"[{"list": [{"tag": 8, "int": 1}]}, {"list": [{"tag": 8, "int": 2}]}]"#;
    for search in [find_tag::<TokenReader>, find_shallowest::<TokenReader>] {
        let found = search(&mut reader_from(json), Tag::context(8), TraversalOptions::recursive())
            .unwrap()
            .found()
            .unwrap();
        assert_eq!(found.reader.get_i64().unwrap(), 1);
    }
}

#[test]
fn empty_container_has_no_child_visits() {
    let seen = visits(
        &mut reader_from(r#"[{"tag": 1, "array": []}]"#),
        TraversalOptions::recursive(),
    )
    .unwrap();
    assert_eq!(seen, vec![(Tag::context(1), 0)]);
}

#[test]
fn stop_on_first_element_is_one_invocation() {
    let mut calls = 0;
    let outcome = iterate(
        &mut fixture_reader("nested.json"),
        TraversalOptions::recursive(),
        |_, _| {
            calls += 1;
            HandlerResult::Stop
        },
    )
    .unwrap();
    assert_eq!(calls, 1);
    assert_eq!(outcome.termination, Termination::Stopped { depth: 0 });
}

#[test]
fn malformed_first_element_fails_before_any_visit() {
    let mut calls = 0;
    let err = iterate(
        &mut reader_from(r#"[{"invalid": "bad control byte"}, {"int": 1}]"#),
        TraversalOptions::recursive(),
        |_, _| {
            calls += 1;
            HandlerResult::Continue
        },
    )
    .unwrap_err();
    assert_eq!(calls, 0);
    assert!(matches!(err, TlvError::Decode(DecodeError::Malformed { .. })));
}

#[test]
fn malformed_fixture_faults_after_earlier_elements() {
    let mut seen = Vec::new();
    let err = iterate(
        &mut fixture_reader("malformed.json"),
        TraversalOptions::recursive(),
        |r, depth| {
            seen.push((r.tag(), depth));
            HandlerResult::Continue
        },
    )
    .unwrap_err();
    assert!(matches!(err, TlvError::Decode(DecodeError::Malformed { .. })));
    assert_eq!(
        seen,
        vec![
            (Tag::context(1), 0),
            (Tag::context(2), 0),
            (Tag::context(3), 1)
        ]
    );
}

#[test]
fn not_found_is_distinct_from_fault() {
    let outcome = find_tag(
        &mut fixture_reader("scenario.json"),
        Tag::context(42),
        TraversalOptions::recursive(),
    )
    .unwrap();
    assert!(!outcome.is_found());

    let err = find_tag(
        &mut fixture_reader("malformed.json"),
        Tag::context(42),
        TraversalOptions::recursive(),
    )
    .unwrap_err();
    assert!(matches!(err, TlvError::Decode(_)));
}

#[test]
fn depth_limit_is_inclusive() {
    // Three nested lists around a leaf: the leaf is at depth 3.
    let json = r#"[{"list": [{"list": [{"list": [{"null": null}]}]}]}]"#;
    let at_limit = TraversalOptions::recursive().with_max_depth(3);
    assert_eq!(count(&mut reader_from(json), at_limit).unwrap(), 4);

    let below = TraversalOptions::recursive().with_max_depth(2);
    assert_eq!(
        count(&mut reader_from(json), below).unwrap_err(),
        TlvError::MaxDepthExceeded { limit: 2 }
    );
}

#[test]
fn found_snapshot_survives_driver_advancing() {
    let mut driver = fixture_reader("nested.json");
    let found = find_tag(&mut driver, Tag::context(2), TraversalOptions::recursive())
        .unwrap()
        .found()
        .unwrap();
    while driver.next().unwrap() == Advance::Element {}
    assert_eq!(found.reader.get_u64().unwrap(), 11);
    assert_eq!(found.reader.tag(), Tag::context(2));
}

#[test]
fn handler_error_is_returned_verbatim() {
    let err = find(
        &mut fixture_reader("nested.json"),
        TraversalOptions::recursive(),
        |r, _| {
            if r.element_type() == ElementType::ByteString {
                HandlerResult::Error(TlvError::rejected(7, "no byte strings"))
            } else {
                HandlerResult::Continue
            }
        },
    )
    .unwrap_err();
    assert_eq!(err, TlvError::rejected(7, "no byte strings"));
}

#[test]
fn payload_fixture_yields_manual_code() {
    let mut reader = fixture_reader("payload.json");
    assert_eq!(reader.next().unwrap(), Advance::Element);
    let payload = SetupPayload::from_tlv(&reader).unwrap();
    assert_eq!(payload.vendor_id, 65521);
    assert_eq!(payload.product_id, 32769);
    assert_eq!(payload.discriminator, 15);
    assert_eq!(payload.setup_pin_code, 20_202_021);
    assert!(!payload.requires_custom_flow);
    assert_eq!(
        ManualCodeGenerator::new(payload).decimal_string().unwrap(),
        "4066935882"
    );
}
