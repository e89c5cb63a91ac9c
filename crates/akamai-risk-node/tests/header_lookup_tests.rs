//! Integration tests for locating the risk header in a request.

mod common;

use akamai_risk_classifier::{RiskTier, ThresholdConfig};
use akamai_risk_node::{AkamaiRiskNode, InMemoryNodeState, risk_header};

#[test]
fn header_lookup_tests_matches_name_case_insensitively() {
    let headers = common::request_headers("akamai-user-risk", "score=1");
    assert_eq!(risk_header(headers.iter().copied()), Some("score=1"));

    let headers = common::request_headers("AKAMAI-USER-RISK", "score=2");
    assert_eq!(risk_header(headers.iter().copied()), Some("score=2"));
}

#[test]
fn header_lookup_tests_first_value_wins() {
    let headers = vec![
        ("Akamai-User-Risk", "score=10"),
        ("Akamai-User-Risk", "score=99"),
    ];
    assert_eq!(risk_header(headers), Some("score=10"));
}

#[test]
fn header_lookup_tests_process_request_routes_by_tier() {
    common::init_tracing();
    let node = AkamaiRiskNode::new(ThresholdConfig::default());
    let mut state = InMemoryNodeState::new();

    let headers = common::request_headers("Akamai-User-Risk", common::FIXTURE_HEADER);
    assert_eq!(
        node.process_request(headers.iter().copied(), &mut state),
        RiskTier::High
    );

    let without = common::request_headers("X-Other", "score=1");
    assert_eq!(
        node.process_request(without.iter().copied(), &mut state),
        RiskTier::ClientError
    );
}

#[test]
fn header_lookup_tests_outcome_ids_are_complete() {
    assert_eq!(
        AkamaiRiskNode::outcomes(),
        vec!["low", "medium", "high", "critical", "clientError"]
    );
}
