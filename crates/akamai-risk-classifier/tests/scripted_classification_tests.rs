//! Tests the historical three-tier scripted scheme.

use akamai_risk_classifier::scripted::{ScriptedThresholds, ScriptedTier, classify_scripted};

fn tier_of(raw: Option<&str>) -> ScriptedTier {
    classify_scripted(raw, &ScriptedThresholds::default()).tier
}

#[test]
fn scripted_classification_tests_default_boundaries() {
    assert_eq!(tier_of(Some("score=25")), ScriptedTier::Low);
    assert_eq!(tier_of(Some("score=26")), ScriptedTier::Medium);
    assert_eq!(tier_of(Some("score=50")), ScriptedTier::Medium);
    assert_eq!(tier_of(Some("score=51")), ScriptedTier::High);
}

#[test]
fn scripted_classification_tests_absent_header_is_noscore() {
    let outcome = classify_scripted(None, &ScriptedThresholds::default());
    assert_eq!(outcome.tier, ScriptedTier::NoScore);
    assert!(outcome.diagnostic.is_none());
}

#[test]
fn scripted_classification_tests_malformed_score_is_client_error() {
    let outcome = classify_scripted(Some("score=abc"), &ScriptedThresholds::default());
    assert_eq!(outcome.tier, ScriptedTier::ClientError);
    assert_eq!(outcome.signals.get("score"), Some("abc"));
    assert!(outcome.diagnostic.is_some());

    let missing = classify_scripted(
        Some("uuid=u;action=monitor"),
        &ScriptedThresholds::default(),
    );
    assert_eq!(missing.tier, ScriptedTier::ClientError);
}

#[test]
fn scripted_classification_tests_store_shared_follows_flag() {
    let thresholds = ScriptedThresholds {
        save_akamai_header: true,
        ..ScriptedThresholds::default()
    };
    assert!(classify_scripted(Some("score=3"), &thresholds).store_shared);
    assert!(classify_scripted(Some("score=bad"), &thresholds).store_shared);
    assert!(!classify_scripted(Some("score=3"), &ScriptedThresholds::default()).store_shared);
}

#[test]
fn scripted_classification_tests_finds_score_by_name_not_position() {
    let outcome = classify_scripted(Some("score=70;uuid=u"), &ScriptedThresholds::default());
    assert_eq!(outcome.tier, ScriptedTier::High);
    assert_eq!(outcome.score, Some(70));
}

#[test]
fn scripted_classification_tests_outcome_ids() {
    let ids: Vec<_> = ScriptedTier::ALL.iter().map(|tier| tier.outcome_id()).collect();
    assert_eq!(ids, vec!["low", "medium", "high", "noscore", "clientError"]);
}
