//! Integration tests for independent concurrent invocations.

use std::sync::Arc;
use std::thread;

use akamai_risk_classifier::{RiskTier, ThresholdConfig};
use akamai_risk_node::{AkamaiRiskNode, InMemoryNodeState, STATE_KEY_HEADER};

#[test]
fn concurrent_invocation_tests_share_node_without_locks() {
    let node = Arc::new(AkamaiRiskNode::new(ThresholdConfig::default()));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let node = Arc::clone(&node);
            thread::spawn(move || {
                let mut state = InMemoryNodeState::new();
                let header = format!("worker={worker};score={}", worker * 12);
                let tier = node.process(Some(header.as_str()), &mut state);
                let stored = state
                    .transient(STATE_KEY_HEADER)
                    .map(|value| value["worker"].clone());
                (worker, tier, stored)
            })
        })
        .collect();

    for handle in handles {
        let (worker, tier, stored) = handle.join().expect("worker should not panic");
        let expected = match worker * 12 {
            0..=26 => RiskTier::Low,
            27..=51 => RiskTier::Medium,
            52..=76 => RiskTier::High,
            _ => RiskTier::Critical,
        };
        assert_eq!(tier, expected);
        assert_eq!(stored, Some(serde_json::Value::from(worker.to_string())));
    }
}
