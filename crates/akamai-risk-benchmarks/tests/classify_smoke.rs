//! Benchmark smoke test for decode + classify throughput.

use std::time::Instant;

use akamai_risk_benchmarks::{EDGE_HEADER_SIGNAL_COUNT, edge_header};
use akamai_risk_classifier::{RiskTier, ThresholdConfig, classify};
use akamai_risk_core::decode;

#[test]
fn benchmark_classify_smoke_prints_latency() {
    let config = ThresholdConfig::default();
    let headers: Vec<String> = (0..100).map(edge_header).collect();

    let start = Instant::now();
    let mut critical = 0usize;
    let mut signal_total = 0usize;

    for _ in 0..1_000 {
        for header in &headers {
            let outcome = classify(Some(header.as_str()), &config);
            if outcome.tier == RiskTier::Critical {
                critical += 1;
            }
            signal_total += decode(header).len();
        }
    }

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_classify_elapsed_ms={elapsed_ms}");
    println!("benchmark_classify_critical={critical}");

    assert_eq!(critical, 23 * 1_000);
    assert_eq!(signal_total, EDGE_HEADER_SIGNAL_COUNT * 100 * 1_000);
    // Lightweight guardrail; strict latency budgets are environment-specific.
    assert!(
        elapsed_ms < 10_000,
        "classification smoke benchmark should stay bounded"
    );
}
