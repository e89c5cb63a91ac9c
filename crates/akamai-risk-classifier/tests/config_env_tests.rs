//! Integration tests for environment-driven threshold configuration.

use akamai_risk_classifier::config::{ENV_LOW_VALUE, ENV_SAVE_HEADER};
use akamai_risk_classifier::{ConfigError, ThresholdConfig};

#[test]
fn config_env_tests_reads_overrides_from_process_env() {
    // Safety:
    // - This test binary holds a single test, so no other thread reads env.
    // - Variables are removed before returning.
    unsafe {
        std::env::set_var(ENV_LOW_VALUE, "15");
        std::env::set_var(ENV_SAVE_HEADER, "true");
    }
    let config = ThresholdConfig::from_env().expect("env config should load");
    assert_eq!(config.low_value, 15);
    assert!(config.save_akamai_header);

    // Safety: see rationale above.
    unsafe { std::env::set_var(ENV_SAVE_HEADER, "maybe") };
    assert!(matches!(
        ThresholdConfig::from_env(),
        Err(ConfigError::InvalidEnv { .. })
    ));

    // Safety: see rationale above.
    unsafe {
        std::env::remove_var(ENV_LOW_VALUE);
        std::env::remove_var(ENV_SAVE_HEADER);
    }
    assert_eq!(
        ThresholdConfig::from_env().expect("defaults should load"),
        ThresholdConfig::default()
    );
}
