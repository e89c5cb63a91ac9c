#![warn(missing_docs)]
//! # akamai-risk-node
//!
//! ## Purpose
//! Adapts the risk classifier to an authentication-flow host: one call per
//! flow step, returning the outcome id that selects the next step.
//!
//! ## Responsibilities
//! - Locate the `Akamai-User-Risk` header among request headers.
//! - Run classification with a panic guard so the host always gets a tier.
//! - Write decoded signals into transient (and optionally shared) state.
//! - Stamp and store diagnostics when classification fails.
//! - Emit structured `tracing` events keyed by a header fingerprint.
//!
//! ## Data flow
//! Request headers -> [`risk_header`] -> [`AkamaiRiskNode::process`] ->
//! [`akamai_risk_classifier::classify`] -> [`NodeState`] writes -> [`RiskTier`].
//!
//! ## Ownership and lifetimes
//! The node holds only its immutable [`ThresholdConfig`]; state is borrowed
//! mutably for the duration of one call.
//!
//! ## Error model
//! Nothing escapes [`AkamaiRiskNode::process`]. Score failures and caught
//! panics both become [`RiskTier::ClientError`] with diagnostics in
//! transient state.
//!
//! ## Security and privacy notes
//! Log events carry [`header_fingerprint`] instead of the header value.
//!
//! ## Example
//! ```rust
//! use akamai_risk_classifier::{RiskTier, ThresholdConfig};
//! use akamai_risk_node::{AkamaiRiskNode, InMemoryNodeState, STATE_KEY_HEADER};
//!
//! let node = AkamaiRiskNode::new(ThresholdConfig::default());
//! let mut state = InMemoryNodeState::new();
//! assert_eq!(node.process(Some("score=80"), &mut state), RiskTier::Critical);
//! assert!(state.transient(STATE_KEY_HEADER).is_some());
//! ```

mod state;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use akamai_risk_classifier::scripted::{ScriptedThresholds, ScriptedTier, classify_scripted};
use akamai_risk_classifier::{Diagnostic, Outcome, RiskTier, ThresholdConfig, classify};
use akamai_risk_core::{AKAMAI_USER_RISK_HEADER, SignalMap};
use serde_json::Value;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub use state::{InMemoryNodeState, NodeState};

/// State key holding decoded signals.
pub const STATE_KEY_HEADER: &str = "AkamaiHttpHeader";

/// Transient key holding the stamped failure message.
pub const STATE_KEY_EXCEPTION: &str = "[AkamaiAccountProtector]Exception";

/// Transient key holding the stamped failure trace.
pub const STATE_KEY_STACK_TRACE: &str = "[AkamaiAccountProtector]StackTrace";

/// Shared key written by [`ScriptedDecision`] with the parsed score.
pub const STATE_KEY_SCORE: &str = "score";

const FINGERPRINT_HEX_LEN: usize = 16;

/// Returns the first `Akamai-User-Risk` value from `(name, value)` pairs.
///
/// Names match case-insensitively. Later duplicates are ignored.
pub fn risk_header<'a, I>(headers: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    headers
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(AKAMAI_USER_RISK_HEADER))
        .map(|(_, value)| value)
}

/// Returns a short SHA-256 hex fingerprint of a raw header for log correlation.
pub fn header_fingerprint(raw: &str) -> String {
    let digest = hex::encode(Sha256::digest(raw.as_bytes()));
    digest[..FINGERPRINT_HEX_LEN].to_string()
}

/// Flow step that classifies the risk header with the four-tier scheme.
#[derive(Debug, Clone)]
pub struct AkamaiRiskNode {
    config: ThresholdConfig,
}

impl AkamaiRiskNode {
    /// Creates a node with fixed thresholds.
    pub fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    /// Returns node configuration.
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Outcome ids the host must wire, in display order.
    pub fn outcomes() -> Vec<&'static str> {
        RiskTier::ALL.iter().map(|tier| tier.outcome_id()).collect()
    }

    /// Looks up the risk header in request headers and processes it.
    pub fn process_request<'a, I>(&self, headers: I, state: &mut dyn NodeState) -> RiskTier
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.process(risk_header(headers), state)
    }

    /// Classifies one header value and records the results in `state`.
    ///
    /// # Side effects
    /// - Signals always go to transient [`STATE_KEY_HEADER`].
    /// - Signals also go to shared [`STATE_KEY_HEADER`] when
    ///   `save_akamai_header` is set.
    /// - On failure, [`STATE_KEY_EXCEPTION`] and [`STATE_KEY_STACK_TRACE`] are
    ///   written to transient state with an RFC 3339 UTC stamp.
    ///
    /// # Panics
    /// Never propagates a panic. A caught panic still runs the process panic
    /// hook, so with the default hook its message also reaches stderr next to
    /// the `tracing` error event. Hosts that want a single report install
    /// their own hook.
    pub fn process(&self, raw: Option<&str>, state: &mut dyn NodeState) -> RiskTier {
        let fingerprint = raw.map(header_fingerprint);
        let outcome = self.guarded(|| classify(raw, &self.config));

        store_signals(state, &outcome.signals, outcome.store_shared);

        match &outcome.diagnostic {
            Some(diagnostic) => {
                tracing::error!(
                    header_present = raw.is_some(),
                    header_fingerprint = fingerprint.as_deref().unwrap_or("-"),
                    signal_count = outcome.signals.len(),
                    error = %diagnostic.message,
                    "risk classification failed"
                );
                store_diagnostic(state, diagnostic);
            }
            None => {
                tracing::info!(
                    tier = %outcome.tier,
                    score = ?outcome.score,
                    header_fingerprint = fingerprint.as_deref().unwrap_or("-"),
                    signal_count = outcome.signals.len(),
                    shared = outcome.store_shared,
                    "risk header classified"
                );
            }
        }

        outcome.tier
    }

    fn guarded<F>(&self, run: F) -> Outcome
    where
        F: FnOnce() -> Outcome,
    {
        panic::catch_unwind(AssertUnwindSafe(run)).unwrap_or_else(|payload| {
            Outcome::unexpected(panic_detail(payload.as_ref()), &self.config)
        })
    }
}

/// Flow step reproducing the older three-tier scripted decision.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecision {
    thresholds: ScriptedThresholds,
}

impl ScriptedDecision {
    /// Creates a scripted decision with fixed thresholds.
    pub fn new(thresholds: ScriptedThresholds) -> Self {
        Self { thresholds }
    }

    /// Outcome ids the host must wire, in display order.
    pub fn outcomes() -> Vec<&'static str> {
        ScriptedTier::ALL
            .iter()
            .map(|tier| tier.outcome_id())
            .collect()
    }

    /// Classifies one header value and records the results in `state`.
    ///
    /// # Side effects
    /// - Signals go to transient [`STATE_KEY_HEADER`], and to shared
    ///   [`STATE_KEY_HEADER`] when `save_akamai_header` is set.
    /// - A parsed score goes to shared [`STATE_KEY_SCORE`].
    /// - On `clientError`, stamped diagnostics are written as in
    ///   [`AkamaiRiskNode::process`].
    pub fn process(&self, raw: Option<&str>, state: &mut dyn NodeState) -> ScriptedTier {
        let outcome = classify_scripted(raw, &self.thresholds);

        store_signals(state, &outcome.signals, outcome.store_shared);
        if let Some(score) = outcome.score {
            state.store_shared(STATE_KEY_SCORE, Value::from(score));
        }

        let fingerprint = raw.map(header_fingerprint);
        match &outcome.diagnostic {
            Some(diagnostic) => {
                tracing::warn!(
                    header_fingerprint = fingerprint.as_deref().unwrap_or("-"),
                    signal_count = outcome.signals.len(),
                    error = %diagnostic.message,
                    "scripted risk decision failed"
                );
                store_diagnostic(state, diagnostic);
            }
            None => tracing::info!(
                tier = %outcome.tier,
                score = ?outcome.score,
                shared = outcome.store_shared,
                "scripted risk decision"
            ),
        }

        outcome.tier
    }
}

fn store_signals(state: &mut dyn NodeState, signals: &SignalMap, store_shared: bool) {
    let value = signals.to_json_value();
    if store_shared {
        state.store_shared(STATE_KEY_HEADER, value.clone());
    }
    state.store_transient(STATE_KEY_HEADER, value);
}

fn store_diagnostic(state: &mut dyn NodeState, diagnostic: &Diagnostic) {
    let stamp = utc_stamp();
    state.store_transient(
        STATE_KEY_EXCEPTION,
        Value::String(format!("{stamp}: {}", diagnostic.message)),
    );
    state.store_transient(
        STATE_KEY_STACK_TRACE,
        Value::String(format!("{stamp}: {}", diagnostic.trace)),
    );
}

fn utc_stamp() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "panic with non-string payload".to_string()
}
