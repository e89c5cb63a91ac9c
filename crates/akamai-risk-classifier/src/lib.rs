#![warn(missing_docs)]
//! # akamai-risk-classifier
//!
//! ## Purpose
//! Maps the `score` signal of a decoded risk header onto the four-tier
//! outcome set consumed by the authentication flow.
//!
//! ## Responsibilities
//! - Extract and validate the integer risk score.
//! - Compare it top-down against administrator thresholds.
//! - Convert every failure into the `clientError` tier plus diagnostics.
//! - Keep the historical three-tier scripted scheme separate ([`scripted`]).
//!
//! ## Data flow
//! Optional raw header -> [`akamai_risk_core::decode`] -> [`extract_score`] ->
//! [`tier_for_score`] -> [`Outcome`] returned to the host adapter.
//!
//! ## Ownership and lifetimes
//! Outcomes own their [`SignalMap`], so the host can store it after the
//! request is gone. Nothing is retained between calls.
//!
//! ## Error model
//! [`try_classify`] returns [`ClassificationFailure`] for missing or invalid
//! scores. [`classify`] folds that into a total [`Outcome`] whose tier is
//! [`RiskTier::ClientError`] and whose [`Diagnostic`] holds message and trace.
//!
//! ## Security and privacy notes
//! Diagnostics describe the failure only; they never embed the raw header.
//!
//! ## Example
//! ```rust
//! use akamai_risk_classifier::{RiskTier, ThresholdConfig, classify};
//!
//! let outcome = classify(Some("uuid=u;score=27"), &ThresholdConfig::default());
//! assert_eq!(outcome.tier, RiskTier::Medium);
//! assert_eq!(outcome.signals.get("uuid"), Some("u"));
//! ```

pub mod config;
pub mod scripted;

use std::fmt;
use std::num::ParseIntError;

use akamai_risk_core::{SignalMap, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::{ConfigError, ThresholdConfig};

/// Outcome tier produced by one classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskTier {
    /// Score at or below `lowValue`.
    Low,
    /// Score above `lowValue`, at or below `mediumValue`.
    Medium,
    /// Score above `mediumValue`, at or below `highValue`.
    High,
    /// Score above `highValue`.
    Critical,
    /// Score missing, invalid, or classification failed.
    ClientError,
}

impl RiskTier {
    /// Every tier in host outcome order.
    pub const ALL: [RiskTier; 5] = [
        RiskTier::Low,
        RiskTier::Medium,
        RiskTier::High,
        RiskTier::Critical,
        RiskTier::ClientError,
    ];

    /// Returns stable outcome identifier used by the flow graph.
    pub fn outcome_id(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::Critical => "critical",
            RiskTier::ClientError => "clientError",
        }
    }

    /// Severity rank for scored tiers; `clientError` ranks zero.
    pub fn severity(self) -> u8 {
        match self {
            RiskTier::Low => 1,
            RiskTier::Medium => 2,
            RiskTier::High => 3,
            RiskTier::Critical => 4,
            RiskTier::ClientError => 0,
        }
    }

    /// Returns `true` for the error tier.
    pub fn is_error(self) -> bool {
        self == RiskTier::ClientError
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.outcome_id())
    }
}

/// Failure description handed to the host for logging and storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// One-line failure message.
    pub message: String,
    /// Debug rendering followed by one `caused by:` line per source.
    pub trace: String,
}

impl Diagnostic {
    /// Renders message and cause chain from an error.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut trace = format!("{error:?}");
        let mut source = error.source();
        while let Some(cause) = source {
            trace.push_str("\ncaused by: ");
            trace.push_str(&cause.to_string());
            source = cause.source();
        }

        Self {
            message: error.to_string(),
            trace,
        }
    }
}

/// Successful classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Tier selected for the score.
    pub tier: RiskTier,
    /// Parsed risk score.
    pub score: i32,
    /// All decoded signals.
    pub signals: SignalMap,
}

/// Failed classification; signals decoded before the failure are kept.
#[derive(Debug)]
pub struct ClassificationFailure {
    /// Signals decoded from the header, possibly empty.
    pub signals: SignalMap,
    /// Failure reason.
    pub error: ClassifyError,
}

impl ClassificationFailure {
    /// Tier reported for every failure.
    pub fn tier(&self) -> RiskTier {
        RiskTier::ClientError
    }

    /// Returns host-facing diagnostic for this failure.
    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic::from_error(&self.error)
    }
}

/// Total classification result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Selected tier; always present.
    pub tier: RiskTier,
    /// Parsed score when one was available.
    pub score: Option<i32>,
    /// Decoded signals the host must store transiently.
    pub signals: SignalMap,
    /// `true` when the host must also store signals in shared state.
    pub store_shared: bool,
    /// Present only for `clientError` outcomes.
    pub diagnostic: Option<Diagnostic>,
}

impl Outcome {
    /// Builds an error outcome for a failure raised outside normal scoring.
    pub fn unexpected(detail: impl Into<String>, config: &ThresholdConfig) -> Self {
        let failure = ClassificationFailure {
            signals: SignalMap::new(),
            error: ClassifyError::Unexpected(detail.into()),
        };
        Self::from_failure(failure, config)
    }

    fn from_failure(failure: ClassificationFailure, config: &ThresholdConfig) -> Self {
        let diagnostic = failure.diagnostic();
        Self {
            tier: failure.tier(),
            score: None,
            signals: failure.signals,
            store_shared: config.save_akamai_header,
            diagnostic: Some(diagnostic),
        }
    }
}

/// Parses the `score` signal as a base-10 `i32`.
///
/// # Errors
/// Returns [`ScoreError::Missing`] when no `score` signal exists.
/// Returns [`ScoreError::Invalid`] for non-numeric or out-of-range values.
pub fn extract_score(signals: &SignalMap) -> Result<i32, ScoreError> {
    let raw = signals.score().ok_or(ScoreError::Missing)?;
    raw.parse::<i32>().map_err(|source| ScoreError::Invalid {
        value: raw.to_string(),
        source,
    })
}

/// Maps a score onto a tier using inclusive upper bounds, checked top-down.
///
/// Threshold order is not validated; see [`ThresholdConfig::is_monotonic`].
pub fn tier_for_score(score: i32, config: &ThresholdConfig) -> RiskTier {
    if score <= config.low_value {
        RiskTier::Low
    } else if score <= config.medium_value {
        RiskTier::Medium
    } else if score <= config.high_value {
        RiskTier::High
    } else {
        RiskTier::Critical
    }
}

/// Decodes and classifies one header value.
///
/// An absent header is decoded as an empty one and therefore fails with a
/// missing score.
///
/// # Errors
/// Returns [`ClassificationFailure`] carrying the decoded signals when the
/// score is missing or invalid.
pub fn try_classify(
    raw: Option<&str>,
    config: &ThresholdConfig,
) -> Result<Classification, ClassificationFailure> {
    let signals = decode(raw.unwrap_or_default());
    match extract_score(&signals) {
        Ok(score) => Ok(Classification {
            tier: tier_for_score(score, config),
            score,
            signals,
        }),
        Err(error) => Err(ClassificationFailure {
            signals,
            error: error.into(),
        }),
    }
}

/// Decodes and classifies one header value; never fails.
pub fn classify(raw: Option<&str>, config: &ThresholdConfig) -> Outcome {
    match try_classify(raw, config) {
        Ok(classification) => Outcome {
            tier: classification.tier,
            score: Some(classification.score),
            signals: classification.signals,
            store_shared: config.save_akamai_header,
            diagnostic: None,
        },
        Err(failure) => Outcome::from_failure(failure, config),
    }
}

/// Score extraction failures.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Header carried no `score` signal.
    #[error("risk header has no `score` signal")]
    Missing,
    /// `score` value is not a base-10 `i32`.
    #[error("score signal `{value}` is not a valid integer")]
    Invalid {
        /// Raw signal value.
        value: String,
        /// Integer parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Classification failures; all of them map to [`RiskTier::ClientError`].
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Score missing or invalid.
    #[error("risk score unavailable")]
    Score(#[from] ScoreError),
    /// Any other failure, such as a panic caught by the host adapter.
    #[error("unexpected classification failure: {0}")]
    Unexpected(String),
}
