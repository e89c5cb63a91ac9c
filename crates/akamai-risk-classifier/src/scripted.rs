//! Three-tier scheme used by the older scripted decision step.
//!
//! Kept apart from [`crate::RiskTier`]: its thresholds, defaults and outcome
//! set differ, and an absent header is a benign `noscore` rather than an
//! error.

use std::fmt;

use akamai_risk_core::{SignalMap, decode};
use serde::{Deserialize, Serialize};

use crate::{ClassifyError, Diagnostic, extract_score};

/// Default inclusive upper bound for scripted `low`.
pub const DEFAULT_SCRIPTED_MEDIUM_VALUE: i32 = 25;
/// Default inclusive upper bound for scripted `medium`.
pub const DEFAULT_SCRIPTED_HIGH_VALUE: i32 = 50;

/// Thresholds for the scripted scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptedThresholds {
    /// Scores at or below this value are `low`.
    pub medium_value: i32,
    /// Scores at or below this value (and above `medium_value`) are `medium`.
    pub high_value: i32,
    /// Also store decoded signals in shared (long-lived) flow state.
    pub save_akamai_header: bool,
}

impl Default for ScriptedThresholds {
    fn default() -> Self {
        Self {
            medium_value: DEFAULT_SCRIPTED_MEDIUM_VALUE,
            high_value: DEFAULT_SCRIPTED_HIGH_VALUE,
            save_akamai_header: false,
        }
    }
}

/// Outcome tier of the scripted scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptedTier {
    /// Score at or below `mediumValue`.
    #[serde(rename = "low")]
    Low,
    /// Score above `mediumValue`, at or below `highValue`.
    #[serde(rename = "medium")]
    Medium,
    /// Score above `highValue`.
    #[serde(rename = "high")]
    High,
    /// Header was not sent.
    #[serde(rename = "noscore")]
    NoScore,
    /// Header present but score missing or invalid.
    #[serde(rename = "clientError")]
    ClientError,
}

impl ScriptedTier {
    /// Every scripted tier in outcome order.
    pub const ALL: [ScriptedTier; 5] = [
        ScriptedTier::Low,
        ScriptedTier::Medium,
        ScriptedTier::High,
        ScriptedTier::NoScore,
        ScriptedTier::ClientError,
    ];

    /// Returns stable outcome identifier.
    pub fn outcome_id(self) -> &'static str {
        match self {
            ScriptedTier::Low => "low",
            ScriptedTier::Medium => "medium",
            ScriptedTier::High => "high",
            ScriptedTier::NoScore => "noscore",
            ScriptedTier::ClientError => "clientError",
        }
    }
}

impl fmt::Display for ScriptedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.outcome_id())
    }
}

/// Total result of the scripted scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedOutcome {
    /// Selected tier.
    pub tier: ScriptedTier,
    /// Parsed score when available.
    pub score: Option<i32>,
    /// Decoded signals; empty for `noscore`.
    pub signals: SignalMap,
    /// `true` when the host must also store signals in shared state.
    pub store_shared: bool,
    /// Present only for `clientError`.
    pub diagnostic: Option<Diagnostic>,
}

/// Maps a score onto the scripted tiers with inclusive upper bounds.
pub fn scripted_tier_for_score(score: i32, thresholds: &ScriptedThresholds) -> ScriptedTier {
    if score <= thresholds.medium_value {
        ScriptedTier::Low
    } else if score <= thresholds.high_value {
        ScriptedTier::Medium
    } else {
        ScriptedTier::High
    }
}

/// Classifies a header with the scripted scheme; never fails.
///
/// An absent or empty header short-circuits to [`ScriptedTier::NoScore`]
/// without decoding. Any other value, whitespace included, is decoded and
/// needs a valid `score`.
pub fn classify_scripted(raw: Option<&str>, thresholds: &ScriptedThresholds) -> ScriptedOutcome {
    let Some(raw) = raw.filter(|value| !value.is_empty()) else {
        return ScriptedOutcome {
            tier: ScriptedTier::NoScore,
            score: None,
            signals: SignalMap::new(),
            store_shared: thresholds.save_akamai_header,
            diagnostic: None,
        };
    };

    let signals = decode(raw);
    match extract_score(&signals) {
        Ok(score) => ScriptedOutcome {
            tier: scripted_tier_for_score(score, thresholds),
            score: Some(score),
            signals,
            store_shared: thresholds.save_akamai_header,
            diagnostic: None,
        },
        Err(error) => ScriptedOutcome {
            tier: ScriptedTier::ClientError,
            score: None,
            signals,
            store_shared: thresholds.save_akamai_header,
            diagnostic: Some(Diagnostic::from_error(&ClassifyError::from(error))),
        },
    }
}
