//! Analysis result types shared by all analyzer implementations.

use serde::{Deserialize, Serialize};

/// Sentiment label set produced by any analyzer.
///
/// Remote providers return labels as free-form strings; [`Label::parse_remote`]
/// is the normalization point that rejects anything outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    /// Numeric class used for aggregation: +1 positive, -1 negative, 0 neutral.
    pub fn class(&self) -> i32 {
        match self {
            Label::Positive => 1,
            Label::Negative => -1,
            Label::Neutral => 0,
        }
    }

    /// Normalizes a raw provider label, case-insensitively. Returns `None` for
    /// anything outside the recognized set rather than propagating unchecked
    /// strings into stored state.
    pub fn parse_remote(raw: &str) -> Option<Label> {
        match raw.to_ascii_uppercase().as_str() {
            "POSITIVE" => Some(Label::Positive),
            "NEGATIVE" => Some(Label::Negative),
            "NEUTRAL" => Some(Label::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Positive => write!(fmt, "POSITIVE"),
            Label::Negative => write!(fmt, "NEGATIVE"),
            Label::Neutral => write!(fmt, "NEUTRAL"),
        }
    }
}

/// One analyzer verdict for a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub label: Label,
    /// Always within [-1.0, 1.0]
    pub score: f64,
    /// Summary text some providers return alongside negative verdicts
    pub negative_summary: Option<String>,
}

impl Analysis {
    /// Builds an analysis with the score clamped into [-1.0, 1.0].
    pub fn new(label: Label, score: f64, negative_summary: Option<String>) -> Self {
        Self {
            label,
            score: clamp_score(score),
            negative_summary,
        }
    }

    /// Neutral default used when every analyzer in a chain has failed.
    pub fn neutral() -> Self {
        Self {
            label: Label::Neutral,
            score: 0.0,
            negative_summary: None,
        }
    }

    pub fn class(&self) -> i32 {
        self.label.class()
    }
}

/// Clamps a raw provider score into [-1.0, 1.0]; non-finite values become 0.0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
