use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::shares::ShareVector;

/// Confidence tier attached to a ward prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    /// No usable prediction (typically: ward has no electoral history).
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::None => "none",
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

/// One step of the methodology trail: which stage ran and what it changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailEntry {
    pub stage: String,
    pub detail: String,
}

impl TrailEntry {
    pub fn new(stage: &str, detail: impl Into<String>) -> Self {
        Self { stage: stage.to_string(), detail: detail.into() }
    }
}

/// Full forecast for a single contested ward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardPrediction {
    pub ward: String,
    /// Predicted winner; `None` when the ward could not be predicted.
    pub winner: Option<String>,
    pub runner_up: Option<String>,
    /// Winner's lead over the runner-up in votes.
    pub majority_votes: i64,
    /// Winner's lead over the runner-up as a fraction of total votes.
    pub majority_fraction: f64,
    /// Normalized per-party predicted shares.
    pub shares: ShareVector,
    /// Per-party predicted votes.
    pub votes: BTreeMap<String, u32>,
    /// Estimated fractional turnout.
    pub turnout: f64,
    pub total_votes: u32,
    pub electorate: u32,
    pub confidence: Confidence,
    /// Ordered methodology trail, one entry per pipeline stage.
    pub trail: Vec<TrailEntry>,
}

impl WardPrediction {
    /// A prediction that could not be made, carrying a diagnostic trail entry.
    pub fn absent(ward: &str, reason: impl Into<String>) -> Self {
        Self {
            ward: ward.to_string(),
            winner: None,
            runner_up: None,
            majority_votes: 0,
            majority_fraction: 0.0,
            shares: ShareVector::new(),
            votes: BTreeMap::new(),
            turnout: 0.0,
            total_votes: 0,
            electorate: 0,
            confidence: Confidence::None,
            trail: vec![TrailEntry::new("baseline", reason)],
        }
    }

    /// Whether this ward produced no usable forecast.
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.winner.is_none()
    }
}
