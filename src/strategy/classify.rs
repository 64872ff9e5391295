use serde::{Deserialize, Serialize};

use crate::model::WardPrediction;

/// Strategic tier of a ward relative to the chosen party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WardClass {
    Safe,
    Hold,
    MarginalHold,
    Battleground,
    Target,
    Stretch,
    WriteOff,
    Unknown,
}

impl WardClass {
    /// Human-readable label, as used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            WardClass::Safe => "Safe",
            WardClass::Hold => "Hold",
            WardClass::MarginalHold => "Marginal Hold",
            WardClass::Battleground => "Battleground",
            WardClass::Target => "Target",
            WardClass::Stretch => "Stretch",
            WardClass::WriteOff => "Write-off",
            WardClass::Unknown => "Unknown",
        }
    }
}

/// A ward's strategic tier plus the share margin it was derived from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Classification {
    pub class: WardClass,
    /// Winner's lead in share terms: ours over the runner-up when we win,
    /// the winner's over ours when we lose.
    pub margin: f64,
}

/// Classify a ward from (predicted winner, margin, defender, chosen party).
///
/// Deterministic decision table; an absent prediction maps to `Unknown`
/// with a sentinel margin of 1.
pub fn classify_ward(
    prediction: &WardPrediction,
    our_party: &str,
    defender: Option<&str>,
) -> Classification {
    let Some(winner) = &prediction.winner else {
        return Classification { class: WardClass::Unknown, margin: 1.0 };
    };

    let we_defend = defender == Some(our_party);
    let our_share = prediction.shares.get(our_party);

    if winner == our_party {
        let runner_share = prediction.runner_up.as_deref()
            .map(|r| prediction.shares.get(r))
            .unwrap_or(0.0);
        let margin = our_share - runner_share;
        let class = match (we_defend, margin) {
            (true, m) if m >= 0.15 => WardClass::Safe,
            (true, m) if m >= 0.05 => WardClass::Hold,
            (true, _) => WardClass::MarginalHold,
            (false, m) if m >= 0.05 => WardClass::Target,
            (false, _) => WardClass::Battleground,
        };
        Classification { class, margin }
    } else {
        let margin = prediction.shares.get(winner) - our_share;
        let class = if we_defend {
            if margin < 0.02 {
                WardClass::Battleground
            } else if margin < 0.05 {
                WardClass::MarginalHold
            } else {
                WardClass::Target
            }
        } else if margin < 0.05 {
            WardClass::Battleground
        } else if margin < 0.10 {
            WardClass::Target
        } else if margin < 0.20 {
            WardClass::Stretch
        } else {
            WardClass::WriteOff
        };
        Classification { class, margin }
    }
}

/// Butler swing needed for the chosen party to take (or lose) the ward:
/// half the gap to the winner when behind (positive, points needed), half
/// the lead over the nearest challenger when ahead (negative, safety
/// margin).
pub fn swing_required(prediction: &WardPrediction, our_party: &str) -> f64 {
    let Some(winner) = &prediction.winner else {
        // Unpredictable wards are treated as maximally out of reach.
        return 0.5;
    };
    let our_share = prediction.shares.get(our_party);
    if winner == our_party {
        let runner_share = prediction.runner_up.as_deref()
            .map(|r| prediction.shares.get(r))
            .unwrap_or(0.0);
        -(our_share - runner_share) / 2.0
    } else {
        (prediction.shares.get(winner) - our_share) / 2.0
    }
}
