use serde::{Deserialize, Serialize};

use crate::strategy::{RankedWard, WardClass};

/// Doorstep conversations a volunteer gets through per hour.
const CONTACTS_PER_HOUR: f64 = 8.0;
/// Fraction of contacts persuaded to switch or turn out.
const PERSUASION_RATE: f64 = 0.06;

/// Return-on-investment tier for a ward's allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoiTier {
    High,
    Medium,
    Low,
}

impl RoiTier {
    pub fn label(&self) -> &'static str {
        match self {
            RoiTier::High => "High",
            RoiTier::Medium => "Medium",
            RoiTier::Low => "Low",
        }
    }
}

/// One ward's slice of the campaign-hour budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceAllocation {
    pub ward: String,
    pub classification: WardClass,
    pub score: i32,
    pub win_probability: f64,
    pub hours: f64,
    pub percent_of_budget: f64,
    /// Votes the allocated hours are expected to add.
    pub estimated_votes: f64,
    /// Hours per incremental vote.
    pub cost_per_vote: f64,
    pub roi: RoiTier,
}

/// Weight multiplier per strategic tier: competitive wards soak up budget,
/// foregone conclusions get a token presence.
fn class_multiplier(class: WardClass) -> f64 {
    match class {
        WardClass::Battleground => 1.5,
        WardClass::Target => 1.2,
        WardClass::MarginalHold => 1.0,
        WardClass::Hold => 0.6,
        WardClass::Stretch => 0.4,
        WardClass::Safe => 0.2,
        WardClass::Unknown => 0.1,
        WardClass::WriteOff => 0.05,
    }
}

/// Diminishing-returns banding by win probability: hours matter most where
/// the race is genuinely in the balance.
fn urgency_factor(probability: f64) -> f64 {
    if probability > 0.7 {
        0.6
    } else if probability >= 0.5 {
        0.8
    } else if probability >= 0.3 {
        1.0
    } else if probability >= 0.1 {
        0.7
    } else {
        0.3
    }
}

fn roi_tier(probability: f64, cost_per_vote: f64) -> RoiTier {
    if (0.3..=0.7).contains(&probability) && cost_per_vote <= 3.0 {
        RoiTier::High
    } else if (0.1..0.9).contains(&probability) && cost_per_vote <= 6.0 {
        RoiTier::Medium
    } else {
        RoiTier::Low
    }
}

/// Split a finite canvassing-hour budget across ranked wards.
///
/// Each ward's raw weight is `score x class multiplier x urgency x
/// sqrt(electorate / 5000)`; weights are normalized to the requested
/// budget. Returns allocations sorted by hours descending. An all-zero
/// weight pool (no rankable wards) yields an empty plan.
pub fn allocate_resources(ranked: &[RankedWard], total_hours: f64) -> Vec<ResourceAllocation> {
    let weights = ranked.iter()
        .map(|r| {
            let size_scale = (r.prediction.electorate as f64 / 5000.0).sqrt();
            r.score as f64
                * class_multiplier(r.classification.class)
                * urgency_factor(r.win_probability)
                * size_scale
        })
        .collect::<Vec<_>>();

    let pool = weights.iter().sum::<f64>();
    if pool <= 0.0 || total_hours <= 0.0 {
        return Vec::new();
    }

    let mut allocations = ranked.iter()
        .zip(&weights)
        .map(|(r, &weight)| {
            let hours = total_hours * weight / pool;
            let estimated_votes = hours * CONTACTS_PER_HOUR * PERSUASION_RATE;
            let cost_per_vote = if estimated_votes > 0.0 { hours / estimated_votes } else { 0.0 };
            ResourceAllocation {
                ward: r.ward().to_string(),
                classification: r.classification.class,
                score: r.score,
                win_probability: r.win_probability,
                hours,
                percent_of_budget: 100.0 * weight / pool,
                estimated_votes,
                cost_per_vote,
                roi: roi_tier(r.win_probability, cost_per_vote),
            }
        })
        .collect::<Vec<_>>();

    allocations.sort_by(|a, b| {
        b.hours.partial_cmp(&a.hours).unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.ward.cmp(&b.ward))
    });
    allocations
}
