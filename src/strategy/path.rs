use serde::{Deserialize, Serialize};

use crate::council::majority_threshold;
use crate::model::Ward;
use crate::strategy::{RankedWard, WardClass};

/// How many top-target wards the path summary lists.
const TOP_TARGET_LIMIT: usize = 10;

/// One rung of the scenario ladder: the projected position after
/// considering the N most winnable contested wards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub wards_considered: u32,
    pub projected_seats: u32,
    /// Joint probability of every gain counted so far coming through.
    pub probability: f64,
    pub reaches_majority: bool,
}

/// The chosen party's route to council control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathToControl {
    pub total_seats: u32,
    pub majority_threshold: u32,
    /// Seats not up for contest this cycle that the party already holds.
    pub current_seats: u32,
    pub seats_needed: u32,
    pub scenarios: Vec<Scenario>,
    /// Defended wards the forecast says we lose, most at risk first.
    pub vulnerable_wards: Vec<String>,
    /// Best non-defended, realistic wards in rank order.
    pub top_targets: Vec<String>,
}

/// Model the chosen party's path to a council majority.
///
/// The scenario ladder walks contested wards by descending win probability,
/// banking a seat (and multiplying the cumulative probability) whenever the
/// ward is forecast won or needs no positive swing. It snapshots every
/// third ward, at the end, and the instant the threshold is first reached,
/// then stops.
pub fn path_to_control(
    wards: &[Ward],
    ranked: &[RankedWard],
    our_party: &str,
    total_seats: u32,
) -> PathToControl {
    let threshold = majority_threshold(total_seats);
    let current_seats = wards.iter()
        .map(|w| w.retained_seats.get(our_party).copied().unwrap_or(0))
        .sum::<u32>();
    let seats_needed = threshold.saturating_sub(current_seats);

    let mut by_probability = ranked.iter().collect::<Vec<_>>();
    by_probability.sort_by(|a, b| {
        b.win_probability.partial_cmp(&a.win_probability).unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.ward().cmp(b.ward()))
    });

    let mut scenarios = Vec::new();
    let mut seats = current_seats;
    let mut probability = 1.0;
    for (i, entry) in by_probability.iter().enumerate() {
        let winnable = entry.prediction.winner.as_deref() == Some(our_party)
            || entry.swing_required <= 0.0;
        if winnable {
            seats += 1;
            probability *= entry.win_probability;
        }

        let reached = seats >= threshold;
        if reached || (i + 1) % 3 == 0 || i + 1 == by_probability.len() {
            scenarios.push(Scenario {
                wards_considered: (i + 1) as u32,
                projected_seats: seats,
                probability,
                reaches_majority: reached,
            });
        }
        if reached {
            break;
        }
    }

    let mut vulnerable = ranked.iter()
        .filter(|r| r.defending && r.prediction.winner.as_deref() != Some(our_party))
        .collect::<Vec<_>>();
    vulnerable.sort_by(|a, b| {
        a.win_probability.partial_cmp(&b.win_probability).unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.ward().cmp(b.ward()))
    });

    let top_targets = ranked.iter()
        .filter(|r| {
            !r.defending
                && !matches!(r.classification.class, WardClass::WriteOff | WardClass::Unknown)
        })
        .take(TOP_TARGET_LIMIT)
        .map(|r| r.ward().to_string())
        .collect();

    PathToControl {
        total_seats,
        majority_threshold: threshold,
        current_seats,
        seats_needed,
        scenarios,
        vulnerable_wards: vulnerable.into_iter().map(|r| r.ward().to_string()).collect(),
        top_targets,
    }
}
