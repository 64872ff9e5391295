use std::collections::BTreeMap;

use crate::model::{Confidence, ShareVector, TrailEntry, Ward, WardPrediction};
use crate::predict::{Baseline, WardPredictor};

/// Turnout estimates are held inside this band regardless of adjustment.
const TURNOUT_FLOOR: f64 = 0.15;
const TURNOUT_CEIL: f64 = 0.65;

impl WardPredictor<'_> {
    /// Normalize the adjusted shares, estimate turnout and votes, and assign
    /// winner, majority and confidence.
    pub(crate) fn estimate(
        &self,
        ward: &Ward,
        baseline: &Baseline,
        mut shares: ShareVector,
        mut trail: Vec<TrailEntry>,
    ) -> WardPrediction {
        if !shares.normalize() {
            trail.push(TrailEntry::new("estimate", "all adjusted shares non-positive; no forecast"));
            let mut prediction = WardPrediction::absent(&ward.name, "");
            prediction.trail = trail;
            prediction.electorate = baseline.electorate;
            return prediction;
        }

        let turnout = (baseline.turnout + self.assumptions.turnout_adjustment())
            .clamp(TURNOUT_FLOOR, TURNOUT_CEIL);
        let total_votes = (baseline.electorate as f64 * turnout).round() as u32;

        let votes = shares.iter()
            .map(|(party, share)| (party.to_string(), (share * total_votes as f64).round() as u32))
            .collect::<BTreeMap<_, _>>();

        // Votes descending, party name ascending on ties.
        let mut standings = votes.iter().map(|(p, &v)| (p.clone(), v)).collect::<Vec<_>>();
        standings.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let (winner, winner_votes) = standings[0].clone();
        let (runner_up, runner_votes) = standings.get(1).cloned()
            .map(|(p, v)| (Some(p), v))
            .unwrap_or((None, 0));

        let majority_votes = winner_votes as i64 - runner_votes as i64;
        let majority_fraction =
            if total_votes == 0 { 0.0 } else { majority_votes as f64 / total_votes as f64 };

        let confidence = self.confidence(&winner, majority_fraction, baseline.staleness);

        trail.push(TrailEntry::new("estimate", format!(
            "turnout {:.0}% of {} electors = {} votes; {} wins by {} ({:.1}pp), confidence {}",
            turnout * 100.0, baseline.electorate, total_votes,
            winner, majority_votes, majority_fraction * 100.0, confidence.label(),
        )));

        WardPrediction {
            ward: ward.name.clone(),
            winner: Some(winner),
            runner_up,
            majority_votes,
            majority_fraction,
            shares,
            votes,
            turnout,
            total_votes,
            electorate: baseline.electorate,
            confidence,
            trail,
        }
    }

    /// Confidence from the calibrated error history when available for the
    /// winner, otherwise from the majority fraction. A baseline more than
    /// 10 years old caps confidence at medium regardless of margin.
    fn confidence(&self, winner: &str, majority_fraction: f64, staleness: i32) -> Confidence {
        let calibrated_mae = self.calibration
            .and_then(|c| c.mean_absolute_error.get(winner).copied());

        let confidence = match calibrated_mae {
            Some(mae) if mae <= 0.05 => Confidence::High,
            Some(mae) if mae <= 0.10 => Confidence::Medium,
            Some(_) => Confidence::Low,
            None if majority_fraction >= 0.10 => Confidence::High,
            None if majority_fraction >= 0.04 => Confidence::Medium,
            None => Confidence::Low,
        };

        if staleness > 10 { confidence.min(Confidence::Medium) } else { confidence }
    }
}
