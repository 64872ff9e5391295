use std::collections::BTreeSet;

use crate::model::{ElectionRecord, ShareVector, TrailEntry, Ward};
use crate::predict::WardPredictor;

/// Reference historical result a ward forecast starts from.
#[derive(Debug, Clone)]
pub(crate) struct Baseline {
    pub shares: ShareVector,
    pub year: i32,
    pub turnout: f64,
    pub electorate: u32,
    /// Years since the baseline election.
    pub staleness: i32,
}

impl WardPredictor<'_> {
    /// Pick and age a ward's reference result.
    ///
    /// Prefers the most recent election of the target kind, falling back to
    /// the most recent of any kind. Returns `None` for a ward with no
    /// history at all.
    pub(crate) fn extract_baseline(&self, ward: &Ward, trail: &mut Vec<TrailEntry>) -> Option<Baseline> {
        let record = ward.history.most_recent_of_kind(self.target_kind)
            .or_else(|| ward.history.most_recent())?;

        let mut shares = best_share_per_party(record);
        let staleness = self.current_year - record.year;

        let mut note = format!(
            "baseline from {} {:?} election ({} parties, turnout {:.0}%, staleness {}y)",
            record.year, record.kind, shares.len(), record.turnout * 100.0, staleness,
        );

        // Stale baselines get blended towards a fresher constituency-level
        // result when one is available. Parties absent from either side
        // contribute zero from that side; local-only parties therefore keep
        // decay * historical with no invented fresh evidence.
        if staleness > 8 {
            if let Some(fresh) = &ward.constituency_result {
                let decay = (1.0 - (staleness - 8) as f64 * 0.05).max(0.3);
                let parties = shares.parties()
                    .chain(fresh.parties())
                    .map(str::to_string)
                    .collect::<BTreeSet<_>>();
                let mut blended = ShareVector::new();
                for party in &parties {
                    blended.set(party, decay * shares.get(party) + (1.0 - decay) * fresh.get(party));
                }
                shares = blended;
                note.push_str(&format!("; blended with constituency result (decay {:.2})", decay));
            }
        }

        trail.push(TrailEntry::new("baseline", note));
        Some(Baseline {
            shares,
            year: record.year,
            turnout: record.turnout,
            electorate: record.electorate,
            staleness,
        })
    }
}

/// Per-party shares of one election, keeping the maximum share when a party
/// fielded more than one candidate.
fn best_share_per_party(record: &ElectionRecord) -> ShareVector {
    let mut shares = ShareVector::new();
    for candidate in &record.candidates {
        if candidate.share > shares.get(&candidate.party) || !shares.contains(&candidate.party) {
            shares.set(&candidate.party, candidate.share);
        }
    }
    shares
}

#[cfg(test)]
mod tests {
    use crate::model::{
        Assumptions, CandidateResult, ElectionKind, ElectionRecord, ReferenceResults, ShareVector,
        Ward, WardElectionHistory,
    };
    use crate::predict::WardPredictor;

    fn record(year: i32, kind: ElectionKind, candidates: &[(&str, f64)]) -> ElectionRecord {
        ElectionRecord {
            year,
            kind,
            electorate: 6000,
            turnout: 0.35,
            candidates: candidates.iter()
                .map(|&(party, share)| CandidateResult { party: party.to_string(), share, elected: false })
                .collect(),
        }
    }

    fn predictor<'a>(assumptions: &'a Assumptions, references: &'a ReferenceResults) -> WardPredictor<'a> {
        WardPredictor::new(assumptions, references, None, ElectionKind::Local, 2026)
    }

    #[test]
    fn prefers_most_recent_election_of_target_kind() {
        let history = WardElectionHistory::new(vec![
            record(2022, ElectionKind::Local, &[("Labour", 0.5)]),
            record(2024, ElectionKind::General, &[("Conservative", 0.6)]),
        ]);
        let ward = Ward::new("Abbey", history);
        let (assumptions, references) = (Assumptions::default(), ReferenceResults::default());
        let baseline = predictor(&assumptions, &references)
            .extract_baseline(&ward, &mut Vec::new())
            .unwrap();
        assert_eq!(baseline.year, 2022);
        assert_eq!(baseline.staleness, 4);
        assert_eq!(baseline.shares.get("Labour"), 0.5);
    }

    #[test]
    fn falls_back_to_any_kind_when_target_kind_is_absent() {
        let history = WardElectionHistory::new(vec![
            record(2024, ElectionKind::General, &[("Conservative", 0.6)]),
        ]);
        let ward = Ward::new("Abbey", history);
        let (assumptions, references) = (Assumptions::default(), ReferenceResults::default());
        let baseline = predictor(&assumptions, &references)
            .extract_baseline(&ward, &mut Vec::new())
            .unwrap();
        assert_eq!(baseline.year, 2024);
    }

    #[test]
    fn keeps_max_share_for_party_with_multiple_candidates() {
        let history = WardElectionHistory::new(vec![
            record(2024, ElectionKind::Local, &[("Labour", 0.30), ("Labour", 0.42), ("Green", 0.2)]),
        ]);
        let ward = Ward::new("Abbey", history);
        let (assumptions, references) = (Assumptions::default(), ReferenceResults::default());
        let baseline = predictor(&assumptions, &references)
            .extract_baseline(&ward, &mut Vec::new())
            .unwrap();
        assert_eq!(baseline.shares.get("Labour"), 0.42);
    }

    #[test]
    fn stale_baseline_blends_towards_constituency_result() {
        let history = WardElectionHistory::new(vec![
            record(2014, ElectionKind::Local, &[("Labour", 0.6), ("Independent", 0.4)]),
        ]);
        let mut ward = Ward::new("Abbey", history);
        ward.constituency_result = Some(ShareVector::from_pairs([("Labour", 0.3), ("Conservative", 0.5)]));
        let (assumptions, references) = (Assumptions::default(), ReferenceResults::default());
        let baseline = predictor(&assumptions, &references)
            .extract_baseline(&ward, &mut Vec::new())
            .unwrap();

        // staleness 12 => decay = max(0.3, 1 - 4*0.05) = 0.8
        assert!((baseline.shares.get("Labour") - (0.8 * 0.6 + 0.2 * 0.3)).abs() < 1e-9);
        assert!((baseline.shares.get("Conservative") - 0.2 * 0.5).abs() < 1e-9);
        // Local-only party: decayed history, zero fresh evidence.
        assert!((baseline.shares.get("Independent") - 0.8 * 0.4).abs() < 1e-9);
    }

    #[test]
    fn empty_history_yields_no_baseline() {
        let ward = Ward::new("Abbey", WardElectionHistory::default());
        let (assumptions, references) = (Assumptions::default(), ReferenceResults::default());
        assert!(predictor(&assumptions, &references).extract_baseline(&ward, &mut Vec::new()).is_none());
    }
}
