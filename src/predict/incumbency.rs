use crate::model::{ShareVector, Ward};
use crate::predict::{Baseline, WardPredictor};

impl WardPredictor<'_> {
    /// Incumbency adjustment for the defending party.
    ///
    /// A defending incumbent standing again gets the configured bonus,
    /// halved when the baseline is more than 10 years old (the personal
    /// vote decays with the evidence). An incumbent standing down flips
    /// the bonus to the retirement penalty.
    pub(crate) fn incumbency_delta(&self, ward: &Ward, baseline: &Baseline) -> (ShareVector, String) {
        let Some(defender) = &ward.defender else {
            return (ShareVector::new(), "no defending party known; stage skipped".to_string());
        };

        let mut delta = ShareVector::new();
        let note;
        if ward.defender_standing_down {
            let penalty = self.assumptions.retirement_penalty_pct;
            delta.set(defender, -penalty);
            note = format!("{} incumbent standing down: {:.1}pp retirement penalty", defender, -penalty * 100.0);
        } else {
            let mut bonus = self.assumptions.incumbency_bonus_pct;
            if baseline.staleness > 10 {
                bonus /= 2.0;
            }
            delta.set(defender, bonus);
            note = format!(
                "{} defending: {:+.1}pp incumbency bonus{}",
                defender,
                bonus * 100.0,
                if baseline.staleness > 10 { " (halved, stale baseline)" } else { "" },
            );
        }
        (delta, note)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Assumptions, ElectionKind, ReferenceResults, ShareVector, Ward, WardElectionHistory};
    use crate::predict::{Baseline, WardPredictor};

    fn baseline(staleness: i32) -> Baseline {
        Baseline { shares: ShareVector::new(), year: 2026 - staleness, turnout: 0.35, electorate: 6000, staleness }
    }

    #[test]
    fn defender_gets_bonus_halved_when_stale() {
        let assumptions = Assumptions { incumbency_bonus_pct: 0.04, ..Default::default() };
        let references = ReferenceResults::default();
        let predictor = WardPredictor::new(&assumptions, &references, None, ElectionKind::Local, 2026);
        let mut ward = Ward::new("Abbey", WardElectionHistory::default());
        ward.defender = Some("Labour".to_string());

        let (delta, _) = predictor.incumbency_delta(&ward, &baseline(4));
        assert!((delta.get("Labour") - 0.04).abs() < 1e-12);

        let (delta, note) = predictor.incumbency_delta(&ward, &baseline(12));
        assert!((delta.get("Labour") - 0.02).abs() < 1e-12);
        assert!(note.contains("halved"));
    }

    #[test]
    fn retirement_replaces_bonus_with_penalty() {
        let assumptions = Assumptions { retirement_penalty_pct: 0.02, ..Default::default() };
        let references = ReferenceResults::default();
        let predictor = WardPredictor::new(&assumptions, &references, None, ElectionKind::Local, 2026);
        let mut ward = Ward::new("Abbey", WardElectionHistory::default());
        ward.defender = Some("Labour".to_string());
        ward.defender_standing_down = true;

        let (delta, _) = predictor.incumbency_delta(&ward, &baseline(4));
        assert!((delta.get("Labour") + 0.02).abs() < 1e-12);
    }

    #[test]
    fn no_defender_is_a_noop() {
        let assumptions = Assumptions::default();
        let references = ReferenceResults::default();
        let predictor = WardPredictor::new(&assumptions, &references, None, ElectionKind::Local, 2026);
        let ward = Ward::new("Abbey", WardElectionHistory::default());

        let (delta, note) = predictor.incumbency_delta(&ward, &baseline(4));
        assert!(delta.is_empty());
        assert!(note.contains("skipped"));
    }
}
