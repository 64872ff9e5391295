use std::collections::BTreeSet;

use crate::model::ShareVector;
use crate::predict::WardPredictor;

impl WardPredictor<'_> {
    /// Dampening coefficient for one party: calibrated when available,
    /// otherwise the global assumption.
    pub(crate) fn party_dampening(&self, party: &str) -> f64 {
        self.calibration
            .and_then(|c| c.swing_dampening.get(party).copied())
            .map(|d| d.clamp(0.0, 1.0))
            .unwrap_or_else(|| self.assumptions.dampening())
    }

    /// Uniform national swing, dampened for local transfer.
    ///
    /// For every party in either polling series:
    /// `delta = (polling - prior national) * dampening * multiplier`.
    /// Parties outside the national series are untouched.
    pub(crate) fn swing_delta(&self) -> (ShareVector, String) {
        let multiplier = self.assumptions.swing_multiplier();
        let parties = self.references.national_polling.parties()
            .chain(self.references.prior_national.parties())
            .map(str::to_string)
            .collect::<BTreeSet<_>>();

        let mut delta = ShareVector::new();
        for party in &parties {
            let movement = self.references.national_polling.get(party)
                - self.references.prior_national.get(party);
            let adjusted = movement * self.party_dampening(party) * multiplier;
            if adjusted != 0.0 {
                delta.set(party, adjusted);
            }
        }

        let note = match delta.ranked().first() {
            Some(&(party, strongest)) => format!(
                "dampened national swing across {} parties (multiplier {:.2}); strongest move {} {:+.1}pp",
                delta.len(), multiplier, party, strongest * 100.0,
            ),
            None => "no national movement to apply".to_string(),
        };
        (delta, note)
    }
}
