use crate::model::ShareVector;
use crate::predict::{Baseline, WardPredictor};

impl WardPredictor<'_> {
    /// Proxy shares for parties with no ward baseline.
    ///
    /// A party polled nationally but absent from the ward's baseline has no
    /// local evidence at all, so its share is proxied from two reference
    /// scopes (recent comparable local election, current national polling),
    /// each independently dampened, then moved by the same swing logic the
    /// established parties got. The share the swing stage already assigned
    /// is subtracted before the remainder is added, and the remainder is
    /// funded by the other parties in proportion to their current
    /// (post-adjustment) shares, not their original baselines.
    pub(crate) fn apply_entrant_proxy(&self, shares: &mut ShareVector, baseline: &Baseline) -> String {
        if !self.assumptions.reform_stands_in_all_wards {
            return "entrant participation disabled; stage skipped".to_string();
        }

        let weights = self.assumptions.reform_proxy_weights;
        let entrants = self.references.national_polling.parties()
            .filter(|p| !baseline.shares.contains(p))
            .map(str::to_string)
            .collect::<Vec<_>>();
        if entrants.is_empty() {
            return "every polled party has a ward baseline; nothing to proxy".to_string();
        }

        let mut applied = Vec::new();
        for party in &entrants {
            let party = party.as_str();
            let dampening = self.party_dampening(party);
            let proxy = weights.primary * dampening * self.references.recent_local.get(party)
                + weights.secondary * dampening * self.references.national_polling.get(party);
            let swing_term = (self.references.national_polling.get(party)
                - self.references.prior_national.get(party))
                * dampening
                * self.assumptions.swing_multiplier();

            // Swing has already moved this party; only the remainder is new.
            let remainder = proxy + swing_term - shares.get(party);
            if remainder <= 0.0 {
                continue;
            }

            let others_total = shares.iter()
                .filter(|(p, share)| *p != party && *share > 0.0)
                .map(|(_, share)| share)
                .sum::<f64>();
            if others_total > 0.0 {
                let deductions = shares.iter()
                    .filter(|(p, share)| *p != party && *share > 0.0)
                    .map(|(p, share)| (p.to_string(), share / others_total * remainder))
                    .collect::<Vec<_>>();
                for (p, deduction) in deductions {
                    shares.add(&p, -deduction);
                }
            }
            shares.add(party, remainder);
            applied.push(format!("{} {:+.1}pp", party, remainder * 100.0));
        }

        if applied.is_empty() {
            "swing already covers every absent party's proxy share".to_string()
        } else {
            format!("proxied shares for parties without a ward baseline: {}", applied.join(", "))
        }
    }
}
