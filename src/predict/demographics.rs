use crate::model::{Calibration, DemographicProfile, DeprivationProfile, ShareVector, Ward};

/// Largest adjustment (either direction) the regression model may propose
/// for one party.
const REGRESSION_BOUND: f64 = 0.08;

/// Proposes per-party share deltas from a ward's demographic and deprivation
/// profiles.
///
/// Two interchangeable models: fixed thresholded rules, or a regression over
/// calibrated per-party coefficients. [`DemographicModel::select`] picks the
/// regression whenever calibrated coefficients are present.
#[derive(Debug, Clone)]
pub enum DemographicModel<'a> {
    /// Fixed thresholded bonuses.
    Rules,
    /// Dot product of normalized ward features with calibrated weights.
    Regression(&'a Calibration),
}

impl<'a> DemographicModel<'a> {
    /// Pick the model: regression when calibrated coefficients are supplied,
    /// otherwise the rules.
    pub fn select(calibration: Option<&'a Calibration>) -> Self {
        match calibration {
            Some(c) if c.has_demographic_model() => DemographicModel::Regression(c),
            _ => DemographicModel::Rules,
        }
    }

    /// Propose per-party deltas for one ward, with a rationale for the trail.
    pub(crate) fn delta(&self, ward: &Ward) -> (ShareVector, String) {
        let Some(demographics) = &ward.demographics else {
            return (ShareVector::new(), "no demographic profile; stage skipped".to_string());
        };
        match self {
            DemographicModel::Rules => rule_delta(demographics, ward.deprivation.as_ref()),
            DemographicModel::Regression(calibration) => {
                regression_delta(calibration, demographics, ward.deprivation.as_ref())
            }
        }
    }
}

/// Thresholded demographic bonuses:
/// - over-65 fraction above 0.25: Conservative +3pp (older wards lean right
///   in local contests);
/// - deprivation decile 1-2: Labour +4pp;
/// - minority-ethnic fraction above 0.30: Labour +2pp;
/// - under-30 fraction above 0.40: Green +1.5pp.
fn rule_delta(
    demographics: &DemographicProfile,
    deprivation: Option<&DeprivationProfile>,
) -> (ShareVector, String) {
    let mut delta = ShareVector::new();
    let mut fired = Vec::new();

    if demographics.over_65_fraction() > 0.25 {
        delta.add("Conservative", 0.03);
        fired.push(format!("over-65 {:.0}% > 25% (Con +3pp)", demographics.over_65_fraction() * 100.0));
    }
    if let Some(deprivation) = deprivation {
        if deprivation.decile <= 2 {
            delta.add("Labour", 0.04);
            fired.push(format!("deprivation decile {} <= 2 (Lab +4pp)", deprivation.decile));
        }
    }
    if demographics.minority_ethnic_fraction() > 0.30 {
        delta.add("Labour", 0.02);
        fired.push(format!(
            "minority-ethnic {:.0}% > 30% (Lab +2pp)",
            demographics.minority_ethnic_fraction() * 100.0,
        ));
    }
    if demographics.under_30_fraction() > 0.40 {
        delta.add("Green", 0.015);
        fired.push(format!("under-30 {:.0}% > 40% (Green +1.5pp)", demographics.under_30_fraction() * 100.0));
    }

    let note = if fired.is_empty() {
        "rule-based model: no demographic thresholds met".to_string()
    } else {
        format!("rule-based model: {}", fired.join(", "))
    };
    (delta, note)
}

/// Normalized feature vector for the regression model. Fractions are already
/// in [0, 1]; the deprivation decile is rescaled to [0.1, 1.0].
fn features(demographics: &DemographicProfile, deprivation: Option<&DeprivationProfile>) -> [f64; 5] {
    [
        demographics.over_65_fraction(),
        demographics.under_30_fraction(),
        demographics.minority_ethnic_fraction(),
        demographics.economically_inactive_fraction(),
        deprivation.map(|d| d.decile as f64 / 10.0).unwrap_or(0.5),
    ]
}

fn regression_delta(
    calibration: &Calibration,
    demographics: &DemographicProfile,
    deprivation: Option<&DeprivationProfile>,
) -> (ShareVector, String) {
    let x = features(demographics, deprivation);
    let mut delta = ShareVector::new();
    for (party, w) in &calibration.demographic_coefficients {
        let raw = w.over_65 * x[0]
            + w.under_30 * x[1]
            + w.minority_ethnic * x[2]
            + w.economically_inactive * x[3]
            + w.deprivation * x[4];
        let bounded = raw.clamp(-REGRESSION_BOUND, REGRESSION_BOUND);
        if bounded != 0.0 {
            delta.set(party, bounded);
        }
    }
    let note = format!(
        "regression model: calibrated coefficients for {} parties (bounded to ±{:.0}pp)",
        calibration.demographic_coefficients.len(),
        REGRESSION_BOUND * 100.0,
    );
    (delta, note)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::model::{
        Calibration, DemographicProfile, DeprivationProfile, FeatureWeights, Ward,
        WardElectionHistory,
    };

    use super::DemographicModel;

    fn ward_with(demographics: DemographicProfile, deprivation: Option<DeprivationProfile>) -> Ward {
        let mut ward = Ward::new("Abbey", WardElectionHistory::default());
        ward.demographics = Some(demographics);
        ward.deprivation = deprivation;
        ward
    }

    #[test]
    fn selection_uses_regression_only_when_coefficients_exist() {
        assert!(matches!(DemographicModel::select(None), DemographicModel::Rules));

        let empty = Calibration::default();
        assert!(matches!(DemographicModel::select(Some(&empty)), DemographicModel::Rules));

        let calibrated = Calibration {
            demographic_coefficients: BTreeMap::from([("Labour".to_string(), FeatureWeights::default())]),
            ..Default::default()
        };
        assert!(matches!(DemographicModel::select(Some(&calibrated)), DemographicModel::Regression(_)));
    }

    #[test]
    fn rules_fire_on_documented_thresholds() {
        let ward = ward_with(
            DemographicProfile { population: 1000, over_65: 300, ..Default::default() },
            Some(DeprivationProfile { index: 45.0, decile: 1 }),
        );
        let (delta, note) = DemographicModel::Rules.delta(&ward);
        assert!((delta.get("Conservative") - 0.03).abs() < 1e-12);
        assert!((delta.get("Labour") - 0.04).abs() < 1e-12);
        assert!(note.contains("over-65"));
    }

    #[test]
    fn rules_are_silent_below_thresholds() {
        let ward = ward_with(
            DemographicProfile { population: 1000, over_65: 250, ..Default::default() },
            Some(DeprivationProfile { index: 10.0, decile: 7 }),
        );
        let (delta, _) = DemographicModel::Rules.delta(&ward);
        assert!(delta.is_empty());
    }

    #[test]
    fn missing_profile_is_a_noop() {
        let ward = Ward::new("Abbey", WardElectionHistory::default());
        let (delta, note) = DemographicModel::Rules.delta(&ward);
        assert!(delta.is_empty());
        assert!(note.contains("skipped"));
    }

    #[test]
    fn regression_is_bounded() {
        let calibration = Calibration {
            demographic_coefficients: BTreeMap::from([(
                "Labour".to_string(),
                FeatureWeights { over_65: 5.0, ..Default::default() },
            )]),
            ..Default::default()
        };
        let ward = ward_with(
            DemographicProfile { population: 1000, over_65: 500, ..Default::default() },
            None,
        );
        let (delta, _) = DemographicModel::Regression(&calibration).delta(&ward);
        assert!((delta.get("Labour") - 0.08).abs() < 1e-12);
    }
}
