use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::shares::ShareVector;

/// External comparison shares used when a party has no ward baseline and
/// for translating national movement into local swing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceResults {
    /// Current national polling averages.
    pub national_polling: ShareVector,
    /// The prior national (general) election result.
    pub prior_national: ShareVector,
    /// A recent comparable local election at a wider scope.
    pub recent_local: ShareVector,
}

/// Per-party regression weights over normalized ward features.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub over_65: f64,
    pub under_30: f64,
    pub minority_ethnic: f64,
    pub economically_inactive: f64,
    /// Weight on deprivation decile scaled into [0.1, 1.0].
    pub deprivation: f64,
}

/// Optional calibrated coefficients fitted against past forecast error.
///
/// Absence of a table (or of a party's entry within it) falls back to the
/// rule-based behaviour: global dampening, thresholded demographic bonuses,
/// margin-based confidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Calibration {
    /// Per-party national-to-local swing dampening coefficients.
    pub swing_dampening: BTreeMap<String, f64>,
    /// Per-party demographic regression coefficients.
    pub demographic_coefficients: BTreeMap<String, FeatureWeights>,
    /// Per-party historical mean absolute error of predicted shares.
    pub mean_absolute_error: BTreeMap<String, f64>,
}

impl Calibration {
    /// Whether any demographic regression coefficients were supplied.
    #[inline]
    pub fn has_demographic_model(&self) -> bool {
        !self.demographic_coefficients.is_empty()
    }
}
