mod baseline;
mod demographics;
mod entrant;
mod incumbency;
mod normalize;
mod swing;

pub(crate) use baseline::Baseline;
pub use demographics::DemographicModel;

use crate::model::{
    Assumptions, Calibration, ElectionKind, ReferenceResults, TrailEntry, Ward, WardPrediction,
};

/// Produces a [`WardPrediction`] for one ward by folding the adjustment
/// stages, in order, onto the ward's historical baseline.
///
/// The stage order is load-bearing: swing must run before the entrant proxy
/// so the proxy can subtract the share swing already assigned, and nothing
/// renormalizes between stages. All configuration is carried by reference;
/// repeated predictions with different `Assumptions` cannot interfere.
pub struct WardPredictor<'a> {
    pub(crate) assumptions: &'a Assumptions,
    pub(crate) references: &'a ReferenceResults,
    pub(crate) calibration: Option<&'a Calibration>,
    pub(crate) target_kind: ElectionKind,
    pub(crate) current_year: i32,
}

impl<'a> WardPredictor<'a> {
    pub fn new(
        assumptions: &'a Assumptions,
        references: &'a ReferenceResults,
        calibration: Option<&'a Calibration>,
        target_kind: ElectionKind,
        current_year: i32,
    ) -> Self {
        Self { assumptions, references, calibration, target_kind, current_year }
    }

    /// Forecast a single ward.
    ///
    /// A ward with no electoral history yields an absent prediction
    /// (confidence `None`, diagnostic trail entry) and nothing downstream
    /// runs for it.
    pub fn predict(&self, ward: &Ward) -> WardPrediction {
        let mut trail = Vec::new();

        let Some(baseline) = self.extract_baseline(ward, &mut trail) else {
            return WardPrediction::absent(&ward.name, "no electoral history; ward cannot be forecast");
        };
        let mut shares = baseline.shares.clone();

        let (delta, note) = self.swing_delta();
        shares.add_all(&delta);
        trail.push(TrailEntry::new("swing", note));

        let model = DemographicModel::select(self.calibration);
        let (delta, note) = model.delta(ward);
        shares.add_all(&delta);
        trail.push(TrailEntry::new("demographics", note));

        let (delta, note) = self.incumbency_delta(ward, &baseline);
        shares.add_all(&delta);
        trail.push(TrailEntry::new("incumbency", note));

        let note = self.apply_entrant_proxy(&mut shares, &baseline);
        trail.push(TrailEntry::new("entrant-proxy", note));

        self.estimate(ward, &baseline, shares, trail)
    }
}
