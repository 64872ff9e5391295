use std::collections::BTreeMap;

use geo::Point;

use super::history::WardElectionHistory;
use super::profile::{DemographicProfile, DeprivationProfile};
use super::shares::ShareVector;

/// Everything known about one ward going into a forecast.
///
/// All fields are read-only per invocation. Optional fields degrade the
/// forecast rather than failing it: a missing profile skips the demographic
/// stage, a missing centroid excludes the ward from canvass clustering.
#[derive(Debug, Clone)]
pub struct Ward {
    pub name: String,
    /// Whether a seat in this ward is up for contest this cycle.
    pub contested: bool,
    /// Party defending the seat up for contest, if known.
    pub defender: Option<String>,
    /// Whether the defending incumbent is standing down.
    pub defender_standing_down: bool,
    /// Seats not up for contest this cycle, credited to their holders
    /// directly (uncontested wards and the off-cycle seats of wards that
    /// elect by thirds).
    pub retained_seats: BTreeMap<String, u32>,
    pub history: WardElectionHistory,
    pub demographics: Option<DemographicProfile>,
    pub deprivation: Option<DeprivationProfile>,
    /// Ward centroid as (longitude, latitude).
    pub centroid: Option<Point<f64>>,
    /// Fresher constituency-level shares, blended into stale baselines.
    pub constituency_result: Option<ShareVector>,
}

impl Ward {
    /// A contested ward with the given name and history; other inputs start empty.
    pub fn new(name: &str, history: WardElectionHistory) -> Self {
        Self {
            name: name.to_string(),
            contested: true,
            defender: None,
            defender_standing_down: false,
            retained_seats: BTreeMap::new(),
            history,
            demographics: None,
            deprivation: None,
            centroid: None,
            constituency_result: None,
        }
    }
}
