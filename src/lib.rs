#![doc = "Wardcast public API"]
mod canvass;
mod council;
mod io;
mod model;
mod predict;
mod strategy;

#[doc(inline)]
pub use model::{
    Assumptions, Calibration, CandidateResult, Confidence, DemographicProfile,
    DeprivationProfile, ElectionKind, ElectionRecord, FeatureWeights, ProxyWeights,
    ReferenceResults, ShareVector, TrailEntry, Ward, WardElectionHistory, WardPrediction,
};

#[doc(inline)]
pub use predict::{DemographicModel, WardPredictor};

#[doc(inline)]
pub use council::{
    Coalition, CoalitionKind, CouncilForecast, SeatTotals, find_coalitions, forecast_council,
    majority_threshold,
};

#[doc(inline)]
pub use strategy::{
    Classification, PathToControl, RankedWard, ResourceAllocation, RoiTier, Scenario,
    TalkingPoint, WardClass, allocate_resources, classify_ward, path_to_control,
    rank_battlegrounds, swing_required,
};

#[doc(inline)]
pub use canvass::{
    CanvassPlan, CanvassSession, CanvassVisit, GeoCluster, RouteSegment, SESSION_WARD_CAP,
    cluster_wards, plan_canvassing,
};

#[doc(inline)]
pub use io::{allocation_csv, canvassing_csv};
