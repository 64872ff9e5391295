mod cluster;
mod route;

pub use cluster::{GeoCluster, cluster_wards};
pub use route::{
    CanvassPlan, CanvassSession, CanvassVisit, RouteSegment, SESSION_WARD_CAP, plan_canvassing,
};
