mod allocate;
mod classify;
mod path;
mod rank;

pub use allocate::{ResourceAllocation, RoiTier, allocate_resources};
pub use classify::{Classification, WardClass, classify_ward, swing_required};
pub use path::{PathToControl, Scenario, path_to_control};
pub use rank::{RankedWard, TalkingPoint, rank_battlegrounds};
