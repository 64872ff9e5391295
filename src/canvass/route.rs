use std::collections::HashMap;

use geo::Point;

use crate::canvass::cluster::haversine_distance;
use crate::canvass::{GeoCluster, cluster_wards};
use crate::strategy::{ResourceAllocation, RoiTier};

/// Default maximum wards per canvassing session.
pub const SESSION_WARD_CAP: usize = 8;

/// Hours in one canvassing block.
const BLOCK_HOURS: f64 = 4.0;

/// One ward stop within a session.
#[derive(Debug, Clone)]
pub struct CanvassVisit {
    pub ward: String,
    /// 1-based position within the session.
    pub order: u32,
    pub centroid: Point<f64>,
    pub hours: f64,
    pub roi: RoiTier,
}

/// An ordered canvassing session over one geographic cluster.
#[derive(Debug, Clone)]
pub struct CanvassSession {
    /// 1-based session number in route order.
    pub session: u32,
    pub visits: Vec<CanvassVisit>,
    pub total_hours: f64,
    /// Estimated 4-hour volunteer blocks needed to cover the session.
    pub blocks: u32,
}

/// A straight connecting line between consecutive stops, for map overlays.
#[derive(Debug, Clone)]
pub struct RouteSegment {
    pub from_ward: String,
    pub to_ward: String,
    pub from: Point<f64>,
    pub to: Point<f64>,
}

/// Ordered canvassing sessions plus the flat sequence of connecting
/// segments, including the connectors between sessions.
#[derive(Debug, Clone)]
pub struct CanvassPlan {
    pub sessions: Vec<CanvassSession>,
    pub segments: Vec<RouteSegment>,
}

/// Cluster allocated wards geographically and order the visits.
///
/// Wards without a centroid are left out of the plan; the rest of the batch
/// is unaffected. Session order is a nearest-neighbour walk over cluster
/// centroids starting from cluster 0, and visit order within a session is a
/// nearest-neighbour walk from the cluster's first ward. Greedy heuristics,
/// not optimal tours: the same input always produces the same route, which
/// matters more here than shaving minutes off the drive.
pub fn plan_canvassing(
    allocations: &[ResourceAllocation],
    centroids: &HashMap<String, Point<f64>>,
    session_cap: usize,
) -> CanvassPlan {
    let entries = allocations.iter()
        .filter_map(|a| centroids.get(&a.ward).map(|&p| (a.ward.clone(), p)))
        .collect::<Vec<_>>();
    let by_ward = allocations.iter().map(|a| (a.ward.as_str(), a)).collect::<HashMap<_, _>>();

    let clusters = cluster_wards(&entries, session_cap);
    let ward_points = entries.iter().cloned().collect::<HashMap<_, _>>();

    let mut sessions = Vec::new();
    for (number, cluster) in session_order(&clusters).into_iter().enumerate() {
        let cluster = &clusters[cluster];
        if cluster.wards.is_empty() {
            continue;
        }

        let ordered = visit_order(&cluster.wards, &ward_points);
        let visits = ordered.into_iter()
            .enumerate()
            .map(|(i, ward)| {
                let allocation = by_ward[ward.as_str()];
                CanvassVisit {
                    centroid: ward_points[&ward],
                    ward,
                    order: (i + 1) as u32,
                    hours: allocation.hours,
                    roi: allocation.roi,
                }
            })
            .collect::<Vec<_>>();

        let total_hours = visits.iter().map(|v| v.hours).sum::<f64>();
        sessions.push(CanvassSession {
            session: (number + 1) as u32,
            visits,
            total_hours,
            blocks: (total_hours / BLOCK_HOURS).ceil() as u32,
        });
    }
    // Renumber in case empty clusters were skipped.
    for (i, session) in sessions.iter_mut().enumerate() {
        session.session = (i + 1) as u32;
    }

    let segments = connect(&sessions);
    CanvassPlan { sessions, segments }
}

/// Nearest-neighbour order over cluster centroids, starting from cluster 0.
fn session_order(clusters: &[GeoCluster]) -> Vec<usize> {
    if clusters.is_empty() {
        return Vec::new();
    }
    let mut order = vec![0usize];
    let mut remaining = (1..clusters.len()).collect::<Vec<_>>();
    while !remaining.is_empty() {
        let here = clusters[*order.last().expect("order starts non-empty")].centroid;
        let nearest = remaining.iter()
            .enumerate()
            .min_by(|a, b| {
                let da = haversine_distance(here, clusters[*a.1].centroid);
                let db = haversine_distance(here, clusters[*b.1].centroid);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
            .expect("remaining is non-empty");
        order.push(remaining.remove(nearest));
    }
    order
}

/// Nearest-neighbour walk over a cluster's wards from its first member.
fn visit_order(wards: &[String], points: &HashMap<String, Point<f64>>) -> Vec<String> {
    let mut order = vec![wards[0].clone()];
    let mut remaining = wards[1..].to_vec();
    while !remaining.is_empty() {
        let here = points[order.last().expect("order starts non-empty")];
        let nearest = remaining.iter()
            .enumerate()
            .min_by(|a, b| {
                let da = haversine_distance(here, points[a.1]);
                let db = haversine_distance(here, points[b.1]);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
            .expect("remaining is non-empty");
        order.push(remaining.remove(nearest));
    }
    order
}

/// Segments between consecutive visits, with a connector from each session's
/// last stop to the next session's first.
fn connect(sessions: &[CanvassSession]) -> Vec<RouteSegment> {
    let mut segments = Vec::new();
    for (i, session) in sessions.iter().enumerate() {
        for pair in session.visits.windows(2) {
            segments.push(segment(&pair[0], &pair[1]));
        }
        if let (Some(last), Some(next)) = (
            session.visits.last(),
            sessions.get(i + 1).and_then(|s| s.visits.first()),
        ) {
            segments.push(segment(last, next));
        }
    }
    segments
}

fn segment(from: &CanvassVisit, to: &CanvassVisit) -> RouteSegment {
    RouteSegment {
        from_ward: from.ward.clone(),
        to_ward: to.ward.clone(),
        from: from.centroid,
        to: to.centroid,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use geo::Point;

    use crate::strategy::{ResourceAllocation, RoiTier, WardClass};

    use super::plan_canvassing;

    fn allocation(ward: &str, hours: f64) -> ResourceAllocation {
        ResourceAllocation {
            ward: ward.to_string(),
            classification: WardClass::Battleground,
            score: 60,
            win_probability: 0.5,
            hours,
            percent_of_budget: 10.0,
            estimated_votes: hours * 0.48,
            cost_per_vote: 2.08,
            roi: RoiTier::High,
        }
    }

    fn centroids(points: &[(&str, f64, f64)]) -> HashMap<String, Point<f64>> {
        points.iter().map(|&(w, lon, lat)| (w.to_string(), Point::new(lon, lat))).collect()
    }

    #[test]
    fn every_ward_appears_exactly_once_with_correct_totals() {
        let allocations = vec![
            allocation("A1", 10.0), allocation("A2", 6.0), allocation("A3", 4.0),
            allocation("B1", 8.0), allocation("B2", 6.0), allocation("B3", 6.0),
        ];
        let centroids = centroids(&[
            ("A1", 0.00, 52.00), ("A2", 0.01, 52.01), ("A3", 0.02, 52.00),
            ("B1", 1.00, 53.00), ("B2", 1.01, 53.01), ("B3", 1.02, 53.00),
        ]);
        let plan = plan_canvassing(&allocations, &centroids, 3);

        let mut seen = plan.sessions.iter()
            .flat_map(|s| s.visits.iter().map(|v| v.ward.clone()))
            .collect::<Vec<_>>();
        seen.sort();
        assert_eq!(seen, vec!["A1", "A2", "A3", "B1", "B2", "B3"]);

        for session in &plan.sessions {
            let hours = session.visits.iter().map(|v| v.hours).sum::<f64>();
            assert!((session.total_hours - hours).abs() < 1e-9);
            let orders = session.visits.iter().map(|v| v.order).collect::<Vec<_>>();
            assert_eq!(orders, (1..=session.visits.len() as u32).collect::<Vec<_>>());
        }
        // 20 hours in each group => 5 four-hour blocks.
        assert!(plan.sessions.iter().all(|s| s.blocks == 5));
    }

    #[test]
    fn segments_connect_sessions_end_to_end() {
        let allocations = vec![
            allocation("A1", 4.0), allocation("A2", 4.0),
            allocation("B1", 4.0), allocation("B2", 4.0),
        ];
        let centroids = centroids(&[
            ("A1", 0.00, 52.00), ("A2", 0.01, 52.01),
            ("B1", 1.00, 53.00), ("B2", 1.01, 53.01),
        ]);
        let plan = plan_canvassing(&allocations, &centroids, 2);

        assert_eq!(plan.sessions.len(), 2);
        // 1 intra-session segment per session + 1 inter-session connector.
        assert_eq!(plan.segments.len(), 3);
        let connector = &plan.segments[1];
        assert_eq!(connector.from_ward, plan.sessions[0].visits.last().unwrap().ward);
        assert_eq!(connector.to_ward, plan.sessions[1].visits[0].ward);
    }

    #[test]
    fn wards_without_centroids_are_skipped_not_fatal() {
        let allocations = vec![allocation("A1", 4.0), allocation("Ghost", 4.0)];
        let centroids = centroids(&[("A1", 0.0, 52.0)]);
        let plan = plan_canvassing(&allocations, &centroids, 8);
        assert_eq!(plan.sessions.len(), 1);
        assert_eq!(plan.sessions[0].visits.len(), 1);
        assert!(plan.segments.is_empty());
    }

    #[test]
    fn empty_input_yields_an_empty_plan() {
        let plan = plan_canvassing(&[], &HashMap::new(), 8);
        assert!(plan.sessions.is_empty());
        assert!(plan.segments.is_empty());
    }
}
