use geo::Point;

/// Assignment passes before k-means gives up on convergence.
const MAX_ITERATIONS: usize = 20;

/// Mean Earth radius in meters.
const EARTH_RADIUS: f64 = 6_371_000.0;

/// Great-circle (haversine) distance in meters between two (lon, lat) points.
pub(crate) fn haversine_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    let d_lat = (b.y() - a.y()).to_radians();
    let d_lon = (b.x() - a.x()).to_radians();
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS * h.sqrt().asin()
}

/// A group of wards close enough to canvass in one session.
#[derive(Debug, Clone)]
pub struct GeoCluster {
    /// Member wards, in input order.
    pub wards: Vec<String>,
    pub centroid: Point<f64>,
}

/// Group wards into clusters of at most roughly `session_cap` members by
/// centroid proximity.
///
/// At or below the cap everything is one cluster. Above it, bounded k-means
/// with `k = ceil(n / cap)` runs for at most 20 iterations, exiting early
/// once assignments stabilise. Seeds are taken at even index spacing
/// through the input, so the same input always yields the same clusters;
/// this is a determinism choice, not a claim of optimal seeding.
pub fn cluster_wards(entries: &[(String, Point<f64>)], session_cap: usize) -> Vec<GeoCluster> {
    assert!(session_cap > 0, "session_cap must be at least 1");
    if entries.is_empty() {
        return Vec::new();
    }

    if entries.len() <= session_cap {
        return vec![GeoCluster {
            wards: entries.iter().map(|(name, _)| name.clone()).collect(),
            centroid: mean_point(entries.iter().map(|&(_, p)| p)),
        }];
    }

    let n = entries.len();
    let k = n.div_ceil(session_cap);
    let mut centroids = (0..k).map(|i| entries[i * n / k].1).collect::<Vec<_>>();
    let mut assignment = vec![0usize; n];

    for _ in 0..MAX_ITERATIONS {
        // Assign each ward to its nearest centroid (first wins on ties).
        let next = entries.iter()
            .map(|&(_, point)| {
                let mut best = 0;
                let mut best_distance = f64::INFINITY;
                for (cluster, &centroid) in centroids.iter().enumerate() {
                    let distance = haversine_distance(point, centroid);
                    if distance < best_distance {
                        best = cluster;
                        best_distance = distance;
                    }
                }
                best
            })
            .collect::<Vec<_>>();

        let stable = next == assignment;
        assignment = next;
        if stable {
            break;
        }

        // Recompute centroids; an empty cluster keeps its previous one.
        for cluster in 0..k {
            let members = entries.iter()
                .zip(&assignment)
                .filter(|&(_, &a)| a == cluster)
                .map(|(&(_, p), _)| p)
                .collect::<Vec<_>>();
            if !members.is_empty() {
                centroids[cluster] = mean_point(members.into_iter());
            }
        }
    }

    (0..k)
        .map(|cluster| GeoCluster {
            wards: entries.iter()
                .zip(&assignment)
                .filter(|&(_, &a)| a == cluster)
                .map(|((name, _), _)| name.clone())
                .collect(),
            centroid: centroids[cluster],
        })
        .collect()
}

fn mean_point(points: impl Iterator<Item = Point<f64>>) -> Point<f64> {
    let (mut x, mut y, mut count) = (0.0, 0.0, 0usize);
    for point in points {
        x += point.x();
        y += point.y();
        count += 1;
    }
    Point::new(x / count as f64, y / count as f64)
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::{cluster_wards, haversine_distance};

    fn entries(points: &[(&str, f64, f64)]) -> Vec<(String, Point<f64>)> {
        points.iter().map(|&(name, lon, lat)| (name.to_string(), Point::new(lon, lat))).collect()
    }

    #[test]
    fn haversine_matches_a_known_distance() {
        // London (-0.1276, 51.5072) to Birmingham (-1.8904, 52.4862): ~163 km.
        let d = haversine_distance(Point::new(-0.1276, 51.5072), Point::new(-1.8904, 52.4862));
        assert!((d - 163_000.0).abs() < 5_000.0, "got {d}");
    }

    #[test]
    fn small_inputs_form_one_cluster_with_mean_centroid() {
        let input = entries(&[("Abbey", 0.0, 52.0), ("Castle", 0.2, 52.2)]);
        let clusters = cluster_wards(&input, 8);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].wards, vec!["Abbey".to_string(), "Castle".to_string()]);
        assert!((clusters[0].centroid.x() - 0.1).abs() < 1e-9);
        assert!((clusters[0].centroid.y() - 52.1).abs() < 1e-9);
    }

    #[test]
    fn clustering_partitions_the_input_exactly() {
        // Two well-separated groups of three, cap 3 => k = 2.
        let input = entries(&[
            ("A1", 0.00, 52.00), ("A2", 0.01, 52.01), ("A3", 0.02, 52.00),
            ("B1", 1.00, 53.00), ("B2", 1.01, 53.01), ("B3", 1.02, 53.00),
        ]);
        let clusters = cluster_wards(&input, 3);
        assert_eq!(clusters.len(), 2);

        let mut all = clusters.iter().flat_map(|c| c.wards.clone()).collect::<Vec<_>>();
        all.sort();
        assert_eq!(all, vec!["A1", "A2", "A3", "B1", "B2", "B3"]);
        // The separated groups end up in distinct clusters.
        assert!(clusters.iter().any(|c| c.wards.contains(&"A1".to_string()) && c.wards.len() == 3));
    }

    #[test]
    fn clustering_is_deterministic() {
        let input = entries(&[
            ("A1", 0.00, 52.00), ("B1", 1.00, 53.00), ("A2", 0.01, 52.01),
            ("B2", 1.01, 53.01), ("A3", 0.02, 52.00), ("B3", 1.02, 53.00),
        ]);
        let first = cluster_wards(&input, 3);
        let second = cluster_wards(&input, 3);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.wards, b.wards);
        }
    }
}
