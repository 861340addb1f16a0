//! Greedy nearest-neighbour waypoint ordering.
//!
//! Starting from a chosen waypoint, repeatedly step to the closest waypoint not
//! yet visited. The result is always a permutation of the input that favours
//! local proximity; it is a heuristic and makes no claim of producing the
//! shortest possible path. Each step scans every unvisited point, so ordering
//! `n` waypoints costs O(n²) distance evaluations.

use tracing::debug;

use crate::coordinate::Coordinate;
use crate::distance::{DistanceMetric, GeodesicMetric};
use crate::error::{Error, Result};

/// Order `waypoints` greedily by geodesic distance, starting at `start_index`.
///
/// # Examples
/// ```
/// use freightgis_lib::{optimize_waypoints, Coordinate};
///
/// let nyc = Coordinate::new(40.7128, -74.0060).unwrap();
/// let la = Coordinate::new(34.0522, -118.2437).unwrap();
/// let denver = Coordinate::new(39.7392, -104.9903).unwrap();
///
/// let ordered = optimize_waypoints(&[nyc, la, denver], 0).unwrap();
/// assert_eq!(ordered, vec![nyc, denver, la]);
/// ```
pub fn optimize_waypoints(waypoints: &[Coordinate], start_index: usize) -> Result<Vec<Coordinate>> {
    optimize_waypoints_with(&GeodesicMetric, waypoints, start_index)
}

/// Order `waypoints` greedily using an explicit distance metric.
pub fn optimize_waypoints_with<M: DistanceMetric + ?Sized>(
    metric: &M,
    waypoints: &[Coordinate],
    start_index: usize,
) -> Result<Vec<Coordinate>> {
    let order = nearest_neighbor_order(metric, waypoints, start_index)?;
    Ok(order.into_iter().map(|idx| waypoints[idx]).collect())
}

/// Compute the greedy visiting order as indices into `waypoints`.
///
/// Ties on distance are resolved in favour of the lowest original index, so
/// the ordering is fully reproducible for a given input.
pub fn nearest_neighbor_order<M: DistanceMetric + ?Sized>(
    metric: &M,
    waypoints: &[Coordinate],
    start_index: usize,
) -> Result<Vec<usize>> {
    if waypoints.is_empty() {
        return Ok(Vec::new());
    }

    if start_index >= waypoints.len() {
        return Err(Error::StartIndexOutOfRange {
            index: start_index,
            len: waypoints.len(),
        });
    }

    let mut visited = vec![false; waypoints.len()];
    let mut order = Vec::with_capacity(waypoints.len());
    visited[start_index] = true;
    order.push(start_index);

    let mut current = start_index;
    while order.len() < waypoints.len() {
        let mut best: Option<(usize, f64)> = None;
        for (idx, candidate) in waypoints.iter().enumerate() {
            if visited[idx] {
                continue;
            }
            let distance = metric.distance_km(&waypoints[current], candidate);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                // NaN never displaces a candidate but still fills an empty slot.
                Some(_) if distance.is_nan() => {}
                _ => best = Some((idx, distance)),
            }
        }

        let (next, distance) = match best {
            Some(found) => found,
            None => break,
        };
        debug!(from = current, to = next, distance_km = distance, "nearest neighbour");

        visited[next] = true;
        order.push(next);
        current = next;
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Treats latitude/longitude as plain cartesian units.
    struct Planar;

    impl DistanceMetric for Planar {
        fn distance_km(&self, a: &Coordinate, b: &Coordinate) -> f64 {
            let dx = a.latitude - b.latitude;
            let dy = a.longitude - b.longitude;
            (dx * dx + dy * dy).sqrt()
        }
    }

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn empty_input_yields_empty_order() {
        assert!(nearest_neighbor_order(&Planar, &[], 0).unwrap().is_empty());
        assert!(nearest_neighbor_order(&Planar, &[], 5).unwrap().is_empty());
    }

    #[test]
    fn single_waypoint_is_returned_unchanged() {
        let only = c(1.0, 2.0);
        assert_eq!(optimize_waypoints_with(&Planar, &[only], 0).unwrap(), vec![only]);
    }

    #[test]
    fn invalid_start_index_is_rejected() {
        let err = nearest_neighbor_order(&Planar, &[c(0.0, 0.0)], 1).unwrap_err();
        assert!(matches!(
            err,
            Error::StartIndexOutOfRange { index: 1, len: 1 }
        ));
    }

    #[test]
    fn visits_nearest_unvisited_each_step() {
        let points = [c(0.0, 0.0), c(0.0, 10.0), c(0.0, 1.0), c(0.0, 5.0)];
        let order = nearest_neighbor_order(&Planar, &points, 0).unwrap();
        assert_eq!(order, vec![0, 2, 3, 1]);
    }

    #[test]
    fn measures_from_most_recent_point_not_the_start() {
        // From 0 the nearest is 1; from 1 the nearest is 3 even though 2 is closer to 0.
        let points = [c(0.0, 0.0), c(0.0, 4.0), c(0.0, -5.0), c(0.0, 6.0)];
        let order = nearest_neighbor_order(&Planar, &points, 0).unwrap();
        assert_eq!(order, vec![0, 1, 3, 2]);
    }

    #[test]
    fn ties_prefer_lowest_index() {
        let points = [c(0.0, 0.0), c(0.0, 1.0), c(0.0, -1.0), c(1.0, 0.0)];
        let order = nearest_neighbor_order(&Planar, &points, 0).unwrap();
        assert_eq!(order[1], 1);
    }

    #[test]
    fn duplicates_are_kept() {
        let p = c(3.0, 3.0);
        let points = [p, c(0.0, 0.0), p];
        let ordered = optimize_waypoints_with(&Planar, &points, 1).unwrap();
        assert_eq!(ordered, vec![c(0.0, 0.0), p, p]);
    }

    #[test]
    fn honours_nonzero_start() {
        let points = [c(0.0, 0.0), c(0.0, 1.0), c(0.0, 2.0)];
        let order = nearest_neighbor_order(&Planar, &points, 2).unwrap();
        assert_eq!(order, vec![2, 1, 0]);
    }
}
