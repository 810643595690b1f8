//! Itinerary builder: greedy nearest-neighbor route ordering.
//!
//! This is a cheap approximation, not a tour solver. Whatever order the
//! generation service returned is discarded; only the first element is kept
//! as the starting point.

use tracing::debug;

use crate::place::{Itinerary, Place};
use crate::traits::{DistanceMetric, Located};

/// Squared Euclidean distance in raw (lat, lng) degree space.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredEuclidean;

impl DistanceMetric for SquaredEuclidean {
    fn distance(&self, from: (f64, f64), to: (f64, f64)) -> f64 {
        let d_lat = to.0 - from.0;
        let d_lng = to.1 - from.1;
        d_lat * d_lat + d_lng * d_lng
    }
}

/// Orders `items` by repeatedly hopping to the nearest unvisited item.
///
/// The first item is the start. Ties go to the item that appears first in
/// the input. Output is always a permutation of the input.
pub fn nearest_neighbor_order<T, M>(items: Vec<T>, metric: &M) -> Vec<T>
where
    T: Located,
    M: DistanceMetric,
{
    let mut unvisited = items;
    if unvisited.is_empty() {
        return unvisited;
    }

    let mut ordered = Vec::with_capacity(unvisited.len());
    ordered.push(unvisited.remove(0));

    while !unvisited.is_empty() {
        let last = ordered[ordered.len() - 1].location();

        let mut best_index = 0;
        let mut best_distance = f64::INFINITY;
        for (index, candidate) in unvisited.iter().enumerate() {
            let distance = metric.distance(last, candidate.location());
            // Strict comparison keeps the earliest candidate on ties.
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }

        // Vec::remove keeps the remaining order intact for later tie-breaks.
        ordered.push(unvisited.remove(best_index));
    }

    ordered
}

/// Orders places with [`SquaredEuclidean`] and renumbers them from 1.
pub fn build_itinerary(places: Vec<Place>) -> Itinerary {
    build_itinerary_with(places, &SquaredEuclidean)
}

/// Same as [`build_itinerary`] with a caller-chosen metric.
pub fn build_itinerary_with<M: DistanceMetric>(places: Vec<Place>, metric: &M) -> Itinerary {
    let count = places.len();
    let itinerary = Itinerary::from_visiting_order(nearest_neighbor_order(places, metric));
    debug!(
        places = count,
        order = ?itinerary.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        "ordered itinerary"
    );
    itinerary
}

/// Resets sequence numbers to `1..=N` by list position.
pub fn renumber(places: &mut [Place]) {
    for (position, place) in places.iter_mut().enumerate() {
        place.sequence_number = position as u32 + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point(f64, f64);

    impl Located for Point {
        fn location(&self) -> (f64, f64) {
            (self.0, self.1)
        }
    }

    #[test]
    fn test_squared_euclidean() {
        assert_eq!(SquaredEuclidean.distance((0.0, 0.0), (3.0, 4.0)), 25.0);
    }

    #[test]
    fn test_empty_input() {
        let ordered: Vec<Point> = nearest_neighbor_order(Vec::new(), &SquaredEuclidean);
        assert!(ordered.is_empty());
    }

    #[test]
    fn test_single_item() {
        let ordered = nearest_neighbor_order(vec![Point(5.0, 5.0)], &SquaredEuclidean);
        assert_eq!(ordered.len(), 1);
    }

    #[test]
    fn test_start_is_preserved() {
        let ordered = nearest_neighbor_order(
            vec![Point(9.0, 9.0), Point(0.0, 0.0), Point(8.0, 8.0)],
            &SquaredEuclidean,
        );
        let coords: Vec<(f64, f64)> = ordered.iter().map(Located::location).collect();
        assert_eq!(coords, vec![(9.0, 9.0), (8.0, 8.0), (0.0, 0.0)]);
    }

    #[test]
    fn test_renumber() {
        let mut places = vec![
            crate::place::Place::new("x", crate::place::Category::Optional, 0.0, 0.0),
            crate::place::Place::new("y", crate::place::Category::Optional, 0.0, 0.0),
        ];
        places[0].sequence_number = 4;
        places[1].sequence_number = 4;
        renumber(&mut places);
        assert_eq!(places[0].sequence_number, 1);
        assert_eq!(places[1].sequence_number, 2);
    }
}
