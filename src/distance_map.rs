use dashmap::DashMap;
use rayon::prelude::*;

use crate::point::Point;
use crate::point::PointSet;

/// Symmetric cost between two points.
pub trait Metric: Send + Sync {
    fn distance(&self, point1: &Point, point2: &Point) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, point1: &Point, point2: &Point) -> f64 {
        let dx = point1.x - point2.x;
        let dy = point1.y - point2.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Pairwise distances between the points of a set, addressed by index.
#[derive(Clone, Debug)]
pub struct DistanceMap {
    map: DashMap<(usize, usize), f64>,
    num_points: usize,
}

impl DistanceMap {
    /* Calculate every unordered pair once and store it, keyed by (smaller, larger) index. */
    pub fn new<M: Metric>(points: &PointSet, metric: &M) -> DistanceMap {
        let num_points = points.len();
        let map = DashMap::with_capacity(num_points * num_points.saturating_sub(1) / 2);

        points.points().par_iter().enumerate().for_each(|(i, point1)| {
            for (j, point2) in points.points().iter().enumerate().skip(i + 1) {
                map.insert((i, j), metric.distance(point1, point2));
            }
        });

        DistanceMap { map, num_points }
    }

    pub fn point_count(&self) -> usize {
        self.num_points
    }

    pub fn len(&self) -> usize {
        self.point_count()
    }

    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    pub fn get(&self, point1: usize, point2: usize) -> f64 {
        /* Return 0 if they are the same point */
        if point1 == point2 {
            return 0.0;
        }

        let (smaller, larger) = if point1 < point2 {
            (point1, point2)
        } else {
            (point2, point1)
        };

        debug_assert!(
            larger < self.num_points,
            "called `DistanceMap::get` with index out of bounds: the len is {} but the index is {}",
            self.num_points,
            larger
        );

        /* A missing pair must never look free. */
        self.map.get(&(smaller, larger)).map_or(f64::INFINITY, |v| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PointSet {
        PointSet::new(vec![
            Point::depot(0, 0.0, 0.0),
            Point::new(1, 0.0, 10.0),
            Point::new(2, 10.0, 10.0),
            Point::new(3, 10.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_euclidean_is_symmetric() {
        let a = Point::new(0, 1.0, 2.0);
        let b = Point::new(1, 4.0, 6.0);
        assert_eq!(Euclidean.distance(&a, &b), 5.0);
        assert_eq!(Euclidean.distance(&a, &b), Euclidean.distance(&b, &a));
        assert_eq!(Euclidean.distance(&a, &a), 0.0);
    }

    #[test]
    fn test_distance_map_covers_all_pairs() {
        let set = square();
        let map = DistanceMap::new(&set, &Euclidean);
        assert_eq!(map.len(), 4);
        assert_eq!(map.get(0, 1), 10.0);
        assert_eq!(map.get(1, 0), 10.0);
        assert_eq!(map.get(2, 2), 0.0);
        assert!((map.get(0, 2) - 200f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_distance_map_single_point() {
        let set = PointSet::new(vec![Point::depot(0, 3.0, 3.0)]).unwrap();
        let map = DistanceMap::new(&set, &Euclidean);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(0, 0), 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "index out of bounds")]
    fn test_distance_map_out_of_range_panics() {
        let map = DistanceMap::new(&square(), &Euclidean);
        map.get(0, 7);
    }
}
