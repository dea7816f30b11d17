use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::point::Point;

/// A closed tour, depot first, together with its length.
#[derive(Clone, Debug, Serialize)]
pub struct Solution {
    pub route: Vec<Point>,
    pub distance: f64,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.route.len()
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// The "nothing found yet" solution: empty route, infinite length.
    pub fn new() -> Solution {
        Solution { route: Vec::new(), distance: f64::INFINITY }
    }

    pub fn ids(&self) -> Vec<u32> {
        self.route.iter().map(|p| p.id).collect()
    }

    /// Replaces `self` with `candidate` when the candidate is strictly shorter.
    pub fn offer(&mut self, candidate: Solution) -> bool {
        if OrderedFloat(candidate.distance) < OrderedFloat(self.distance) {
            *self = candidate;
            true
        } else {
            false
        }
    }
}

impl Default for Solution {
    fn default() -> Self {
        Solution::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_solution_is_empty_and_infinite() {
        let solution = Solution::new();
        assert!(solution.is_empty());
        assert!(solution.distance.is_infinite());
    }

    #[test]
    fn test_offer_keeps_strictly_shorter() {
        let mut best = Solution::new();
        let depot = Point::depot(0, 0.0, 0.0);
        assert!(best.offer(Solution { route: vec![depot], distance: 5.0 }));
        assert!(!best.offer(Solution { route: vec![], distance: 5.0 }));
        assert_eq!(best.len(), 1);
        assert!(best.offer(Solution { route: vec![], distance: 4.0 }));
        assert_eq!(best.distance, 4.0);
    }
}
