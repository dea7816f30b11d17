//! Play session around a solved point set.
//!
//! A player visits points one at a time starting from the depot. Once every
//! point is visited the return leg to the depot is added and the route is
//! scored against the solver's reference tour.

use log::info;
use rand::Rng;

use crate::distance_map::{Euclidean, Metric};
use crate::error::{Error, Result};
use crate::point::{Point, PointSet};
use crate::solution::Solution;
use crate::solver::RouteSolver;

const OPTIMAL_TOLERANCE: f64 = 0.05;
const CLOSE_TOLERANCE: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Within 5% of the reference length.
    Optimal,
    /// Within 10%.
    Close,
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Accepted,
    AlreadyVisited,
    Finished,
}

#[derive(Debug, Default)]
pub struct RouteSession {
    points: Option<PointSet>,
    reference: Solution,
    route: Vec<Point>,
    distance: f64,
    finished: bool,
}

impl RouteSession {
    pub fn new() -> RouteSession {
        RouteSession::default()
    }

    /// Solves `points` with `attempts` restarts and puts the player on the depot.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        points: Vec<Point>,
        attempts: usize,
        rng: &mut R,
    ) -> Result<&Solution> {
        let mut solver = RouteSolver::new(points)?;
        let reference = solver.solve_multi_start(attempts, rng);
        let set = solver.points().clone();

        self.reset();
        self.route.push(*set.depot());
        if set.len() == 1 {
            self.route.push(*set.depot());
            self.finished = true;
        }
        self.reference = reference;
        self.points = Some(set);
        info!("session started, reference length {:.2}", self.reference.distance);
        Ok(&self.reference)
    }

    pub fn reset(&mut self) {
        *self = RouteSession::default();
    }

    pub fn is_started(&self) -> bool {
        self.points.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn reference(&self) -> &Solution {
        &self.reference
    }

    /// Player route so far; ends with the depot again once finished.
    pub fn route(&self) -> &[Point] {
        &self.route
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn visited_count(&self) -> usize {
        if self.finished {
            self.route.len() - 1
        } else {
            self.route.len()
        }
    }

    pub fn visit(&mut self, id: u32) -> Result<Visit> {
        let Some(points) = self.points.as_ref() else {
            return Err(Error::invalid_input("session not started"));
        };
        if self.finished {
            return Ok(Visit::Finished);
        }
        let point = *points
            .points()
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::invalid_input(format!("no point with id {id}")))?;
        if self.route.iter().any(|p| p.id == id) {
            return Ok(Visit::AlreadyVisited);
        }

        if let Some(previous) = self.route.last() {
            self.distance += Euclidean.distance(previous, &point);
        }
        self.route.push(point);

        if self.route.len() == points.len() {
            let depot = *points.depot();
            self.distance += Euclidean.distance(&point, &depot);
            self.route.push(depot);
            self.finished = true;
            return Ok(Visit::Finished);
        }
        Ok(Visit::Accepted)
    }

    /// How much longer than the reference the player route is, as a
    /// fraction. Beating the reference counts as a zero gap.
    pub fn gap(&self) -> Option<f64> {
        if !self.finished {
            return None;
        }
        if self.reference.distance <= 0.0 {
            return Some(0.0);
        }
        Some((self.distance - self.reference.distance).max(0.0) / self.reference.distance)
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.gap().map(|gap| {
            if gap <= OPTIMAL_TOLERANCE {
                Verdict::Optimal
            } else if gap <= CLOSE_TOLERANCE {
                Verdict::Close
            } else {
                Verdict::Far
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn square() -> Vec<Point> {
        vec![
            Point::depot(0, 0.0, 0.0),
            Point::new(1, 0.0, 10.0),
            Point::new(2, 10.0, 10.0),
            Point::new(3, 10.0, 0.0),
        ]
    }

    #[test]
    fn test_visit_before_start_fails() {
        let mut session = RouteSession::new();
        assert!(session.visit(1).is_err());
        assert!(session.verdict().is_none());
    }

    #[test]
    fn test_perimeter_route_is_optimal() {
        let mut session = RouteSession::new();
        session.start(square(), 3, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(session.visited_count(), 1);

        assert_eq!(session.visit(1).unwrap(), Visit::Accepted);
        assert_eq!(session.visit(1).unwrap(), Visit::AlreadyVisited);
        assert_eq!(session.visit(2).unwrap(), Visit::Accepted);
        assert_eq!(session.visit(3).unwrap(), Visit::Finished);

        assert!(session.is_finished());
        assert_eq!(session.distance(), 40.0);
        assert_eq!(session.route().len(), 5);
        assert_eq!(session.visited_count(), 4);
        assert_eq!(session.verdict(), Some(Verdict::Optimal));
    }

    #[test]
    fn test_crossed_route_is_far() {
        let mut session = RouteSession::new();
        session.start(square(), 3, &mut StdRng::seed_from_u64(1)).unwrap();
        session.visit(2).unwrap();
        session.visit(1).unwrap();
        session.visit(3).unwrap();
        assert_eq!(session.verdict(), Some(Verdict::Far));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut session = RouteSession::new();
        session.start(square(), 1, &mut StdRng::seed_from_u64(1)).unwrap();
        session.visit(1).unwrap();
        session.reset();
        assert!(!session.is_started());
        assert!(session.route().is_empty());
        assert_eq!(session.distance(), 0.0);
    }

    #[test]
    fn test_start_rejects_bad_point_set() {
        let mut session = RouteSession::new();
        let points = vec![Point::new(0, 0.0, 0.0)];
        assert!(session.start(points, 1, &mut StdRng::seed_from_u64(1)).is_err());
        assert!(!session.is_started());
    }

    #[test]
    fn test_beating_reference_is_optimal() {
        let mut session = RouteSession::new();
        session.start(square(), 1, &mut StdRng::seed_from_u64(1)).unwrap();
        session.visit(1).unwrap();
        session.visit(2).unwrap();
        session.visit(3).unwrap();
        session.reference.distance = 50.0;
        assert_eq!(session.gap(), Some(0.0));
        assert_eq!(session.verdict(), Some(Verdict::Optimal));
    }
}
