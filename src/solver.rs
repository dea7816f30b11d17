use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use std::time::{Duration, Instant};

use crate::config::{SolverOptions, DEFAULT_MAX_ITERATIONS};
use crate::distance_map::{DistanceMap, Euclidean, Metric};
use crate::error::{Error, Result};
use crate::point::{Point, PointSet};
use crate::solution::Solution;

/// Heuristic closed-tour solver bound to one point set for its lifetime.
///
/// Tours are handled internally as index sequences into the bound
/// [`PointSet`] and turned into [`Point`] routes only when a [`Solution`]
/// is handed out. Index 0 is always the depot. Every index tour passed in
/// through the public API must be a depot-first permutation of `0..n`.
#[derive(Debug)]
pub struct RouteSolver<M: Metric = Euclidean> {
    points: PointSet,
    metric: M,
    map: DistanceMap,
    max_iterations: usize,
    deadline: Option<Duration>,
    best: Solution,
}

impl RouteSolver<Euclidean> {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        Self::with_metric(points, Euclidean)
    }
}

impl<M: Metric> RouteSolver<M> {
    /// Validates the point set and precomputes pairwise distances.
    pub fn with_metric(points: Vec<Point>, metric: M) -> Result<Self> {
        let points = PointSet::new(points)?;
        let map = DistanceMap::new(&points, &metric);

        Ok(RouteSolver {
            points,
            metric,
            map,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            deadline: None,
            best: Solution::new(),
        })
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Bounds the wall time spent in 2-opt per solve call.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_options(mut self, options: &SolverOptions) -> Self {
        self.max_iterations = options.max_iterations;
        self.deadline = options.deadline();
        self
    }

    pub fn iteration_limit(&self) -> usize {
        self.max_iterations
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// Best solution seen by this solver so far.
    pub fn best(&self) -> &Solution {
        &self.best
    }

    pub fn distance(&self, a: &Point, b: &Point) -> f64 {
        self.metric.distance(a, b)
    }

    /// Fails unless `order` is a permutation of the point indices starting at the depot.
    pub fn check_order(&self, order: &[usize]) -> Result<()> {
        let n = self.points.len();
        if order.len() != n {
            return Err(Error::invalid_input(format!(
                "tour has {} entries, point set has {n}",
                order.len()
            )));
        }
        if order.first() != Some(&0) {
            return Err(Error::invalid_input("tour must start at the depot (index 0)"));
        }
        let mut seen = vec![false; n];
        for &index in order {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(Error::invalid_input(format!("index {index} repeats in tour")))
                }
                None => {
                    return Err(Error::invalid_input(format!("index {index} is out of range")))
                }
            }
        }
        Ok(())
    }

    /// Closed-loop length of an index tour.
    pub fn tour_length(&self, tour: &[usize]) -> Result<f64> {
        self.check_order(tour)?;
        Ok(self.length_of(tour))
    }

    fn length_of(&self, tour: &[usize]) -> f64 {
        let mut length = 0.0;
        for (current, next) in tour.iter().zip(tour.iter().skip(1)) {
            length += self.map.get(*current, *next);
        }
        if let (Some(first), Some(last)) = (tour.first(), tour.last()) {
            length += self.map.get(*last, *first);
        }
        length
    }

    /// Closed-loop length of a route of points, measured with the solver's metric.
    pub fn route_length(&self, route: &[Point]) -> f64 {
        let mut length = 0.0;
        for (current, next) in route.iter().zip(route.iter().skip(1)) {
            length += self.distance(current, next);
        }
        if let (Some(first), Some(last)) = (route.first(), route.last()) {
            length += self.distance(last, first);
        }
        length
    }

    /// The input order, depot first.
    pub fn identity_order(&self) -> Vec<usize> {
        (0..self.points.len()).collect()
    }

    /// Greedy tour starting at the depot; ties go to whichever point comes
    /// first in `order`.
    pub fn nearest_neighbor(&self, order: &[usize]) -> Result<Vec<usize>> {
        self.check_order(order)?;
        Ok(self.greedy(order))
    }

    fn greedy(&self, order: &[usize]) -> Vec<usize> {
        let mut tour = Vec::with_capacity(order.len());
        let Some((&start, rest)) = order.split_first() else {
            return tour;
        };
        tour.push(start);

        let mut unvisited: Vec<usize> = rest.to_vec();
        let mut current = start;

        while !unvisited.is_empty() {
            let mut nearest = 0;
            let mut nearest_distance = OrderedFloat(f64::INFINITY);
            for (position, &candidate) in unvisited.iter().enumerate() {
                let distance = OrderedFloat(self.map.get(current, candidate));
                if distance < nearest_distance {
                    nearest_distance = distance;
                    nearest = position;
                }
            }
            current = unvisited.remove(nearest);
            tour.push(current);
        }

        tour
    }

    /// First-improvement 2-opt. Returns the improved tour and its length.
    pub fn two_opt(&self, tour: Vec<usize>, max_iterations: usize) -> Result<(Vec<usize>, f64)> {
        self.check_order(&tour)?;
        let stop_at = self.deadline.map(|d| Instant::now() + d);
        Ok(self.improve(tour, max_iterations, stop_at))
    }

    fn improve(
        &self,
        mut tour: Vec<usize>,
        max_iterations: usize,
        stop_at: Option<Instant>,
    ) -> (Vec<usize>, f64) {
        let n = tour.len();
        let mut length = self.length_of(&tour);
        if n < 4 {
            return (tour, length);
        }

        let mut passes = 0;
        let mut moves = 0;
        let mut improved = true;

        while improved && passes < max_iterations {
            if stop_at.is_some_and(|t| Instant::now() >= t) {
                debug!("2-opt deadline reached after {passes} passes");
                break;
            }
            improved = false;
            passes += 1;

            'scan: for i in 1..n - 1 {
                for j in i + 1..n {
                    let a = tour[i - 1];
                    let b = tour[i];
                    let c = tour[j];
                    let d = tour[(j + 1) % n];
                    let gain = self.map.get(a, b) + self.map.get(c, d)
                        - self.map.get(a, c)
                        - self.map.get(b, d);
                    if gain <= 0.0 {
                        continue;
                    }

                    tour[i..=j].reverse();
                    let candidate = self.length_of(&tour);
                    if candidate < length {
                        length = candidate;
                        moves += 1;
                        improved = true;
                        break 'scan;
                    }
                    /* Rounding ate the gain; undo and keep scanning. */
                    tour[i..=j].reverse();
                }
            }
        }

        debug!("2-opt finished: {passes} passes, {moves} moves, length {length:.3}");
        (tour, length)
    }

    fn to_solution(&self, tour: &[usize], distance: f64) -> Solution {
        Solution {
            route: tour.iter().map(|&i| *self.points.get(i)).collect(),
            distance,
        }
    }

    fn solve_order_until(&self, order: &[usize], stop_at: Option<Instant>) -> Solution {
        let initial = self.greedy(order);
        let (tour, distance) = self.improve(initial, self.max_iterations, stop_at);
        self.to_solution(&tour, distance)
    }

    /// Nearest neighbor followed by 2-opt on a depot-first ordering of the
    /// point indices. Does not touch the best-known solution.
    pub fn solve_order(&self, order: &[usize]) -> Result<Solution> {
        self.check_order(order)?;
        let stop_at = self.deadline.map(|d| Instant::now() + d);
        Ok(self.solve_order_until(order, stop_at))
    }

    /// Deterministic single attempt on the input order.
    pub fn solve_once(&mut self) -> Solution {
        let stop_at = self.deadline.map(|d| Instant::now() + d);
        let solution = self.solve_order_until(&self.identity_order(), stop_at);
        info!("single start: length {:.3} over {} points", solution.distance, solution.len());
        self.best.offer(solution.clone());
        solution
    }

    fn shuffled_orders<R>(&self, attempts: usize, rng: &mut R) -> Vec<Vec<usize>>
    where
        R: Rng + ?Sized,
    {
        let attempts = if attempts == 0 {
            warn!("multi-start called with 0 attempts, running 1");
            1
        } else {
            attempts
        };

        (0..attempts)
            .map(|_| {
                let mut order = self.identity_order();
                order[1..].shuffle(rng);
                order
            })
            .collect()
    }

    fn keep_best(&mut self, winner: Option<(usize, Solution)>) -> Solution {
        let (attempt, solution) = winner.unwrap_or_else(|| (0, Solution::new()));
        info!(
            "multi-start: best length {:.3} from attempt {}",
            solution.distance,
            attempt + 1
        );
        self.best.offer(solution.clone());
        solution
    }

    /// Restarts from `attempts` random orderings (depot fixed) and keeps the
    /// shortest tour; ties keep the earliest attempt.
    pub fn solve_multi_start<R>(&mut self, attempts: usize, rng: &mut R) -> Solution
    where
        R: Rng + ?Sized,
    {
        let orders = self.shuffled_orders(attempts, rng);
        let stop_at = self.deadline.map(|d| Instant::now() + d);

        let mut winner: Option<(usize, Solution)> = None;
        for (attempt, order) in orders.iter().enumerate() {
            let candidate = self.solve_order_until(order, stop_at);
            debug!("attempt {}: length {:.3}", attempt + 1, candidate.distance);
            let better = winner
                .as_ref()
                .map_or(true, |(_, best)| candidate.distance < best.distance);
            if better {
                winner = Some((attempt, candidate));
            }
        }

        self.keep_best(winner)
    }

    /// Same contract as [`RouteSolver::solve_multi_start`], with the trials
    /// evaluated on the rayon pool. Orderings are still drawn from `rng` up
    /// front, so a seeded source gives the same answer as the sequential path.
    pub fn solve_multi_start_parallel<R>(&mut self, attempts: usize, rng: &mut R) -> Solution
    where
        R: Rng + ?Sized,
    {
        let orders = self.shuffled_orders(attempts, rng);
        let stop_at = self.deadline.map(|d| Instant::now() + d);

        let winner = orders
            .par_iter()
            .enumerate()
            .map(|(attempt, order)| (attempt, self.solve_order_until(order, stop_at)))
            .min_by_key(|(attempt, solution)| (OrderedFloat(solution.distance), *attempt));

        self.keep_best(winner)
    }

    /// Runs a multi-start solve as configured by `options`.
    pub fn solve_with(&mut self, options: &SolverOptions) -> Solution {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        if options.parallel {
            self.solve_multi_start_parallel(options.attempts, &mut rng)
        } else {
            self.solve_multi_start(options.attempts, &mut rng)
        }
    }
}
