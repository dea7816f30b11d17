//! Closed-tour route solver: nearest-neighbor construction, 2-opt refinement
//! and randomized multi-start from a fixed depot.

pub mod config;
pub mod distance_map;
pub mod error;
pub mod input_parsers;
pub mod logging;
pub mod point;
pub mod query;
pub mod random_tsp;
pub mod session;
pub mod solution;
pub mod solver;

pub use config::SolverOptions;
pub use distance_map::{DistanceMap, Euclidean, Metric};
pub use error::{Error, Result};
pub use point::{Point, PointSet, Points};
pub use session::{RouteSession, Verdict, Visit};
pub use solution::Solution;
pub use solver::RouteSolver;
