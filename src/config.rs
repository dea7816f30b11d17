use log::LevelFilter;
use serde::Deserialize;

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
pub const DEFAULT_ATTEMPTS: usize = 10;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SolverOptions {
    /// Cap on full 2-opt passes per tour.
    pub max_iterations: usize,
    /// Number of multi-start trials.
    pub attempts: usize,
    /// Fixed seed for the shuffle source; entropy when absent.
    pub seed: Option<u64>,
    /// Evaluate multi-start trials on the rayon pool.
    pub parallel: bool,
    /// Stop 2-opt early once this many milliseconds have elapsed.
    pub deadline_ms: Option<u64>,
    pub log_level: String,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            attempts: DEFAULT_ATTEMPTS,
            seed: None,
            parallel: true,
            deadline_ms: None,
            log_level: "info".to_string(),
        }
    }
}

impl SolverOptions {
    pub fn from_file(path: &Path) -> Result<SolverOptions> {
        let mut file = File::open(path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| Error::invalid_input(format!("unknown log level '{}'", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SolverOptions::default();
        assert_eq!(options.max_iterations, 1000);
        assert_eq!(options.attempts, 10);
        assert!(options.deadline().is_none());
        assert_eq!(options.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let options: SolverOptions =
            serde_json::from_str(r#"{"attempts": 3, "seed": 42, "deadline_ms": 250}"#).unwrap();
        assert_eq!(options.attempts, 3);
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(options.deadline(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_bad_log_level() {
        let options = SolverOptions { log_level: "loud".to_string(), ..Default::default() };
        assert!(options.level_filter().is_err());
    }

    #[test]
    fn test_from_file_loads_fields() {
        let path = std::env::temp_dir().join(format!("route_solver_options_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"max_iterations": 50, "attempts": 4, "seed": 9, "parallel": false, "deadline_ms": 20, "log_level": "debug"}"#,
        )
        .unwrap();

        let options = SolverOptions::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(options.max_iterations, 50);
        assert_eq!(options.attempts, 4);
        assert_eq!(options.seed, Some(9));
        assert!(!options.parallel);
        assert_eq!(options.deadline(), Some(Duration::from_millis(20)));
        assert_eq!(options.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_from_file_missing_or_malformed() {
        let missing = std::env::temp_dir().join("route_solver_options_does_not_exist.json");
        assert!(matches!(SolverOptions::from_file(&missing), Err(Error::Io(_))));

        let path = std::env::temp_dir().join(format!("route_solver_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{ attempts: ").unwrap();
        let result = SolverOptions::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
