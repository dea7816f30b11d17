use log::{debug, info};
use rand::Rng;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::distance_map::{Euclidean, Metric};
use crate::error::Result;
use crate::point::{Point, Points};

const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Scatters points over a padded rectangle, keeping them apart where it can.
pub struct RandomTSPGenerator {
    width: f64,
    height: f64,
    padding: f64,
    min_spacing: f64,
}

impl RandomTSPGenerator {
    pub fn new(width: f64, height: f64) -> RandomTSPGenerator {
        RandomTSPGenerator { width, height, padding: 50.0, min_spacing: 60.0 }
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn min_spacing(mut self, min_spacing: f64) -> Self {
        self.min_spacing = min_spacing;
        self
    }

    /// Point 0 is the depot. Every other point is resampled while it sits
    /// closer than `min_spacing` to one already placed, giving up after a
    /// fixed number of tries and keeping the last sample.
    pub fn generate<R: Rng + ?Sized>(&self, count: u32, rng: &mut R) -> Points {
        let mut points = Points { points: Vec::with_capacity(count as usize) };

        for id in 0..count {
            let (point, spaced) = self.place(id, &points.points, rng);
            if !spaced {
                debug!("point {id} placed without spacing after {MAX_PLACEMENT_ATTEMPTS} attempts");
            }
            points.points.push(point);
        }

        points
    }

    /// Returns the sampled point and whether it keeps `min_spacing` to `placed`.
    fn place<R: Rng + ?Sized>(&self, id: u32, placed: &[Point], rng: &mut R) -> (Point, bool) {
        let mut point = self.sample(id, rng);
        for _ in 1..MAX_PLACEMENT_ATTEMPTS {
            if !self.is_too_close(placed, &point) {
                return (point, true);
            }
            point = self.sample(id, rng);
        }
        let spaced = !self.is_too_close(placed, &point);
        (point, spaced)
    }

    fn sample<R: Rng + ?Sized>(&self, id: u32, rng: &mut R) -> Point {
        let inner_width = (self.width - 2.0 * self.padding).max(f64::EPSILON);
        let inner_height = (self.height - 2.0 * self.padding).max(f64::EPSILON);
        Point {
            id,
            x: self.round(self.padding + rng.gen_range(0.0..inner_width)),
            y: self.round(self.padding + rng.gen_range(0.0..inner_height)),
            is_depot: id == 0,
        }
    }

    fn is_too_close(&self, placed: &[Point], point: &Point) -> bool {
        placed.iter().any(|other| Euclidean.distance(other, point) < self.min_spacing)
    }

    pub fn write_to_file(points: &Points, path: &Path) -> Result<()> {
        let json_string = serde_json::to_string_pretty(points)?;
        let mut file = File::create(path)?;
        file.write_all(json_string.as_bytes())?;
        info!("wrote {} points to {}", points.points.len(), path.display());
        Ok(())
    }

    pub fn round(&self, number: f64) -> f64 {
        (number * 100.0).round() / 100.0
    }
}
