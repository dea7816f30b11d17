use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub is_depot: bool,
}

impl Point {
    pub fn new(id: u32, x: f64, y: f64) -> Point {
        Point { id, x, y, is_depot: false }
    }

    pub fn depot(id: u32, x: f64, y: f64) -> Point {
        Point { id, x, y, is_depot: true }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Points {
    pub points: Vec<Point>,
}

/// A validated, immutable point set with its single depot at index 0.
#[derive(Debug, Clone)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Validates `points` and moves the depot to the front, keeping the
    /// relative order of everything else.
    pub fn new(points: Vec<Point>) -> Result<PointSet> {
        let depots = points.iter().filter(|p| p.is_depot).count();
        match depots {
            0 => return Err(Error::NoDepot),
            1 => {}
            count => return Err(Error::MultipleDepots { count }),
        }

        let mut seen = HashSet::with_capacity(points.len());
        for point in &points {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(Error::NonFiniteCoordinate(point.id));
            }
            if !seen.insert(point.id) {
                return Err(Error::DuplicateId(point.id));
            }
        }

        let mut points = points;
        if let Some(depot_index) = points.iter().position(|p| p.is_depot) {
            if depot_index != 0 {
                let depot = points.remove(depot_index);
                points.insert(0, depot);
            }
        }

        Ok(PointSet { points })
    }

    pub fn depot(&self) -> &Point {
        &self.points[0]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn get(&self, index: usize) -> &Point {
        &self.points[index]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl TryFrom<Points> for PointSet {
    type Error = Error;

    fn try_from(value: Points) -> Result<PointSet> {
        PointSet::new(value.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_set_rejects_missing_depot() {
        let points = vec![Point::new(0, 0.0, 0.0), Point::new(1, 1.0, 1.0)];
        assert!(matches!(PointSet::new(points), Err(Error::NoDepot)));
        assert!(matches!(PointSet::new(vec![]), Err(Error::NoDepot)));
    }

    #[test]
    fn test_point_set_rejects_multiple_depots() {
        let points = vec![
            Point::depot(0, 0.0, 0.0),
            Point::new(1, 1.0, 1.0),
            Point::depot(2, 2.0, 2.0),
        ];
        let err = PointSet::new(points).unwrap_err();
        assert!(matches!(err, Error::MultipleDepots { count: 2 }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_point_set_rejects_duplicate_ids_and_nan() {
        let dup = vec![Point::depot(0, 0.0, 0.0), Point::new(0, 1.0, 1.0)];
        assert!(matches!(PointSet::new(dup), Err(Error::DuplicateId(0))));

        let nan = vec![Point::depot(0, 0.0, 0.0), Point::new(1, f64::NAN, 1.0)];
        assert!(matches!(
            PointSet::new(nan),
            Err(Error::NonFiniteCoordinate(1))
        ));
    }

    #[test]
    fn test_point_set_moves_depot_to_front() {
        let points = vec![
            Point::new(1, 1.0, 0.0),
            Point::new(2, 2.0, 0.0),
            Point::depot(7, 0.0, 0.0),
            Point::new(3, 3.0, 0.0),
        ];
        let set = PointSet::new(points).unwrap();
        let ids: Vec<u32> = set.points().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 1, 2, 3]);
        assert!(set.depot().is_depot);
    }

    #[test]
    fn test_points_document_defaults_depot_flag() {
        let json = r#"{"points":[{"id":0,"x":1.0,"y":2.0,"is_depot":true},{"id":1,"x":3.0,"y":4.0}]}"#;
        let doc: Points = serde_json::from_str(json).unwrap();
        assert!(!doc.points[1].is_depot);
        let set = PointSet::try_from(doc).unwrap();
        assert_eq!(set.len(), 2);
    }
}
