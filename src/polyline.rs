//! Route line drawn between stops on the map.

use serde::Serialize;

use crate::traits::Located;

/// Ordered (lat, lng) vertices of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

/// South-west and north-east corners of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: (f64, f64),
    pub north_east: (f64, f64),
}

impl Polyline {
    /// Wraps (lat, lng) points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Straight segments through `stops` in order.
    pub fn through<'a, T, I>(stops: I) -> Self
    where
        T: Located + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::new(stops.into_iter().map(Located::location).collect())
    }

    /// Vertices in route order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Bounding box of the points, or `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        let (&first, rest) = self.points.split_first()?;
        let mut bounds = Bounds {
            south_west: first,
            north_east: first,
        };
        for &(lat, lng) in rest {
            bounds.south_west.0 = bounds.south_west.0.min(lat);
            bounds.south_west.1 = bounds.south_west.1.min(lng);
            bounds.north_east.0 = bounds.north_east.0.max(lat);
            bounds.north_east.1 = bounds.north_east.1.max(lng);
        }
        Some(bounds)
    }
}
