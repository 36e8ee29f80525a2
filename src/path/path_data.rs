use crate::error::{OperationError, ParameterError, Result};
use crate::math::distance_2d::{point_to_point_dist, point_to_segment_dist};
use crate::math::Point3;

/// An undirected connection between two path points, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathEdge {
    pub start: usize,
    pub end: usize,
}

impl PathEdge {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A walkable path graph in polygon space.
///
/// Points carry the room's averaged floor height. Every edge index refers to
/// an existing point; the graph is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PathData {
    points: Vec<Point3>,
    edges: Vec<PathEdge>,
    radius: f64,
}

impl PathData {
    /// Builds a path graph.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if an edge references a missing
    /// point, or `ParameterError::Invalid` if `radius` is negative or not
    /// finite.
    pub fn new(points: Vec<Point3>, edges: Vec<PathEdge>, radius: f64) -> Result<Self> {
        check_radius(radius)?;
        if let Some(edge) = edges
            .iter()
            .find(|e| e.start >= points.len() || e.end >= points.len())
        {
            return Err(OperationError::InvalidInput(format!(
                "edge ({}, {}) out of range for {} points",
                edge.start,
                edge.end,
                points.len()
            ))
            .into());
        }
        Ok(Self {
            points,
            edges,
            radius,
        })
    }

    /// A path with no points.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError::Invalid` if `radius` is negative or not finite.
    pub fn empty(radius: f64) -> Result<Self> {
        Self::new(Vec::new(), Vec::new(), radius)
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn edges(&self) -> &[PathEdge] {
        &self.edges
    }

    /// Half-width of the path in polygon-space units.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over edges as point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        self.edges
            .iter()
            .map(|e| (self.points[e.start], self.points[e.end]))
    }

    /// Returns true if `point`, projected onto the floor plane, lies within
    /// [`radius`](Self::radius) of any point or segment of the path.
    #[must_use]
    pub fn point_lies_on_path(&self, point: &Point3) -> bool {
        let on_segment = self.segments().any(|(a, b)| {
            point_to_segment_dist(point.x, point.z, a.x, a.z, b.x, b.z) <= self.radius
        });
        on_segment
            || self
                .points
                .iter()
                .any(|p| point_to_point_dist(point.x, point.z, p.x, p.z) <= self.radius)
    }

    /// Number of edges touching each point, indexed like [`points`](Self::points).
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.points.len()];
        for edge in &self.edges {
            degrees[edge.start] += 1;
            if edge.end != edge.start {
                degrees[edge.end] += 1;
            }
        }
        degrees
    }

    /// Indices of points with exactly one edge.
    #[must_use]
    pub fn endpoints(&self) -> Vec<usize> {
        self.indices_where(|d| d == 1)
    }

    /// Indices of points with more than two edges.
    #[must_use]
    pub fn junctions(&self) -> Vec<usize> {
        self.indices_where(|d| d > 2)
    }

    fn indices_where(&self, keep: impl Fn(usize) -> bool) -> Vec<usize> {
        self.degrees()
            .into_iter()
            .enumerate()
            .filter(|&(_, d)| keep(d))
            .map(|(i, _)| i)
            .collect()
    }
}

fn check_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius >= 0.0 {
        return Ok(());
    }
    Err(ParameterError::Invalid {
        name: "radius",
        reason: format!("must be finite and non-negative, got {radius}"),
    }
    .into())
}
