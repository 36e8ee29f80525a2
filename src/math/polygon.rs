use super::Point3;
use crate::error::{GeometryError, Result};

/// A closed floor polygon. Points carry their own height in `y`; the loop
/// lies in the XZ plane and the last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point3>,
}

/// Axis-aligned extent of a polygon in the floor plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

impl Bounds {
    /// Extent along X.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along Z.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }
}

impl Polygon {
    /// Creates a polygon, validating that it has at least 3 finite points.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewPoints` or `GeometryError::NonFinite`.
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        validate_points(&points)?;
        Ok(Self { points })
    }

    /// Builds a polygon at a constant height from `(x, z)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`Polygon::new`].
    pub fn from_xz(height: f64, xz: &[(f64, f64)]) -> Result<Self> {
        Self::new(
            xz.iter()
                .map(|&(x, z)| Point3::new(x, height, z))
                .collect(),
        )
    }

    /// The polygon's corner points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Re-checks the polygon invariants.
    ///
    /// # Errors
    ///
    /// Same as [`Polygon::new`].
    pub fn validate(&self) -> Result<()> {
        validate_points(&self.points)
    }

    /// Returns the closed loop of edges `(p0,p1), …, (pn-1,p0)`.
    #[must_use]
    pub fn edges(&self) -> Vec<(Point3, Point3)> {
        let n = self.points.len();
        (0..n)
            .map(|i| (self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    /// Bounding rectangle in the floor plane.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let first = self.points.first().copied().unwrap_or_else(Point3::origin);
        let mut bounds = Bounds {
            min_x: first.x,
            min_z: first.z,
            max_x: first.x,
            max_z: first.z,
        };
        for p in &self.points {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_z = bounds.min_z.min(p.z);
            bounds.max_z = bounds.max_z.max(p.z);
        }
        bounds
    }

    /// Mean height of the polygon's points.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_height(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points.iter().map(|p| p.y).sum::<f64>() / self.points.len() as f64
    }

    /// Enclosed floor area (shoelace formula in the XZ plane).
    #[must_use]
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            sum += self.points[i].x * self.points[j].z - self.points[j].x * self.points[i].z;
        }
        (sum * 0.5).abs()
    }
}

fn validate_points(points: &[Point3]) -> Result<()> {
    if points.len() < 3 {
        return Err(GeometryError::TooFewPoints {
            count: points.len(),
        }
        .into());
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
    {
        return Err(GeometryError::NonFinite { index }.into());
    }
    Ok(())
}
