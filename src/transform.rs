use crate::config::MAX_RESOLUTION;
use crate::error::{GeometryError, ParameterError, Result};
use crate::math::{GridPoint, Point3, Polygon, Vector2, TOLERANCE};

/// Maps between continuous polygon space and discrete grid space.
///
/// Built once per generation call from the positive polygon. Grid `x`
/// follows polygon `x`, grid `y` follows polygon `z`. The conversion to grid
/// space rounds to the nearest cell and is therefore lossy; the conversion
/// back restores a single averaged height for every cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceTransform {
    scale: f64,
    translation: Vector2,
    average_height: f64,
    width: usize,
    height: usize,
}

impl SpaceTransform {
    /// Computes the transform that fits `polygon`'s bounding box into a grid
    /// whose longer side spans `resolution` cells.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed polygons,
    /// `GeometryError::Degenerate` if the bounding box has no extent along
    /// either axis, or `ParameterError::Invalid` if `resolution` is zero or
    /// above [`MAX_RESOLUTION`].
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn from_polygon(polygon: &Polygon, resolution: usize) -> Result<Self> {
        polygon.validate()?;
        if resolution == 0 || resolution > MAX_RESOLUTION {
            return Err(ParameterError::Invalid {
                name: "resolution",
                reason: format!("must be in 1..={MAX_RESOLUTION}, got {resolution}"),
            }
            .into());
        }

        let bounds = polygon.bounds();
        let (dx, dz) = (bounds.width(), bounds.depth());
        if dx < TOLERANCE || dz < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "bounding box of {dx} x {dz} has no area"
            ))
            .into());
        }

        let span = resolution as f64;
        let (x_cells, z_cells, scale) = if dx > dz {
            (resolution, (span * (dz / dx)).ceil() as usize, span / dx)
        } else {
            ((span * (dx / dz)).ceil() as usize, resolution, span / dz)
        };

        let (Some(width), Some(height)) = (x_cells.checked_add(1), z_cells.checked_add(1)) else {
            return Err(ParameterError::Invalid {
                name: "resolution",
                reason: format!("grid for resolution {resolution} does not fit in memory"),
            }
            .into());
        };
        if width.checked_mul(height).is_none() {
            return Err(ParameterError::Invalid {
                name: "resolution",
                reason: format!("{width} x {height} grid does not fit in memory"),
            }
            .into());
        }

        Ok(Self {
            scale,
            translation: Vector2::new(-bounds.min_x * scale, -bounds.min_z * scale),
            average_height: polygon.average_height(),
            width,
            height,
        })
    }

    /// Cells per polygon-space unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Offset added after scaling, in cells.
    #[must_use]
    pub fn translation(&self) -> Vector2 {
        self.translation
    }

    /// Height assigned to every point mapped back to polygon space.
    #[must_use]
    pub fn average_height(&self) -> f64 {
        self.average_height
    }

    /// Grid width in cells (polygon X axis).
    #[must_use]
    pub fn grid_width(&self) -> usize {
        self.width
    }

    /// Grid height in cells (polygon Z axis).
    #[must_use]
    pub fn grid_height(&self) -> usize {
        self.height
    }

    /// Side length of one cell in polygon-space units.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        1.0 / self.scale
    }

    /// Scales, translates and rounds `point` to its grid cell.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_grid_space(&self, point: &Point3) -> GridPoint {
        let x = point.x * self.scale + self.translation.x;
        let y = point.z * self.scale + self.translation.y;
        GridPoint::new(x.round() as i64, y.round() as i64)
    }

    /// Maps a grid cell back to polygon space at the averaged height.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_polygon_space(&self, cell: GridPoint) -> Point3 {
        Point3::new(
            (cell.x as f64 - self.translation.x) / self.scale,
            self.average_height,
            (cell.y as f64 - self.translation.y) / self.scale,
        )
    }
}
