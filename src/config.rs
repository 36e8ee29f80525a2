use crate::error::{ParameterError, Result};
use crate::morphology::ThinningMode;

/// Default number of cells along the longer side of the positive polygon.
pub const DEFAULT_RESOLUTION: usize = 500;

/// Largest accepted resolution. Keeps the grid allocation bounded.
pub const MAX_RESOLUTION: usize = 10_000;

/// Default cap on thinning passes. A grid of `DEFAULT_RESOLUTION` cells
/// converges in well under half this many.
pub const DEFAULT_MAX_THINNING_PASSES: usize = 1000;

/// Parameters controlling path generation.
#[derive(Debug, Clone, Copy)]
pub struct PathParams {
    /// Grid cells along the longer side of the positive polygon's bounding box.
    pub resolution: usize,
    /// Safety margin removed from the walkable area, in cells.
    pub erosion_margin: f64,
    /// Upper bound on full thinning passes.
    pub max_thinning_passes: usize,
    /// How structuring elements feed each other within one pass.
    pub thinning_mode: ThinningMode,
    /// Display radius stored on the resulting path, in polygon-space units.
    pub path_radius: f64,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            erosion_margin: 4.0,
            max_thinning_passes: DEFAULT_MAX_THINNING_PASSES,
            thinning_mode: ThinningMode::Chained,
            path_radius: 0.1,
        }
    }
}

impl PathParams {
    /// Checks every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(invalid("resolution", "must be at least 1"));
        }
        if self.resolution > MAX_RESOLUTION {
            return Err(invalid(
                "resolution",
                &format!("must not exceed {MAX_RESOLUTION}"),
            ));
        }
        if self.max_thinning_passes == 0 {
            return Err(invalid("max_thinning_passes", "must be at least 1"));
        }
        if !self.erosion_margin.is_finite() || self.erosion_margin < 0.0 {
            return Err(invalid(
                "erosion_margin",
                "must be finite and non-negative",
            ));
        }
        if !self.path_radius.is_finite() || self.path_radius < 0.0 {
            return Err(invalid("path_radius", "must be finite and non-negative"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &str) -> crate::error::FloorpathError {
    ParameterError::Invalid {
        name,
        reason: reason.to_owned(),
    }
    .into()
}
