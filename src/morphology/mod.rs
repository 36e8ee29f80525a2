mod erosion;
mod structuring;
mod thinning;

pub use erosion::{DiskErosion, Erosion, NoErosion};
pub use structuring::{StructuringElement, L_ELEMENTS};
pub use thinning::{Thinning, ThinningMode, ThinningOutcome};
