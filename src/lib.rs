pub mod config;
pub mod error;
pub mod math;
pub mod morphology;
pub mod path;
pub mod pipeline;
pub mod raster;
pub mod transform;

pub use config::{PathParams, MAX_RESOLUTION};
pub use error::{FloorpathError, Result};
pub use math::{GridPoint, Point3, Polygon};
pub use morphology::{DiskErosion, Erosion, NoErosion, ThinningMode};
pub use path::{PathData, PathEdge};
pub use pipeline::{GeneratePath, GenerationOutcome};
pub use transform::SpaceTransform;
