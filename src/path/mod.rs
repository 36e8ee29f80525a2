mod extract;
mod path_data;

pub use extract::{ExtractGraph, SkeletonGraph};
pub use path_data::{PathData, PathEdge};
