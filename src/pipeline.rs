use tracing::{debug, info, info_span};

use crate::config::PathParams;
use crate::error::Result;
use crate::math::Polygon;
use crate::morphology::{DiskErosion, Erosion, Thinning};
use crate::path::{ExtractGraph, PathData};
use crate::raster::Rasterize;
use crate::transform::SpaceTransform;

/// A generated path together with thinning diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub path: PathData,
    /// Full thinning passes executed.
    pub passes: usize,
    /// False if thinning stopped at `max_thinning_passes` before reaching a
    /// fixed point. The path is then built from a partially thinned grid.
    pub converged: bool,
}

/// Generates the walkable path skeleton of a room.
///
/// The positive polygon is the room outline, negative polygons are obstacles
/// carved out in order. Stages: space transform, rasterization, erosion,
/// thinning, graph extraction.
///
/// # Example
///
/// ```
/// use floorpath::{GeneratePath, PathParams, Polygon};
///
/// let room = Polygon::from_xz(0.0, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])?;
/// let params = PathParams { resolution: 40, erosion_margin: 2.0, ..PathParams::default() };
/// let path = GeneratePath::new(&room, &[]).with_params(params).execute()?;
/// assert!(!path.is_empty());
/// # Ok::<(), floorpath::FloorpathError>(())
/// ```
#[derive(Debug)]
pub struct GeneratePath<'a> {
    positive: &'a Polygon,
    negatives: &'a [Polygon],
    params: PathParams,
}

impl<'a> GeneratePath<'a> {
    /// Creates a new generation with default parameters.
    #[must_use]
    pub fn new(positive: &'a Polygon, negatives: &'a [Polygon]) -> Self {
        Self {
            positive,
            negatives,
            params: PathParams::default(),
        }
    }

    /// Sets the generation parameters.
    #[must_use]
    pub fn with_params(mut self, params: PathParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the generation, eroding with a disc of
    /// `params.erosion_margin` cells.
    ///
    /// # Errors
    ///
    /// See [`GeneratePath::execute_with`].
    pub fn execute(&self) -> Result<PathData> {
        self.execute_with(&DiskErosion::new(self.params.erosion_margin))
    }

    /// Executes the generation with a caller-supplied erosion.
    ///
    /// # Errors
    ///
    /// See [`GeneratePath::execute_outcome_with`].
    pub fn execute_with(&self, erosion: &dyn Erosion) -> Result<PathData> {
        self.execute_outcome_with(erosion).map(|outcome| outcome.path)
    }

    /// Like [`GeneratePath::execute`], also reporting whether thinning
    /// converged.
    ///
    /// # Errors
    ///
    /// See [`GeneratePath::execute_outcome_with`].
    pub fn execute_outcome(&self) -> Result<GenerationOutcome> {
        self.execute_outcome_with(&DiskErosion::new(self.params.erosion_margin))
    }

    /// Runs every stage with a caller-supplied erosion.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError::Invalid` for unusable parameters, or a
    /// `GeometryError` if any polygon is malformed or the positive polygon
    /// has no area in the floor plane. Nothing is allocated before
    /// validation succeeds.
    pub fn execute_outcome_with(&self, erosion: &dyn Erosion) -> Result<GenerationOutcome> {
        let params = &self.params;
        params.validate()?;
        for negative in self.negatives {
            negative.validate()?;
        }
        let transform = SpaceTransform::from_polygon(self.positive, params.resolution)?;

        let span = info_span!(
            "generate_path",
            width = transform.grid_width(),
            height = transform.grid_height(),
        );
        let _guard = span.enter();
        debug!(
            scale = transform.scale(),
            negatives = self.negatives.len(),
            "space transform ready"
        );

        let grid = Rasterize::new(self.positive, self.negatives, transform).execute();

        let eroded = erosion.erode(&grid);
        debug!(
            before = grid.count_walkable(),
            after = eroded.count_walkable(),
            "walkable area eroded"
        );

        let thinned = Thinning::new()
            .with_mode(params.thinning_mode)
            .with_max_passes(params.max_thinning_passes)
            .execute(&eroded);

        let graph = ExtractGraph::new(&thinned.grid).execute();
        let path = graph.to_path_data(&transform, params.path_radius)?;

        info!(
            points = path.points().len(),
            edges = path.edges().len(),
            passes = thinned.passes,
            converged = thinned.converged,
            "path generated"
        );
        Ok(GenerationOutcome {
            path,
            passes: thinned.passes,
            converged: thinned.converged,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{FloorpathError, GeometryError, ParameterError};
    use crate::math::Point3;
    use crate::morphology::NoErosion;
    use crate::raster::WalkableGrid;

    fn rect(x0: f64, z0: f64, x1: f64, z1: f64) -> Polygon {
        Polygon::from_xz(1.2, &[(x0, z0), (x1, z0), (x1, z1), (x0, z1)]).unwrap()
    }

    fn params(resolution: usize, erosion_margin: f64) -> PathParams {
        PathParams {
            resolution,
            erosion_margin,
            ..PathParams::default()
        }
    }

    fn components(path: &PathData) -> usize {
        fn find(parent: &mut [usize], i: usize) -> usize {
            let mut root = i;
            while parent[root] != root {
                root = parent[root];
            }
            parent[i] = root;
            root
        }

        let mut parent: Vec<usize> = (0..path.points().len()).collect();
        for e in path.edges() {
            let (a, b) = (find(&mut parent, e.start), find(&mut parent, e.end));
            parent[a] = b;
        }
        (0..parent.len())
            .filter(|&i| find(&mut parent, i) == i)
            .count()
    }

    #[test]
    fn square_room_centres_the_skeleton() {
        let room = rect(0.0, 0.0, 10.0, 10.0);
        let path = GeneratePath::new(&room, &[])
            .with_params(PathParams {
                path_radius: 0.5,
                ..params(40, 2.0)
            })
            .execute()
            .unwrap();

        assert!(!path.is_empty());
        assert_eq!(components(&path), 1);
        for p in path.points() {
            assert!((p.y - 1.2).abs() < 1e-12);
            // Two cells of margin at four cells per unit.
            assert!(p.x >= 0.5 - 1e-9 && p.x <= 9.5 + 1e-9, "{p:?}");
            assert!(p.z >= 0.5 - 1e-9 && p.z <= 9.5 + 1e-9, "{p:?}");
        }
        let centre = Point3::new(5.0, 1.2, 5.0);
        assert!(path
            .points()
            .iter()
            .any(|p| (p - centre).norm() < 0.5));
        assert!(path.point_lies_on_path(&centre));
        assert!(!path.point_lies_on_path(&Point3::new(0.05, 1.2, 5.0)));
    }

    #[test]
    fn edges_join_adjacent_cells() {
        let room = Polygon::from_xz(
            0.0,
            &[(0.0, 0.0), (12.0, 0.0), (12.0, 4.0), (5.0, 4.0), (5.0, 9.0), (0.0, 9.0)],
        )
        .unwrap();
        let path = GeneratePath::new(&room, &[])
            .with_params(params(36, 1.0))
            .execute()
            .unwrap();

        // Scale is 3 cells per unit, so neighbours are at most sqrt(2)/3 apart.
        let limit = 2.0_f64.sqrt() / 3.0 + 1e-9;
        assert!(!path.edges().is_empty());
        for (a, b) in path.segments() {
            let d = (a - b).norm();
            assert!(d > 0.0 && d <= limit, "edge length {d}");
        }
    }

    #[test]
    fn donut_room_loops_around_the_hole() {
        let room = rect(0.0, 0.0, 20.0, 10.0);
        let hole = rect(8.0, 3.0, 12.0, 7.0);
        let negatives = [hole];
        let path = GeneratePath::new(&room, &negatives)
            .with_params(params(80, 2.0))
            .execute()
            .unwrap();

        assert_eq!(components(&path), 1);
        let pts = path.points();
        assert!(!pts
            .iter()
            .any(|p| p.x > 8.0 && p.x < 12.0 && p.z > 3.0 && p.z < 7.0));
        assert!(pts.iter().any(|p| p.z < 3.0 && p.x > 8.0 && p.x < 12.0));
        assert!(pts.iter().any(|p| p.z > 7.0 && p.x > 8.0 && p.x < 12.0));
        assert!(pts.iter().any(|p| p.x < 8.0 && p.z > 3.0 && p.z < 7.0));
        assert!(pts.iter().any(|p| p.x > 12.0 && p.z > 3.0 && p.z < 7.0));

        // Redraw the skeleton and flood the background from the hole centre:
        // a closed loop keeps the flood from reaching the grid border.
        let transform = SpaceTransform::from_polygon(&room, 80).unwrap();
        let mut skeleton = WalkableGrid::new(transform.grid_width(), transform.grid_height());
        for p in pts {
            let c = transform.to_grid_space(p);
            skeleton.set(c.x, c.y, true);
        }
        let start = transform.to_grid_space(&Point3::new(10.0, 0.0, 5.0));
        let mut seen = vec![false; skeleton.len()];
        let mut stack = vec![start];
        while let Some(c) = stack.pop() {
            let Some(i) = skeleton.index_of(c.x, c.y) else {
                panic!("flood escaped the skeleton loop at {c:?}");
            };
            if seen[i] || skeleton.get(c.x, c.y) {
                continue;
            }
            seen[i] = true;
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                stack.push(crate::math::GridPoint::new(c.x + dx, c.y + dy));
            }
        }
    }

    #[test]
    fn degenerate_room_is_rejected() {
        let line = Polygon::from_xz(0.0, &[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]).unwrap();
        let result = GeneratePath::new(&line, &[]).execute();
        assert!(matches!(
            result,
            Err(FloorpathError::Geometry(GeometryError::Degenerate(_)))
        ));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let room = rect(0.0, 0.0, 4.0, 4.0);
        let result = GeneratePath::new(&room, &[])
            .with_params(params(0, 1.0))
            .execute();
        assert!(matches!(
            result,
            Err(FloorpathError::Parameter(ParameterError::Invalid {
                name: "resolution",
                ..
            }))
        ));
    }

    #[test]
    fn fully_eroded_room_gives_empty_path() {
        let room = rect(0.0, 0.0, 2.0, 1.0);
        let path = GeneratePath::new(&room, &[])
            .with_params(params(10, 8.0))
            .execute()
            .unwrap();
        assert!(path.is_empty());
        assert!(path.edges().is_empty());
    }

    #[test]
    fn custom_erosion_is_used() {
        let room = rect(0.0, 0.0, 6.0, 6.0);
        let plain = GeneratePath::new(&room, &[]).with_params(params(24, 0.0));
        let with_none = plain.execute_with(&NoErosion).unwrap();
        let default = plain.execute().unwrap();
        assert_eq!(with_none, default);

        let clear = |g: &WalkableGrid| WalkableGrid::new(g.width(), g.height());
        assert!(plain.execute_with(&clear).unwrap().is_empty());
    }

    #[test]
    fn pass_limit_is_reported() {
        let room = rect(0.0, 0.0, 10.0, 10.0);
        let limited = GeneratePath::new(&room, &[])
            .with_params(PathParams {
                max_thinning_passes: 1,
                ..params(40, 0.0)
            })
            .execute_outcome()
            .unwrap();
        assert!(!limited.converged);
        assert_eq!(limited.passes, 1);
        assert!(!limited.path.is_empty());

        let generation = GeneratePath::new(&room, &[]).with_params(params(40, 0.0));
        let full = generation.execute_outcome().unwrap();
        assert!(full.converged);
        assert!(full.passes > 1);
        assert_eq!(full.path, generation.execute().unwrap());
    }

    #[test]
    fn far_away_obstacle_is_clipped() {
        let room = rect(0.0, 0.0, 10.0, 10.0);
        let sliver = Polygon::from_xz(0.0, &[(-1e300, 2.0), (1e300, 2.0), (1e300, 3.0)]).unwrap();
        let huge = rect(-1e9, -1e9, 1e9, 1e9);
        for obstacle in [sliver, huge] {
            let negatives = [obstacle];
            let result = GeneratePath::new(&room, &negatives)
                .with_params(params(40, 1.0))
                .execute();
            assert!(result.is_ok());
        }
    }

    #[test]
    fn oversized_resolution_is_rejected() {
        let room = rect(0.0, 0.0, 4.0, 4.0);
        let result = GeneratePath::new(&room, &[])
            .with_params(params(usize::MAX, 1.0))
            .execute();
        assert!(matches!(
            result,
            Err(FloorpathError::Parameter(ParameterError::Invalid {
                name: "resolution",
                ..
            }))
        ));
    }

    #[test]
    fn radius_is_carried_through() {
        let room = rect(0.0, 0.0, 6.0, 3.0);
        let path = GeneratePath::new(&room, &[])
            .with_params(PathParams {
                path_radius: 0.35,
                ..params(24, 1.0)
            })
            .execute()
            .unwrap();
        assert!((path.radius() - 0.35).abs() < f64::EPSILON);
    }
}
