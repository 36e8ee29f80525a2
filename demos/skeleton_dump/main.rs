//! Prints the walkable-path skeleton of a sample room.
//!
//! Usage:
//! ```text
//! cargo run --example skeleton_dump                   # L-shaped room with a table
//! cargo run --example skeleton_dump -- 120            # custom resolution
//! RUST_LOG=floorpath=debug cargo run --example skeleton_dump
//! ```

use floorpath::{FloorpathError, GeneratePath, PathParams, Polygon};

fn main() -> Result<(), FloorpathError> {
    // Default: WARN for everything, INFO for floorpath.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("floorpath=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let resolution = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(80);

    let room = Polygon::from_xz(
        0.0,
        &[
            (0.0, 0.0),
            (8.0, 0.0),
            (8.0, 3.0),
            (4.0, 3.0),
            (4.0, 6.0),
            (0.0, 6.0),
        ],
    )?;
    let table = Polygon::from_xz(0.0, &[(1.2, 1.0), (2.8, 1.0), (2.8, 2.0), (1.2, 2.0)])?;
    let negatives = [table];

    let params = PathParams {
        resolution,
        erosion_margin: 3.0,
        path_radius: 0.15,
        ..PathParams::default()
    };
    let path = GeneratePath::new(&room, &negatives)
        .with_params(params)
        .execute()?;

    println!("room area: {:.2}", room.area());
    println!(
        "{} points, {} edges, radius {}",
        path.points().len(),
        path.edges().len(),
        path.radius()
    );
    println!("endpoints: {}", path.endpoints().len());
    println!("junctions: {}", path.junctions().len());
    for (a, b) in path.segments().take(20) {
        println!("({:.3}, {:.3}) -> ({:.3}, {:.3})", a.x, a.z, b.x, b.z);
    }
    if path.edges().len() > 20 {
        println!("... {} more", path.edges().len() - 20);
    }
    Ok(())
}
