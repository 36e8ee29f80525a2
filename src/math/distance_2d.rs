/// Returns the minimum distance from point `(px, pz)` to the line segment
/// from `(ax, az)` to `(bx, bz)` in the floor plane.
#[must_use]
pub fn point_to_segment_dist(px: f64, pz: f64, ax: f64, az: f64, bx: f64, bz: f64) -> f64 {
    let dx = bx - ax;
    let dz = bz - az;
    let len_sq = dx * dx + dz * dz;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return ((px - ax).powi(2) + (pz - az).powi(2)).sqrt();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((px - ax) * dx + (pz - az) * dz) / len_sq;
    let t = t.clamp(0.0, 1.0);

    let closest_x = ax + t * dx;
    let closest_z = az + t * dz;

    ((px - closest_x).powi(2) + (pz - closest_z).powi(2)).sqrt()
}

/// Euclidean distance between two points in the floor plane.
#[must_use]
pub fn point_to_point_dist(ax: f64, az: f64, bx: f64, bz: f64) -> f64 {
    ((bx - ax).powi(2) + (bz - az).powi(2)).sqrt()
}
