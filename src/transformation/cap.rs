use super::{Contour, TriangulationError, Triangulator};
use crate::shape::{Facet, Plane};

/// Triangulates `contour` and appends the resulting cap to both halves of a cut.
///
/// Cap vertices are the stitched border endpoints, so the caps share their vertices
/// exactly with the facets along the cut.
///
/// The cap appended to `below` faces along the plane normal, the one appended to `above`
/// faces the opposite way with a reversed winding, so that both halves stay closed and
/// consistently oriented. Every cap facet carries a clone of `metadata`.
///
/// Returns the number of cap facets appended to each half.
pub fn build_caps<M: Clone>(
    contour: &Contour,
    plane: &Plane,
    triangulator: Triangulator,
    above: &mut Vec<Facet<M>>,
    below: &mut Vec<Facet<M>>,
    metadata: M,
) -> Result<usize, TriangulationError> {
    let triangles = triangulator.triangulate(&contour.points)?;
    let normal = **plane.normal();

    for tri in &triangles {
        let [i0, mut i1, mut i2] = tri.map(|i| i as usize);
        let [p0, p1, p2] = [i0, i1, i2].map(|i| contour.points[i]);

        // Counter-clockwise in the plane frame means along the normal in 3D.
        if (p1 - p0).perp(&(p2 - p0)) < 0.0 {
            core::mem::swap(&mut i1, &mut i2);
        }

        let [a, b, c] = [i0, i1, i2].map(|i| contour.points3d[i]);
        below.push(Facet::with_normal([a, b, c], normal, metadata.clone()));
        above.push(Facet::with_normal([a, c, b], -normal, metadata.clone()));
    }

    log::debug!("built {} cap facets per half", triangles.len());
    Ok(triangles.len())
}
