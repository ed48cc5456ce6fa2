//! Triangulation of simple polygons without Steiner points.

use super::ear_clipping::triangulate_ear_clipping;
use crate::math::{Point2, Real};
use crate::utils::hashmap::HashSet;
#[cfg(feature = "spade")]
use crate::utils::sanitize_spade_point;
#[cfg(feature = "spade")]
use spade::{ConstrainedDelaunayTriangulation, Triangulation as _};

/// Errors that can occur when triangulating a polygon.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TriangulationError {
    /// A polygon needs at least three vertices.
    #[error("a polygon needs at least 3 vertices, found {0}")]
    TooFewPoints(usize),
    /// Two vertices of the polygon are equal.
    #[error("the polygon vertex {0} is a duplicate")]
    DuplicatePoint(usize),
    /// The vertices of the polygon are all aligned.
    #[error("the polygon has a zero area")]
    ZeroArea,
    /// Two edges of the polygon cross each other.
    #[error("the polygon edge starting at vertex {0} crosses another edge")]
    SelfIntersection(usize),
    /// A vertex coordinate is NaN or infinite.
    #[error("the polygon vertex {0} isn’t finite")]
    InvalidPoint(usize),
    /// The ear clipping algorithm got stuck, which happens on non-simple polygons.
    #[error("no ear left to clip")]
    NoEar,
    /// The triangles don’t tile the polygon: a simple polygon with `n` vertices has
    /// exactly `n - 2` of them.
    #[error("expected {expected} triangles, found {found}")]
    TriangleCount {
        /// The number of polygon vertices minus two.
        expected: usize,
        /// The number of triangles produced.
        found: usize,
    },
}

/// The algorithm used to triangulate a cut contour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Triangulator {
    /// Constrained Delaunay triangulation of the polygon, keeping only the faces inside it.
    #[cfg(feature = "spade")]
    ConstrainedDelaunay,
    /// Ear clipping, best-shaped ears first. Slower on large polygons, but with no
    /// dependency.
    EarClipping,
}

impl Default for Triangulator {
    fn default() -> Self {
        #[cfg(feature = "spade")]
        return Triangulator::ConstrainedDelaunay;
        #[cfg(not(feature = "spade"))]
        return Triangulator::EarClipping;
    }
}

impl Triangulator {
    /// Triangulates the simple polygon `polygon`, of any orientation.
    ///
    /// The last vertex is implicitly connected to the first one. The output triangles
    /// index `polygon` and cover exactly its interior.
    pub fn triangulate(
        &self,
        polygon: &[Point2<Real>],
    ) -> Result<Vec<[u32; 3]>, TriangulationError> {
        check_polygon(polygon)?;

        let triangles = match self {
            #[cfg(feature = "spade")]
            Triangulator::ConstrainedDelaunay => triangulate_constrained_delaunay(polygon)?,
            Triangulator::EarClipping => triangulate_ear_clipping(polygon)?,
        };

        if triangles.len() + 2 != polygon.len() {
            log::warn!(
                "{:?} produced {} triangles for a polygon with {} vertices",
                self,
                triangles.len(),
                polygon.len()
            );
            return Err(TriangulationError::TriangleCount {
                expected: polygon.len() - 2,
                found: triangles.len(),
            });
        }

        Ok(triangles)
    }
}

/// Twice the signed area of `polygon`, positive if it is counter-clockwise.
pub(crate) fn double_signed_area(polygon: &[Point2<Real>]) -> Real {
    let n = polygon.len();
    (0..n)
        .map(|i| {
            let (a, b) = (polygon[i], polygon[(i + 1) % n]);
            a.x * b.y - a.y * b.x
        })
        .sum()
}

fn check_polygon(polygon: &[Point2<Real>]) -> Result<(), TriangulationError> {
    if polygon.len() < 3 {
        return Err(TriangulationError::TooFewPoints(polygon.len()));
    }

    // `0.0 == -0.0` but their bits differ.
    let fold_zero = |x: Real| if x == 0.0 { 0.0 } else { x };
    let mut seen = HashSet::default();

    for (i, pt) in polygon.iter().enumerate() {
        if !pt.x.is_finite() || !pt.y.is_finite() {
            return Err(TriangulationError::InvalidPoint(i));
        }

        let key = [fold_zero(pt.x).to_bits(), fold_zero(pt.y).to_bits()];
        if !seen.insert(key) {
            return Err(TriangulationError::DuplicatePoint(i));
        }
    }

    let extent = polygon
        .iter()
        .map(|pt| pt.coords.amax())
        .fold(0.0, Real::max);
    if double_signed_area(polygon).abs() <= Real::EPSILON * extent * extent {
        return Err(TriangulationError::ZeroArea);
    }

    Ok(())
}

#[cfg(feature = "spade")]
fn triangulate_constrained_delaunay(
    polygon: &[Point2<Real>],
) -> Result<Vec<[u32; 3]>, TriangulationError> {
    let mut cdt = ConstrainedDelaunayTriangulation::<spade::Point2<Real>>::new();
    let mut handles = Vec::with_capacity(polygon.len());

    for (i, pt) in polygon.iter().enumerate() {
        let handle = cdt
            .insert(sanitize_spade_point(pt))
            .map_err(|_| TriangulationError::InvalidPoint(i))?;
        handles.push(handle);
    }

    // Points that only differ below spade’s precision end up on the same vertex.
    if cdt.num_vertices() != polygon.len() {
        let mut seen = HashSet::default();
        let dup = handles.iter().position(|h| !seen.insert(*h)).unwrap_or(0);
        return Err(TriangulationError::DuplicatePoint(dup));
    }

    for ia in 0..polygon.len() {
        let ib = (ia + 1) % polygon.len();

        if !cdt.can_add_constraint(handles[ia], handles[ib]) {
            return Err(TriangulationError::SelfIntersection(ia));
        }

        let _ = cdt.add_constraint(handles[ia], handles[ib]);
    }

    // The faces reachable from the outer face without crossing the polygon boundary fill
    // its concavities, slivers along collinear vertices included.
    let mut outside = vec![false; cdt.num_all_faces()];
    let mut stack = vec![];
    for face in cdt.inner_faces() {
        let on_hull = face
            .adjacent_edges()
            .iter()
            .any(|edge| !edge.is_constraint_edge() && edge.rev().face().is_outer());
        if on_hull {
            outside[face.fix().index()] = true;
            stack.push(face);
        }
    }

    while let Some(face) = stack.pop() {
        for edge in face.adjacent_edges() {
            if edge.is_constraint_edge() {
                continue;
            }

            if let Some(neighbor) = edge.rev().face().as_inner() {
                let id = neighbor.fix().index();
                if !outside[id] {
                    outside[id] = true;
                    stack.push(neighbor);
                }
            }
        }
    }

    let mut handle_to_pt_id = vec![0; cdt.num_vertices()];
    for (i, handle) in handles.iter().enumerate() {
        handle_to_pt_id[handle.index()] = i as u32;
    }

    Ok(cdt
        .inner_faces()
        .filter(|face| !outside[face.fix().index()])
        .map(|face| face.vertices().map(|v| handle_to_pt_id[v.fix().index()]))
        .collect())
}
