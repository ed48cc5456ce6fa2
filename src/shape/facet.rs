use crate::math::{Point, Real, Vector};
use crate::shape::{Plane, PlaneSide};

/// A triangle of a surface mesh, with its normal and some user-defined metadata.
///
/// The vertices are ordered following the right-hand rule around `normal`. The
/// metadata is never interpreted by this crate: facets derived from a parent facet
/// (by splitting or cleanup) carry a clone of the parent’s metadata.
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Facet<M = ()> {
    /// The three vertices of this facet.
    pub vertices: [Point<Real>; 3],
    /// The outward normal of this facet.
    pub normal: Vector<Real>,
    /// User-defined data attached to this facet.
    pub metadata: M,
}

impl<M> Facet<M> {
    /// Builds a facet with an explicit normal.
    ///
    /// The normal is stored as-is and may disagree with the vertex winding.
    #[inline]
    pub fn with_normal(vertices: [Point<Real>; 3], normal: Vector<Real>, metadata: M) -> Self {
        Facet {
            vertices,
            normal,
            metadata,
        }
    }

    /// Builds a facet with the normal implied by the counter-clockwise winding `a, b, c`.
    ///
    /// Degenerate triangles get a zero normal.
    pub fn from_vertices(a: Point<Real>, b: Point<Real>, c: Point<Real>, metadata: M) -> Self {
        let normal = (b - a)
            .cross(&(c - a))
            .try_normalize(Real::EPSILON)
            .unwrap_or_else(Vector::zeros);
        Facet {
            vertices: [a, b, c],
            normal,
            metadata,
        }
    }

    /// The unit normal implied by the vertex winding, if the facet isn’t degenerate.
    pub fn winding_normal(&self) -> Option<Vector<Real>> {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a)).try_normalize(Real::EPSILON)
    }

    /// The area of this facet.
    pub fn area(&self) -> Real {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a)).norm() * 0.5
    }

    /// Does this facet have two vertices with exactly the same coordinates?
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = &self.vertices;
        a == b || b == c || c == a
    }

    /// Classifies the three vertices of this facet against `plane`.
    #[inline]
    pub fn classify(&self, plane: &Plane) -> [PlaneSide; 3] {
        self.vertices.map(|v| plane.classify(&v))
    }

    /// The three edges of this facet, following its winding.
    #[inline]
    pub fn edges(&self) -> [(Point<Real>, Point<Real>); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    /// Reverses the winding and the normal of this facet.
    pub fn flip(&mut self) {
        self.vertices.swap(1, 2);
        self.normal = -self.normal;
    }
}
