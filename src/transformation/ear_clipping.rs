//! Ear clipping of simple polygons with collinear vertex runs.

use super::triangulate::double_signed_area;
use super::TriangulationError;
use crate::math::{Point2, Real};

// Twice the signed area of the triangle `a`, `b`, `c`.
#[inline]
fn orient(a: &Point2<Real>, b: &Point2<Real>, c: &Point2<Real>) -> Real {
    (b - a).perp(&(c - a))
}

/// The polygon left to triangulate, as a ring of vertex indices.
struct Ring<'a> {
    points: &'a [Point2<Real>],
    prev: Vec<usize>,
    next: Vec<usize>,
    /// The shape quality of the ear at each vertex, `None` if it isn’t an ear.
    ears: Vec<Option<Real>>,
    /// Any vertex still in the ring.
    head: usize,
    len: usize,
    /// `1` if the polygon is counter-clockwise, `-1` otherwise.
    sign: Real,
}

impl<'a> Ring<'a> {
    fn new(points: &'a [Point2<Real>], sign: Real) -> Self {
        let n = points.len();
        let mut ring = Ring {
            points,
            prev: (0..n).map(|i| (i + n - 1) % n).collect(),
            next: (0..n).map(|i| (i + 1) % n).collect(),
            ears: vec![None; n],
            head: 0,
            len: n,
            sign,
        };
        ring.update_all_ears();
        ring
    }

    fn update_all_ears(&mut self) {
        let mut i = self.head;
        for _ in 0..self.len {
            self.ears[i] = self.ear_quality(i);
            i = self.next[i];
        }
    }

    // The ratio between the area of the ear at `i` and its squared perimeter, or `None`
    // if cutting the triangle `prev, i, next` doesn’t leave a simple polygon.
    fn ear_quality(&self, i: usize) -> Option<Real> {
        let (a, c) = (self.prev[i], self.next[i]);
        let [pa, pb, pc] = [a, i, c].map(|k| self.points[k]);
        let area = self.sign * orient(&pa, &pb, &pc);

        // Flat corners are never clipped, their neighbors will be.
        if area <= 0.0 || !area.is_finite() {
            return None;
        }

        // Any remaining vertex in the closed triangle, even on the new edge `a, c`,
        // makes this corner a non-ear.
        let mut k = self.next[c];
        while k != a {
            let p = self.points[k];
            if self.sign * orient(&pa, &pb, &p) >= 0.0
                && self.sign * orient(&pb, &pc, &p) >= 0.0
                && self.sign * orient(&pc, &pa, &p) >= 0.0
            {
                return None;
            }
            k = self.next[k];
        }

        let perimeter2 =
            (pb - pa).norm_squared() + (pc - pb).norm_squared() + (pa - pc).norm_squared();
        Some(area / perimeter2)
    }

    // The best-shaped ear, the lowest index on ties.
    fn best_ear(&self) -> Option<usize> {
        self.ears
            .iter()
            .enumerate()
            .filter_map(|(i, quality)| quality.map(|q| (i, q)))
            .fold(None, |best: Option<(usize, Real)>, (i, q)| match best {
                Some((_, best_q)) if best_q >= q => best,
                _ => Some((i, q)),
            })
            .map(|(i, _)| i)
    }

    fn clip(&mut self, i: usize) -> [u32; 3] {
        let (a, c) = (self.prev[i], self.next[i]);
        self.next[a] = c;
        self.prev[c] = a;
        self.ears[i] = None;
        self.head = c;
        self.len -= 1;

        self.ears[a] = self.ear_quality(a);
        self.ears[c] = self.ear_quality(c);

        [a as u32, i as u32, c as u32]
    }
}

/// Triangulates a simple polygon of any orientation by ear clipping.
///
/// The triangles have the same winding as the polygon. Exactly collinear vertices are
/// supported: they are never the tip of a clipped ear.
pub(crate) fn triangulate_ear_clipping(
    polygon: &[Point2<Real>],
) -> Result<Vec<[u32; 3]>, TriangulationError> {
    let n = polygon.len();
    if n < 3 {
        return Err(TriangulationError::TooFewPoints(n));
    }

    let area = double_signed_area(polygon);
    if area == 0.0 || !area.is_finite() {
        return Err(TriangulationError::ZeroArea);
    }

    let mut ring = Ring::new(polygon, area.signum());
    let mut triangles = Vec::with_capacity(n - 2);

    while ring.len > 3 {
        // Only the neighbors of a clipped tip are updated, a vertex it was hiding from
        // another corner may have been missed.
        let ear = match ring.best_ear() {
            Some(ear) => ear,
            None => {
                ring.update_all_ears();
                ring.best_ear().ok_or(TriangulationError::NoEar)?
            }
        };
        triangles.push(ring.clip(ear));
    }

    let last = ring.head;
    triangles.push([ring.prev[last], last, ring.next[last]].map(|i| i as u32));

    Ok(triangles)
}
