//! Assembly of the border edges of a cut into a single polygon.

use super::triangulate::double_signed_area;
use crate::math::{Point, Point2, Real};
use crate::query::split::BorderEdges;
use crate::shape::Plane;
use ordered_float::OrderedFloat;
use rstar::primitives::GeomWithData;
use rstar::{RTree, AABB};

/// Number of border edges above which endpoint lookups go through an R-tree.
pub const SPATIAL_INDEX_THRESHOLD: usize = 64;

/// A closed polygon lying on a cutting plane, expressed in the plane’s 2D frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    /// The polygon vertices. The last vertex is implicitly connected to the first one.
    pub points: Vec<Point2<Real>>,
    /// The border endpoints `points` were projected from, in the same order.
    pub points3d: Vec<Point<Real>>,
    /// The 3D point the 2D coordinates are relative to.
    pub origin: Point<Real>,
    /// The per-axis distance below which two endpoints were considered equal.
    pub tolerance: Real,
}

impl Contour {
    /// The signed area of this polygon, positive if it is counter-clockwise.
    pub fn signed_area(&self) -> Real {
        double_signed_area(&self.points) * 0.5
    }

    /// The polygon vertices mapped back to 3D through the plane frame.
    ///
    /// Up to rounding errors, this is `points3d`.
    pub fn to_3d(&self, plane: &Plane) -> Vec<Point<Real>> {
        self.points
            .iter()
            .map(|pt| plane.to_3d(pt, &self.origin))
            .collect()
    }
}

/// Errors that can occur when stitching border edges into a contour.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ContourError {
    /// There were no border edges: the plane doesn’t cross the mesh.
    #[error("no border edge to stitch")]
    Empty,
    /// Every edge was chained but the chain doesn’t come back to its starting point.
    #[error("the border edges form an open chain of {} points", .contour.points.len())]
    Open {
        /// The chain that failed to close.
        contour: Contour,
    },
    /// Some border edges couldn’t be reached from the first one. This happens when the
    /// cross-section has several loops, or when the mesh isn’t closed.
    #[error("{unmatched} border edges could not be stitched to the contour")]
    Incomplete {
        /// The first chain assembled.
        contour: Contour,
        /// The number of edges left over.
        unmatched: usize,
    },
    /// The closed chain has fewer than three distinct points.
    #[error("the stitched contour has only {points} points")]
    Degenerate {
        /// The number of points of the closed chain.
        points: usize,
    },
}

// An edge index, and 0 for its start or 1 for its end.
type EndpointId = (usize, u8);
type Endpoint = GeomWithData<[Real; 2], EndpointId>;

/// Chains the border edges of a cut into one polygon, in the 2D frame of `plane`.
///
/// The origin of the 2D frame is the first endpoint of the first edge. Two endpoints are
/// considered equal if they differ by less than a quarter of the shortest edge on both
/// axes. Starting from the first edge, the chain repeatedly grows from its last point
/// using the first remaining edge (in insertion order) having a matching endpoint.
pub fn stitch_contour(border: &BorderEdges, plane: &Plane) -> Result<Contour, ContourError> {
    let edges = border.as_slice();
    let first = edges.first().ok_or(ContourError::Empty)?;
    let origin = first.a;

    let segments: Vec<[Point2<Real>; 2]> = edges
        .iter()
        .map(|e| [plane.to_2d(&e.a, &origin), plane.to_2d(&e.b, &origin)])
        .collect();

    let tolerance = segments
        .iter()
        .map(|[a, b]| OrderedFloat((b.x - a.x).abs() + (b.y - a.y).abs()))
        .min()
        .map(|len| len.0 / 4.0)
        .unwrap_or(0.0);

    let mut chain: Vec<EndpointId> = vec![(0, 0), (0, 1)];
    let unmatched = if segments.len() > SPATIAL_INDEX_THRESHOLD {
        chain_indexed(&segments, tolerance, &mut chain)
    } else {
        chain_linear(&segments, tolerance, &mut chain)
    };

    let point = |(e, side): EndpointId| segments[e][side as usize];
    let closed = matches(&point(chain[chain.len() - 1]), &point(chain[0]), tolerance);
    if closed {
        let _ = chain.pop();
    }

    log::debug!(
        "stitched {} of {} border edges into {} points (tolerance {}, closed: {})",
        segments.len() - unmatched,
        segments.len(),
        chain.len(),
        tolerance,
        closed
    );

    let contour = Contour {
        points: chain.iter().map(|&id| point(id)).collect(),
        points3d: chain
            .iter()
            .map(|&(e, side)| if side == 0 { edges[e].a } else { edges[e].b })
            .collect(),
        origin,
        tolerance,
    };

    if unmatched != 0 {
        Err(ContourError::Incomplete { contour, unmatched })
    } else if !closed {
        Err(ContourError::Open { contour })
    } else if contour.points.len() < 3 {
        Err(ContourError::Degenerate {
            points: contour.points.len(),
        })
    } else {
        Ok(contour)
    }
}

#[inline]
fn matches(a: &Point2<Real>, b: &Point2<Real>, tolerance: Real) -> bool {
    (a.x - b.x).abs() < tolerance && (a.y - b.y).abs() < tolerance
}

// Grows `chain` with the segments 1.., returns the number of segments left over.
fn chain_linear(
    segments: &[[Point2<Real>; 2]],
    tolerance: Real,
    chain: &mut Vec<EndpointId>,
) -> usize {
    let mut remaining: Vec<usize> = (1..segments.len()).collect();

    while let Some(&(e, side)) = chain.last() {
        let last = segments[e][side as usize];
        let found = remaining.iter().enumerate().find_map(|(k, &e)| {
            let [start, end] = segments[e];
            if matches(&start, &last, tolerance) {
                Some((k, (e, 1)))
            } else if matches(&end, &last, tolerance) {
                Some((k, (e, 0)))
            } else {
                None
            }
        });

        match found {
            Some((k, next)) => {
                let _ = remaining.remove(k);
                chain.push(next);
            }
            None => break,
        }
    }

    remaining.len()
}

// Same as `chain_linear`, with the endpoint lookups accelerated by an R-tree. Among the
// endpoints within tolerance, the one of the lowest edge, start before end, is picked so
// the result is identical.
fn chain_indexed(
    segments: &[[Point2<Real>; 2]],
    tolerance: Real,
    chain: &mut Vec<EndpointId>,
) -> usize {
    let endpoints: Vec<Endpoint> = segments
        .iter()
        .enumerate()
        .skip(1)
        .flat_map(|(e, [start, end])| {
            [
                Endpoint::new([start.x, start.y], (e, 0)),
                Endpoint::new([end.x, end.y], (e, 1)),
            ]
        })
        .collect();
    let mut tree = RTree::bulk_load(endpoints);
    let mut remaining = segments.len() - 1;

    while let Some(&(e, side)) = chain.last() {
        let last = segments[e][side as usize];
        let query = AABB::from_corners(
            [last.x - tolerance, last.y - tolerance],
            [last.x + tolerance, last.y + tolerance],
        );
        let found = tree
            .locate_in_envelope_intersecting(&query)
            .filter(|pt| matches(&Point2::from(*pt.geom()), &last, tolerance))
            .map(|pt| pt.data)
            .min();

        let Some((e, side)) = found else {
            break;
        };

        let [start, end] = segments[e];
        let _ = tree.remove(&Endpoint::new([start.x, start.y], (e, 0)));
        let _ = tree.remove(&Endpoint::new([end.x, end.y], (e, 1)));
        remaining -= 1;
        chain.push((e, 1 - side));
    }

    remaining
}
