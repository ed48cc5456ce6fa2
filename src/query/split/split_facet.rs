use super::{BorderEdges, FacetSplit};
use crate::math::{Point, Real};
use crate::shape::{Facet, Plane, PlaneSide};

/// Splits `facet` by `plane`, pushing the resulting facets to `above` and `below`.
///
/// Facets crossed by the plane are replaced by two or three sub-facets, each inheriting
/// the normal and metadata of `facet` and preserving its winding. Every segment of the
/// facet lying on the plane is recorded into `border`. A facet lying entirely on the
/// plane is discarded.
///
/// Returns the row of the splitting table that was applied.
pub fn split_facet<M: Clone>(
    facet: &Facet<M>,
    plane: &Plane,
    above: &mut Vec<Facet<M>>,
    below: &mut Vec<Facet<M>>,
    border: &mut BorderEdges,
) -> FacetSplit {
    let sides = facet.classify(plane);
    let v = &facet.vertices;

    let count = |side: PlaneSide| sides.iter().filter(|s| **s == side).count();
    let (aboves, belows, ons) = (
        count(PlaneSide::Above),
        count(PlaneSide::Below),
        count(PlaneSide::On),
    );

    let sub_facet = |a: Point<Real>, b: Point<Real>, c: Point<Real>| {
        Facet::with_normal([a, b, c], facet.normal, facet.metadata.clone())
    };

    match (aboves, belows, ons) {
        (3, 0, 0) => {
            above.push(facet.clone());
            FacetSplit::Above
        }
        (0, 3, 0) => {
            below.push(facet.clone());
            FacetSplit::Below
        }
        (0, 0, 3) => FacetSplit::Coplanar,
        (_, _, 2) => {
            let i = position(&sides, |s| s != PlaneSide::On);
            let (e1, e2) = (v[(i + 1) % 3], v[(i + 2) % 3]);

            if sides[i] == PlaneSide::Above {
                above.push(facet.clone());
                let _ = border.insert(e1, e2);
                FacetSplit::EdgeAbove
            } else {
                below.push(facet.clone());
                let _ = border.insert(e2, e1);
                FacetSplit::EdgeBelow
            }
        }
        (2, 0, 1) => {
            above.push(facet.clone());
            FacetSplit::VertexAbove
        }
        (0, 2, 1) => {
            below.push(facet.clone());
            FacetSplit::VertexBelow
        }
        (1, 1, 1) => {
            let i = position(&sides, |s| s == PlaneSide::On);
            let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
            let (zero, one, two) = (v[i], v[i1], v[i2]);
            let middle = plane.intersect(&one, &two);

            let (one_side, two_side) = if sides[i1] == PlaneSide::Above {
                (&mut *above, &mut *below)
            } else {
                (&mut *below, &mut *above)
            };
            one_side.push(sub_facet(middle, zero, one));
            two_side.push(sub_facet(middle, two, zero));
            let _ = border.insert(zero, middle);

            FacetSplit::SimpleCut
        }
        (1, 2, 0) | (2, 1, 0) => {
            let lone_side = if aboves == 1 {
                PlaneSide::Above
            } else {
                PlaneSide::Below
            };
            let i = position(&sides, |s| s == lone_side);
            let (zero, one, two) = (v[i], v[(i + 1) % 3], v[(i + 2) % 3]);
            let one_middle = plane.intersect(&zero, &one);
            let two_middle = plane.intersect(&zero, &two);

            let (lone, pair) = if lone_side == PlaneSide::Above {
                (&mut *above, &mut *below)
            } else {
                (&mut *below, &mut *above)
            };
            lone.push(sub_facet(zero, one_middle, two_middle));
            pair.push(sub_facet(one_middle, one, two));
            pair.push(sub_facet(one_middle, two, two_middle));
            let _ = border.insert(one_middle, two_middle);

            if lone_side == PlaneSide::Above {
                FacetSplit::ComplexCutAbove
            } else {
                FacetSplit::ComplexCutBelow
            }
        }
        // The counts always add up to three, and every such triple is handled above.
        _ => unreachable!(),
    }
}

fn position(sides: &[PlaneSide; 3], pred: impl Fn(PlaneSide) -> bool) -> usize {
    sides.iter().position(|s| pred(*s)).unwrap_or(0)
}
