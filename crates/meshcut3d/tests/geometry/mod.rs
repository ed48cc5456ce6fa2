use meshcut3d::math::{Point, Real, Vector};
use meshcut3d::shape::Facet;

mod cube_cut;
mod diamond_cut;
mod plane_frame;
mod triangulators;

/// An axis-aligned cube with outward-facing facets, each side split along a diagonal.
pub fn cube(min: Point<Real>, size: Real) -> Vec<Facet<u16>> {
    let corner = |i: usize| {
        min + Vector::new(
            (i & 1) as Real * size,
            ((i >> 1) & 1) as Real * size,
            ((i >> 2) & 1) as Real * size,
        )
    };
    // Counter-clockwise quads seen from outside.
    let quads = [
        [0, 2, 3, 1], // z = min
        [4, 5, 7, 6], // z = max
        [0, 1, 5, 4], // y = min
        [2, 6, 7, 3], // y = max
        [0, 4, 6, 2], // x = min
        [1, 3, 7, 5], // x = max
    ];

    quads
        .iter()
        .enumerate()
        .flat_map(|(side, q)| {
            let [a, b, c, d] = q.map(corner);
            [
                Facet::from_vertices(a, b, c, side as u16),
                Facet::from_vertices(a, c, d, side as u16),
            ]
        })
        .collect()
}

pub fn unit_cube() -> Vec<Facet<u16>> {
    cube(Point::origin(), 1.0)
}

pub fn total_area<M>(facets: &[Facet<M>]) -> Real {
    facets.iter().map(|f| f.area()).sum()
}
