use meshcut3d::math::{Point, Vector};
use meshcut3d::query::split::FacetSplit;
use meshcut3d::shape::{Facet, Plane};
use meshcut3d::transformation::{cut_facets, CutParameters, EdgeTopology};

fn build_diamond() -> Vec<Facet<u16>> {
    // Two tetrahedrons sharing a face
    let p = [
        Point::new(0.0, 2.0, 0.0),
        Point::new(-2.0, -1.0, 0.0),
        Point::new(0.0, 0.0, 2.0),
        Point::new(2.0, -1.0, 0.0),
        Point::new(0.0, 0.0, -2.0),
    ];

    [
        [0, 1, 2],
        [0, 2, 3],
        [1, 3, 2],
        [0, 4, 1],
        [0, 3, 4],
        [1, 4, 3],
    ]
    .iter()
    .map(|[a, b, c]| Facet::from_vertices(p[*a], p[*b], p[*c], 7))
    .collect()
}

#[test]
fn cut_through_the_shared_face() {
    let plane = Plane::new(Vector::z(), 0.0).unwrap();
    let cut = cut_facets(&build_diamond(), &plane, &CutParameters::default()).unwrap();

    assert_eq!(cut.stats.split.count(FacetSplit::EdgeAbove), 3);
    assert_eq!(cut.stats.split.count(FacetSplit::EdgeBelow), 3);
    // Both tetrahedrons see the same 3 edges.
    assert_eq!(cut.stats.border_edges, 3);
    assert_eq!(cut.stats.cap_facets, 1);
    assert_eq!(cut.upper.len(), 4);
    assert_eq!(cut.lower.len(), 4);

    assert!(EdgeTopology::new(&cut.upper).is_closed_manifold());
    assert!(EdgeTopology::new(&cut.lower).is_closed_manifold());
}

#[test]
fn cut_through_the_upper_tip() {
    let plane = Plane::new(Vector::z(), -0.5).unwrap();
    let cut = cut_facets(&build_diamond(), &plane, &CutParameters::default()).unwrap();

    assert_eq!(cut.stats.split.count(FacetSplit::ComplexCutAbove), 3);
    assert_eq!(cut.stats.split.count(FacetSplit::Below), 3);
    assert_eq!(cut.stats.contour_points, 3);
    assert_eq!(cut.upper.len(), 3 + 1);
    assert_eq!(cut.lower.len(), 3 + 2 * 3 + 1);

    let cap = cut.upper.last().unwrap();
    for pt in [
        Point::new(-1.5, -0.75, 0.5),
        Point::new(1.5, -0.75, 0.5),
        Point::new(0.0, 1.5, 0.5),
    ] {
        assert!(cap.vertices.contains(&pt), "{:?} not in {:?}", pt, cap);
    }

    for half in [&cut.upper, &cut.lower] {
        assert!(EdgeTopology::new(half).is_closed_manifold());
        assert!(half.iter().all(|f| f.metadata == 7 || f.metadata == 0));
    }
}

#[test]
fn cut_through_a_single_vertex() {
    // Only touches the bottom tip: nothing to cap.
    let plane = Plane::new(Vector::z(), 2.0).unwrap();
    let cut = cut_facets(&build_diamond(), &plane, &CutParameters::default()).unwrap();

    assert_eq!(cut.stats.split.count(FacetSplit::VertexAbove), 3);
    assert_eq!(cut.stats.border_edges, 0);
    assert_eq!(cut.upper.len(), 6);
    assert!(cut.lower.is_empty());
}
