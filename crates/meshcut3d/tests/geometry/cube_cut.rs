use super::{cube, total_area, unit_cube};
use meshcut3d::math::{Point, Real, Vector};
use meshcut3d::query::split::{separate_facets, FacetSplit};
use meshcut3d::shape::{Facet, Plane};
use meshcut3d::transformation::{
    cut_facets, repair, stitch_contour, ContourError, CutError, CutParameters, EdgeTopology,
    RepairParameters, Triangulator,
};

fn triangulators() -> Vec<Triangulator> {
    #[allow(unused_mut)]
    let mut result = vec![Triangulator::EarClipping];
    #[cfg(feature = "spade")]
    result.push(Triangulator::ConstrainedDelaunay);
    result
}

fn z_range(facets: &[Facet<u16>]) -> (Real, Real) {
    facets
        .iter()
        .flat_map(|f| f.vertices.iter().map(|v| v.z))
        .fold((Real::MAX, Real::MIN), |(lo, hi), z| (lo.min(z), hi.max(z)))
}

#[test]
fn cube_cross_section_is_one_closed_loop() {
    let plane = Plane::new(Vector::z(), -0.5).unwrap();
    let separated = separate_facets(&unit_cube(), &plane);

    assert_eq!(separated.stats.count(FacetSplit::Above), 2);
    assert_eq!(separated.stats.count(FacetSplit::Below), 2);
    assert_eq!(separated.stats.num_cut(), 8);
    assert_eq!(separated.border.len(), 8);

    let contour = stitch_contour(&separated.border, &plane).unwrap();
    // 4 corners and the 4 points where the side diagonals cross the plane.
    assert_eq!(contour.points.len(), 8);
    assert_relative_eq!(contour.signed_area().abs(), 1.0);

    let points = contour.to_3d(&plane);
    assert!(points.contains(&Point::new(1.0, 1.0, 0.5)));
    assert!(points.contains(&Point::new(0.5, 0.0, 0.5)));
    assert_eq!(points, contour.points3d);
}

#[test]
fn separated_halves_conserve_area() {
    let cube = unit_cube();
    let plane = Plane::new(Vector::new(0.2, -0.3, 1.0), -0.55).unwrap();
    let separated = separate_facets(&cube, &plane);

    let (n_above, n_below) = separated.stats.expected_outputs();
    assert_eq!(separated.above.len(), n_above);
    assert_eq!(separated.below.len(), n_below);
    assert_eq!(separated.stats.total(), cube.len());

    let area = total_area(&separated.above) + total_area(&separated.below);
    assert_relative_eq!(area, total_area(&cube), epsilon = 1.0e-4);
}

#[test]
fn cube_halves_are_watertight() {
    let plane = Plane::new(Vector::z(), -0.5).unwrap();

    for triangulator in triangulators() {
        let params = CutParameters {
            triangulator,
            ..CutParameters::default()
        };
        let cut = cut_facets(&unit_cube(), &plane, &params).unwrap();

        assert_eq!(cut.stats.contour_points, 8);
        assert_eq!(cut.stats.unmatched_edges, 0);
        assert_eq!(cut.stats.cap_facets, 6);
        // 8 side facets split in 3, the 2 untouched top or bottom facets, and the cap.
        assert_eq!(cut.upper.len(), 12 + 2 + 6);
        assert_eq!(cut.lower.len(), 12 + 2 + 6);

        assert_eq!(z_range(&cut.upper), (0.5, 1.0));
        assert_eq!(z_range(&cut.lower), (0.0, 0.5));

        for half in [&cut.upper, &cut.lower] {
            let topology = EdgeTopology::new(half);
            assert!(topology.is_closed_manifold(), "{:?}", topology.stats());
            assert_relative_eq!(total_area(half), 4.0, epsilon = 1.0e-5);
        }

        let upper_cap = &cut.upper[cut.upper.len() - 6..];
        let lower_cap = &cut.lower[cut.lower.len() - 6..];
        for (up, low) in upper_cap.iter().zip(lower_cap) {
            assert_eq!(up.normal, -Vector::z());
            assert_eq!(low.normal, Vector::z());
            assert_eq!(up.metadata, 0);
            assert_relative_eq!(up.winding_normal().unwrap(), up.normal);
            assert_relative_eq!(low.winding_normal().unwrap(), low.normal);
        }
    }
}

#[test]
fn metadata_is_inherited() {
    let plane = Plane::new(Vector::z(), -0.5).unwrap();
    let cut = cut_facets(&unit_cube(), &plane, &CutParameters::default()).unwrap();

    // The side facets are tagged 2 to 5 by the cube builder.
    let sides = cut.upper[..14]
        .iter()
        .filter(|f| (2..6).contains(&f.metadata))
        .count();
    assert_eq!(sides, 12);
}

#[test]
fn disjoint_cubes_leave_edges_unmatched() {
    let mut facets = unit_cube();
    facets.extend(cube(Point::new(3.0, 0.0, 0.0), 1.0));
    let plane = Plane::new(Vector::z(), -0.5).unwrap();

    match cut_facets(&facets, &plane, &CutParameters::default()) {
        Err(CutError::Contour(ContourError::Incomplete { contour, unmatched })) => {
            assert_eq!(unmatched, 8);
            assert_eq!(contour.points.len(), 8);
        }
        other => panic!("unexpected result: {:?}", other.map(|cut| cut.stats)),
    }

    let params = CutParameters {
        allow_partial_contour: true,
        ..CutParameters::default()
    };
    let cut = cut_facets(&facets, &plane, &params).unwrap();
    assert_eq!(cut.stats.unmatched_edges, 8);
    assert_eq!(cut.stats.cap_facets, 6);
    assert!(!EdgeTopology::new(&cut.upper).is_closed_manifold());
}

#[test]
fn tilted_cut_through_corners() {
    // This plane contains the edge x = 1, z = 0 and the edge x = 0, z = 1.
    let plane = Plane::new(Vector::new(1.0, 0.0, 1.0), -1.0).unwrap();
    let cube = unit_cube();
    let cut = cut_facets(&cube, &plane, &CutParameters::default()).unwrap();

    assert!(cut.stats.cap_facets >= 2);
    assert!(cut
        .upper
        .iter()
        .flat_map(|f| f.vertices.iter())
        .all(|v| plane.signed_distance(v) >= -1.0e-5));
    assert!(cut
        .lower
        .iter()
        .flat_map(|f| f.vertices.iter())
        .all(|v| plane.signed_distance(v) <= 1.0e-5));

    // The cap adds the same area to both halves.
    let area = total_area(&cut.upper) + total_area(&cut.lower);
    let cap_area = Real::sqrt(2.0);
    assert_relative_eq!(area, 6.0 + 2.0 * cap_area, epsilon = 1.0e-4);
}

#[test]
fn oblique_cuts_are_watertight_without_repair() {
    let cases = [
        (unit_cube(), Vector::new(0.3, 0.1, 1.0), -0.61),
        (unit_cube(), Vector::new(1.0, 1.0, 1.0), -1.3),
        (unit_cube(), Vector::new(0.2, -0.3, 1.0), -0.55),
        // Far from the origin, where rounding errors exceed any fixed weld tolerance.
        (
            cube(Point::new(1000.0, 2000.0, -500.0), 250.0),
            Vector::new(0.2, -0.3, 1.0),
            787.5,
        ),
    ];

    for (facets, normal, bias) in cases {
        let plane = Plane::new(normal, bias).unwrap();

        for triangulator in triangulators() {
            let params = CutParameters {
                triangulator,
                ..CutParameters::default()
            };
            let cut = cut_facets(&facets, &plane, &params).unwrap();

            // The cross-section crosses each side face twice, along its edges and its
            // diagonal, leaving collinear points on the contour.
            assert!(cut.stats.contour_points > 4, "{:?}", cut.stats);
            assert_eq!(
                cut.stats.cap_facets,
                cut.stats.contour_points - 2,
                "{:?} {:?}",
                triangulator,
                cut.stats
            );

            for half in [&cut.upper, &cut.lower] {
                let topology = EdgeTopology::new(half);
                assert!(
                    topology.is_closed_manifold(),
                    "{:?} {:?}",
                    triangulator,
                    topology.stats()
                );
            }

            let cap = &cut.lower[cut.lower.len() - cut.stats.cap_facets..];
            assert!(cap
                .iter()
                .flat_map(|f| f.vertices.iter())
                .all(|v| cut.upper.iter().any(|g| g.vertices.contains(v))));
        }
    }
}

#[test]
fn oblique_cut_stays_closed_after_repair() {
    let plane = Plane::new(Vector::new(0.3, 0.1, 1.0), -0.61).unwrap();
    let mut cut = cut_facets(&unit_cube(), &plane, &CutParameters::default()).unwrap();
    assert_eq!(cut.stats.cap_facets, cut.stats.contour_points - 2);

    for half in [&mut cut.upper, &mut cut.lower] {
        let report = repair(half, &RepairParameters::default());
        assert_eq!(report.welded_vertices, 0);
        assert_eq!(report.after.boundary_edges, 0);
        assert_eq!(report.after.non_manifold_edges, 0);
        assert!(EdgeTopology::new(half).is_closed_manifold());
    }
}
