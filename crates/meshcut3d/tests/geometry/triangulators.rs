use meshcut3d::math::{Point2, Real};
use meshcut3d::transformation::{TriangulationError, Triangulator};

fn triangulators() -> Vec<Triangulator> {
    #[allow(unused_mut)]
    let mut result = vec![Triangulator::EarClipping];
    #[cfg(feature = "spade")]
    result.push(Triangulator::ConstrainedDelaunay);
    result
}

fn covered_area(polygon: &[Point2<Real>], triangles: &[[u32; 3]]) -> Real {
    triangles
        .iter()
        .map(|tri| {
            let [a, b, c] = tri.map(|i| polygon[i as usize]);
            (b - a).perp(&(c - a)).abs() / 2.0
        })
        .sum()
}

#[test]
fn triangulators_agree_on_cap_area() {
    let hexagon: Vec<_> = (0..6)
        .map(|i| {
            let angle = i as Real * core::f64::consts::FRAC_PI_3 as Real;
            Point2::new(angle.cos() * 2.0, angle.sin() * 2.0)
        })
        .collect();
    let l_shape = vec![
        Point2::new(0.0, 0.0),
        Point2::new(3.0, 0.0),
        Point2::new(3.0, 1.0),
        Point2::new(1.0, 1.0),
        Point2::new(1.0, 3.0),
        Point2::new(0.0, 3.0),
    ];
    let hexagon_area = 6.0 * (3.0 as Real).sqrt();

    for (polygon, area) in [(hexagon, hexagon_area), (l_shape, 5.0)] {
        for triangulator in triangulators() {
            let triangles = triangulator.triangulate(&polygon).unwrap();
            assert_eq!(triangles.len(), polygon.len() - 2, "{:?}", triangulator);
            assert_relative_eq!(covered_area(&polygon, &triangles), area, epsilon = 1.0e-4);

            // No index out of range and no repeated corner.
            for tri in &triangles {
                assert!(tri.iter().all(|i| (*i as usize) < polygon.len()));
                assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[2] != tri[0]);
            }
        }
    }
}

#[test]
fn comb_polygon() {
    // A comb with 4 teeth pointing up, clockwise.
    let mut polygon = vec![Point2::new(0.0, 0.0)];
    for tooth in 0..4 {
        let x = tooth as Real * 2.0;
        polygon.push(Point2::new(x, 3.0));
        polygon.push(Point2::new(x + 1.0, 3.0));
        polygon.push(Point2::new(x + 1.0, 1.0));
        polygon.push(Point2::new(x + 2.0, 1.0));
    }
    polygon.push(Point2::new(8.0, 0.0));

    for triangulator in triangulators() {
        let triangles = triangulator.triangulate(&polygon).unwrap();
        assert_eq!(triangles.len(), polygon.len() - 2, "{:?}", triangulator);
        // An 8 × 1 body and 4 teeth of 1 × 2.
        assert_relative_eq!(
            covered_area(&polygon, &triangles),
            8.0 + 4.0 * 2.0,
            epsilon = 1.0e-4
        );
    }
}

#[test]
fn degenerate_polygons_are_rejected() {
    for triangulator in triangulators() {
        assert_eq!(
            triangulator.triangulate(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]),
            Err(TriangulationError::TooFewPoints(2))
        );
        assert_eq!(
            triangulator.triangulate(&[
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(Real::NAN, 1.0),
            ]),
            Err(TriangulationError::InvalidPoint(2))
        );
    }
}
