use meshcut3d::math::{Point, Real, Vector};
use meshcut3d::shape::{Plane, PlaneSide};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_point(rng: &mut StdRng, extent: Real) -> Point<Real> {
    Point::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

fn random_plane(rng: &mut StdRng) -> Plane {
    loop {
        let normal = random_point(rng, 1.0).coords;
        if normal.norm() > 0.1 {
            return Plane::new(normal, rng.gen_range(-5.0..5.0)).unwrap();
        }
    }
}

#[test]
fn plane_frame_round_trip() {
    let mut rng = StdRng::seed_from_u64(0);

    for _ in 0..200 {
        let plane = random_plane(&mut rng);
        let origin = plane.project_point(&random_point(&mut rng, 10.0));
        let pt = random_point(&mut rng, 10.0);
        let on_plane = plane.project_point(&pt);

        assert_relative_eq!(plane.signed_distance(&on_plane), 0.0, epsilon = 1.0e-4);

        let back = plane.to_3d(&plane.to_2d(&on_plane, &origin), &origin);
        assert_relative_eq!(back, on_plane, epsilon = 1.0e-4);

        // Off-plane points come back as their projection.
        let back = plane.to_3d(&plane.to_2d(&pt, &origin), &origin);
        assert_relative_eq!(back, on_plane, epsilon = 1.0e-4);
    }
}

#[test]
fn random_segment_intersections() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tested = 0;

    while tested < 200 {
        let plane = random_plane(&mut rng);
        let (a, b) = (random_point(&mut rng, 10.0), random_point(&mut rng, 10.0));
        let (sa, sb) = (plane.classify(&a), plane.classify(&b));

        if sa == PlaneSide::On || sb == PlaneSide::On || sa == sb {
            continue;
        }
        // Nearly parallel segments lose too much precision to be meaningful.
        if (plane.signed_distance(&a) - plane.signed_distance(&b)).abs() < 0.1 {
            continue;
        }

        let ab = plane.intersect(&a, &b);
        assert_relative_eq!(plane.signed_distance(&ab), 0.0, epsilon = 1.0e-3);
        assert_eq!(ab, plane.intersect(&b, &a));

        // The intersection lies between the endpoints.
        let t = (ab - a).norm() / (b - a).norm();
        assert!((-1.0e-4..=1.0 + 1.0e-4).contains(&t));
        tested += 1;
    }
}

#[test]
fn explicit_plane_parameters() {
    let plane = Plane::from_point_and_normal(&Point::new(0.0, 0.0, 3.0), Vector::z() * 2.0)
        .unwrap();
    assert_eq!(plane.offset(), -3.0);
    assert_eq!(plane.classify(&Point::new(5.0, -2.0, 3.0)), PlaneSide::On);
    assert_eq!(plane.classify(&Point::new(0.0, 0.0, 4.0)), PlaneSide::Above);
    assert!(Plane::new(Vector::zeros(), 1.0).is_err());
}
