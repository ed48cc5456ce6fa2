/*!
meshcut
========

**meshcut** bisects closed triangle meshes by an infinite plane and seals
both halves with a triangulated cap, written with the rust programming
language.

```
# #[cfg(feature = "f32")] {
use meshcut3d::math::{Point, Vector};
use meshcut3d::shape::{Facet, Plane};
use meshcut3d::transformation::{cut_facets, CutParameters};

// A single tetrahedron standing on the `z = 0` plane.
let p = [
    Point::new(0.0, 0.0, 0.0),
    Point::new(1.0, 0.0, 0.0),
    Point::new(0.0, 1.0, 0.0),
    Point::new(0.0, 0.0, 1.0),
];
let facets = vec![
    Facet::from_vertices(p[0], p[2], p[1], ()),
    Facet::from_vertices(p[0], p[1], p[3], ()),
    Facet::from_vertices(p[1], p[2], p[3], ()),
    Facet::from_vertices(p[2], p[0], p[3], ()),
];

let plane = Plane::new(Vector::z(), -0.5).unwrap();
let cut = cut_facets(&facets, &plane, &CutParameters::default()).unwrap();
assert!(!cut.upper.is_empty() && !cut.lower.is_empty());
# }
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)]
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod io;
pub mod query;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Point2, Point3, UnitVector3, Vector2, Vector3};

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;
}
