//! Geometric primitives manipulated by the cutting pipeline.

pub use self::facet::Facet;
pub use self::plane::{Plane, PlaneError, PlaneSide};

mod facet;
mod plane;
