//! Infinite cutting plane with a cached in-plane coordinate frame.
use crate::math::{Point, Point2, Real, UnitVector, Vector};
use crate::utils::point_bits;
use na::Unit;

/// Indicates a plane could not be built from the given coefficients.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum PlaneError {
    /// The plane normal is zero, or too small to be normalized.
    #[error("the plane normal must not be zero.")]
    ZeroNormal,
    /// One of the plane coefficients is NaN or infinite.
    #[error("the plane coefficients must be finite.")]
    NonFinite,
}

/// The position of a point relative to a [`Plane`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum PlaneSide {
    /// The point lies in the half-space the normal points to.
    Above,
    /// The point lies exactly on the plane.
    On,
    /// The point lies in the half-space opposite to the normal.
    Below,
}

/// An infinite plane `normal · p + d = 0`.
///
/// The plane caches an orthonormal basis `(a, b)` of its own directions, so that
/// `(a, b, normal)` is a right-handed frame. That frame never changes once the plane
/// is built and is the one used by every 2D/3D projection, which keeps all the points
/// of a cut contour in a single consistent coordinate system.
#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Plane {
    normal: UnitVector<Real>,
    d: Real,
    a: Vector<Real>,
    b: Vector<Real>,
}

impl Plane {
    /// Builds the plane `normal · p + d = 0`.
    ///
    /// If `normal` isn’t unit-length, both `normal` and `d` are divided by its norm.
    pub fn new(normal: Vector<Real>, d: Real) -> Result<Self, PlaneError> {
        if !d.is_finite() || normal.iter().any(|x| !x.is_finite()) {
            return Err(PlaneError::NonFinite);
        }

        let norm = normal.norm();
        if norm <= Real::EPSILON {
            return Err(PlaneError::ZeroNormal);
        }

        if relative_eq!(norm, 1.0) {
            Ok(Self::with_unit_normal(Unit::new_unchecked(normal), d))
        } else {
            Ok(Self::with_unit_normal(
                Unit::new_unchecked(normal / norm),
                d / norm,
            ))
        }
    }

    /// Builds the plane `normal · p + d = 0` from an already normalized vector.
    pub fn with_unit_normal(normal: UnitVector<Real>, d: Real) -> Self {
        let (a, b) = Self::basis(&normal);
        Plane { normal, d, a, b }
    }

    /// The plane with normal `normal` passing through `point`.
    pub fn from_point_and_normal(
        point: &Point<Real>,
        normal: Vector<Real>,
    ) -> Result<Self, PlaneError> {
        Self::new(normal, -normal.dot(&point.coords))
    }

    // Axis-aligned normals get axis-aligned frames, so that cuts by the planes the
    // callers use the most keep exact 2D coordinates.
    fn basis(normal: &UnitVector<Real>) -> (Vector<Real>, Vector<Real>) {
        let (x, y, z) = (normal.x, normal.y, normal.z);

        let a = if x == 0.0 && y == 0.0 {
            Vector::x()
        } else if y == 0.0 && z == 0.0 {
            Vector::y()
        } else if x == 0.0 && z == 0.0 {
            Vector::x()
        } else {
            Vector::new(y, -x, 0.0).normalize()
        };

        // `a` is orthogonal to the unit normal so this is already unit-length.
        let b = normal.cross(&a);
        (a, b)
    }

    /// The unit normal of this plane.
    #[inline]
    pub fn normal(&self) -> &UnitVector<Real> {
        &self.normal
    }

    /// The signed offset `d` of the plane equation.
    #[inline]
    pub fn offset(&self) -> Real {
        self.d
    }

    /// The in-plane basis `(a, b)` used by [`Plane::to_2d`] and [`Plane::to_3d`].
    #[inline]
    pub fn in_plane_basis(&self) -> (Vector<Real>, Vector<Real>) {
        (self.a, self.b)
    }

    /// The value `normal · pt + d`.
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&pt.coords) + self.d
    }

    /// Locates `pt` relatively to this plane.
    ///
    /// The comparison with zero is exact: only points lying precisely on the plane
    /// are classified as [`PlaneSide::On`].
    #[inline]
    pub fn classify(&self, pt: &Point<Real>) -> PlaneSide {
        let dist = self.signed_distance(pt);

        if dist > 0.0 {
            PlaneSide::Above
        } else if dist < 0.0 {
            PlaneSide::Below
        } else {
            PlaneSide::On
        }
    }

    /// The point where the line through `a` and `b` crosses this plane.
    ///
    /// This must only be called on segments with one endpoint strictly above and the
    /// other strictly below the plane. A segment parallel to the plane yields
    /// non-finite coordinates.
    ///
    /// The endpoints are evaluated in a canonical order so that `intersect(a, b)` and
    /// `intersect(b, a)` return bit-identical points.
    pub fn intersect(&self, a: &Point<Real>, b: &Point<Real>) -> Point<Real> {
        let (a, b) = if point_bits(a) <= point_bits(b) {
            (a, b)
        } else {
            (b, a)
        };

        let ab = b - a;
        let t = -self.signed_distance(a) / self.normal.dot(&ab);
        a + ab * t
    }

    /// Projects `pt` on this plane along its normal.
    pub fn project_point(&self, pt: &Point<Real>) -> Point<Real> {
        pt - *self.normal * self.signed_distance(pt)
    }

    /// Expresses `pt - origin` in the in-plane basis.
    #[inline]
    pub fn to_2d(&self, pt: &Point<Real>, origin: &Point<Real>) -> Point2<Real> {
        let ov = pt - origin;
        Point2::new(self.a.dot(&ov), self.b.dot(&ov))
    }

    /// Maps in-plane coordinates back to 3D; the inverse of [`Plane::to_2d`] for points
    /// lying on the plane.
    #[inline]
    pub fn to_3d(&self, pt: &Point2<Real>, origin: &Point<Real>) -> Point<Real> {
        origin + self.a * pt.x + self.b * pt.y
    }
}
