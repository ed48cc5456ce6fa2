use crate::math::{Point, Real};

/// The exact bit pattern of the coordinates of `pt`.
///
/// `-0.0` is folded onto `0.0` so that two points comparing equal with `==` always have
/// the same key. Used wherever vertices must be hashed or totally ordered.
#[inline]
pub fn point_bits(pt: &Point<Real>) -> [u64; 3] {
    #[allow(clippy::unnecessary_cast)]
    pt.coords.map(|x| if x == 0.0 { 0u64 } else { (x as f64).to_bits() }).into()
}
