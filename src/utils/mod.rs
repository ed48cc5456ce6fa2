//! Various unsorted geometrical and logical operators.

pub use self::point_bits::point_bits;
pub use self::sorted_pair::SortedPair;
#[cfg(feature = "spade")]
pub use self::spade::sanitize_spade_point;

pub mod hashmap;
mod point_bits;
mod sorted_pair;
#[cfg(feature = "spade")]
mod spade;
