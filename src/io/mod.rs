//! Reading and writing facet soups.

pub use self::stl::{
    read_stl, read_stl_from, write_ascii_stl, write_ascii_stl_to, write_binary_stl,
    write_binary_stl_to, StlAttribute, StlError,
};

mod stl;
#[cfg(feature = "wavefront")]
pub mod wavefront;
