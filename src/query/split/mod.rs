//! Splitting of facet soups by a plane.

pub use self::border::{BorderEdge, BorderEdges};
pub use self::separate::{separate_facets, SeparatedFacets};
pub use self::split::{FacetSplit, SplitStats};
pub use self::split_facet::split_facet;

mod border;
mod separate;
mod split;
mod split_facet;
