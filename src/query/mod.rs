//! Non-persistent geometric queries between a facet soup and a plane.

pub use self::split::{
    separate_facets, split_facet, BorderEdge, BorderEdges, FacetSplit, SeparatedFacets,
    SplitStats,
};

pub mod split;
