use super::{split_facet, BorderEdges, SplitStats};
use crate::shape::{Facet, Plane};

/// The two halves of a facet soup separated by a plane, before capping.
#[derive(Clone, Debug, Default)]
pub struct SeparatedFacets<M> {
    /// The facets, or parts of facets, lying above the plane.
    pub above: Vec<Facet<M>>,
    /// The facets, or parts of facets, lying below the plane.
    pub below: Vec<Facet<M>>,
    /// The segments where the surface meets the plane.
    pub border: BorderEdges,
    /// How many facets fell into each row of the splitting table.
    pub stats: SplitStats,
}

/// Splits every facet of `facets` by `plane`.
///
/// Facets lying entirely on the plane are dropped and only show up in the statistics.
pub fn separate_facets<M: Clone>(facets: &[Facet<M>], plane: &Plane) -> SeparatedFacets<M> {
    let mut result = SeparatedFacets {
        above: Vec::with_capacity(facets.len()),
        below: Vec::with_capacity(facets.len()),
        border: BorderEdges::new(),
        stats: SplitStats::default(),
    };

    for (i, facet) in facets.iter().enumerate() {
        let split = split_facet(
            facet,
            plane,
            &mut result.above,
            &mut result.below,
            &mut result.border,
        );
        log::trace!("facet {}: {:?}", i, split);
        result.stats.record(split);
    }

    log::debug!(
        "separated {} facets: {} above, {} below, {} cut, {} border edges",
        facets.len(),
        result.above.len(),
        result.below.len(),
        result.stats.num_cut(),
        result.border.len()
    );

    result
}
