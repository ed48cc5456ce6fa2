/// The row of the splitting table a facet fell into.
///
/// Each variant fixes how many sub-facets the facet contributes to each half and whether
/// it contributes a border edge, see [`FacetSplit::output_counts`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum FacetSplit {
    /// All three vertices are above the plane.
    Above,
    /// All three vertices are below the plane.
    Below,
    /// All three vertices lie on the plane. The facet is discarded.
    Coplanar,
    /// Two vertices lie on the plane, the third one is above.
    EdgeAbove,
    /// Two vertices lie on the plane, the third one is below.
    EdgeBelow,
    /// Two vertices are above the plane, the third one lies on it.
    VertexAbove,
    /// Two vertices are below the plane, the third one lies on it.
    VertexBelow,
    /// One vertex on the plane, one above, one below: the facet is split in two.
    SimpleCut,
    /// One vertex above, two below: the facet is split in three.
    ComplexCutAbove,
    /// One vertex below, two above: the facet is split in three.
    ComplexCutBelow,
}

impl FacetSplit {
    /// Every row of the splitting table.
    pub const ALL: [FacetSplit; 10] = [
        FacetSplit::Above,
        FacetSplit::Below,
        FacetSplit::Coplanar,
        FacetSplit::EdgeAbove,
        FacetSplit::EdgeBelow,
        FacetSplit::VertexAbove,
        FacetSplit::VertexBelow,
        FacetSplit::SimpleCut,
        FacetSplit::ComplexCutAbove,
        FacetSplit::ComplexCutBelow,
    ];

    /// The number of facets emitted above, below, and the number of border edges
    /// recorded, for one facet falling into this row.
    pub fn output_counts(self) -> (usize, usize, usize) {
        match self {
            FacetSplit::Above | FacetSplit::VertexAbove => (1, 0, 0),
            FacetSplit::Below | FacetSplit::VertexBelow => (0, 1, 0),
            FacetSplit::Coplanar => (0, 0, 0),
            FacetSplit::EdgeAbove => (1, 0, 1),
            FacetSplit::EdgeBelow => (0, 1, 1),
            FacetSplit::SimpleCut => (1, 1, 1),
            FacetSplit::ComplexCutAbove => (1, 2, 1),
            FacetSplit::ComplexCutBelow => (2, 1, 1),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// How many facets fell into each row of the splitting table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitStats {
    counts: [usize; 10],
}

impl SplitStats {
    /// Records one facet split with the given row.
    #[inline]
    pub fn record(&mut self, split: FacetSplit) {
        self.counts[split.index()] += 1;
    }

    /// The number of facets that fell into `split`.
    #[inline]
    pub fn count(&self, split: FacetSplit) -> usize {
        self.counts[split.index()]
    }

    /// The total number of facets recorded.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// The number of facets emitted above and below the plane.
    pub fn expected_outputs(&self) -> (usize, usize) {
        FacetSplit::ALL.iter().fold((0, 0), |(above, below), split| {
            let (a, b, _) = split.output_counts();
            let n = self.count(*split);
            (above + a * n, below + b * n)
        })
    }

    /// The number of facets actually crossed by the plane.
    pub fn num_cut(&self) -> usize {
        self.count(FacetSplit::SimpleCut)
            + self.count(FacetSplit::ComplexCutAbove)
            + self.count(FacetSplit::ComplexCutBelow)
    }
}
