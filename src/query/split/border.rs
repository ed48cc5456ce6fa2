use crate::math::{Point, Real};
use crate::utils::{hashmap::HashSet, point_bits, SortedPair};

/// A segment lying on the cutting plane, where a facet meets the cap.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BorderEdge {
    /// The first endpoint.
    pub a: Point<Real>,
    /// The second endpoint.
    pub b: Point<Real>,
}

impl BorderEdge {
    /// The undirected identity of this edge.
    pub fn key(&self) -> SortedPair<[u64; 3]> {
        SortedPair::new(point_bits(&self.a), point_bits(&self.b))
    }
}

/// The set of border edges produced by a cut, in the order they were first recorded.
///
/// The same chord recorded twice, in either direction, is only stored once. Zero-length
/// chords are ignored.
#[derive(Clone, Debug, Default)]
pub struct BorderEdges {
    edges: Vec<BorderEdge>,
    keys: HashSet<SortedPair<[u64; 3]>>,
}

impl BorderEdges {
    /// An empty set of border edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the edge `a → b`.
    ///
    /// Returns `false` if the edge was already recorded or has zero length.
    pub fn insert(&mut self, a: Point<Real>, b: Point<Real>) -> bool {
        let edge = BorderEdge { a, b };
        let key = edge.key();

        if key.first() == key.second() || !self.keys.insert(key) {
            return false;
        }

        self.edges.push(edge);
        true
    }

    /// The number of distinct edges recorded.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Are there no border edges?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The edges, in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[BorderEdge] {
        &self.edges
    }

    /// An iterator through the edges, in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, BorderEdge> {
        self.edges.iter()
    }

    /// Moves every edge of `other` into `self`, skipping those already present.
    pub fn append(&mut self, other: BorderEdges) {
        for edge in other.edges {
            let _ = self.insert(edge.a, edge.b);
        }
    }
}

impl<'a> IntoIterator for &'a BorderEdges {
    type Item = &'a BorderEdge;
    type IntoIter = core::slice::Iter<'a, BorderEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(Point<Real>, Point<Real>)> for BorderEdges {
    fn from_iter<I: IntoIterator<Item = (Point<Real>, Point<Real>)>>(iter: I) -> Self {
        let mut result = BorderEdges::new();
        for (a, b) in iter {
            let _ = result.insert(a, b);
        }
        result
    }
}
