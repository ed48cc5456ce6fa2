//! Cleanup of facet soups: vertex welding, removal of bad facets, hole filling.

use crate::math::{Point, Real};
use crate::shape::Facet;
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::{point_bits, SortedPair};
use smallvec::SmallVec;

type EdgeKey = SortedPair<[u64; 3]>;

#[derive(Clone, Debug)]
struct EdgeInfo {
    // The endpoints, as traversed by the first facet found on this edge.
    a: Point<Real>,
    b: Point<Real>,
    facets: SmallVec<[u32; 2]>,
}

/// Which facets share which edge, vertices being identified by their exact coordinates.
#[derive(Clone, Debug)]
pub struct EdgeTopology {
    edges: Vec<EdgeInfo>,
    facet_edges: Vec<[u32; 3]>,
    degenerate_facets: usize,
}

/// Edge statistics of a facet soup.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshStats {
    /// The number of facets.
    pub facets: usize,
    /// The number of distinct edges.
    pub edges: usize,
    /// The number of edges belonging to a single facet.
    pub boundary_edges: usize,
    /// The number of edges shared by more than two facets.
    pub non_manifold_edges: usize,
    /// The number of facets with two identical vertices.
    pub degenerate_facets: usize,
}

impl EdgeTopology {
    /// Computes the edge incidence of `facets`.
    pub fn new<M>(facets: &[Facet<M>]) -> Self {
        let mut index: HashMap<EdgeKey, u32> = HashMap::default();
        let mut edges: Vec<EdgeInfo> = Vec::new();
        let mut facet_edges = Vec::with_capacity(facets.len());
        let mut degenerate_facets = 0;

        for (fid, facet) in facets.iter().enumerate() {
            if facet.is_degenerate() {
                degenerate_facets += 1;
            }

            let ids = facet.edges().map(|(a, b)| {
                let key = SortedPair::new(point_bits(&a), point_bits(&b));
                let id = match index.entry(key) {
                    Entry::Occupied(e) => *e.get(),
                    Entry::Vacant(e) => {
                        edges.push(EdgeInfo {
                            a,
                            b,
                            facets: SmallVec::new(),
                        });
                        *e.insert(edges.len() as u32 - 1)
                    }
                };
                edges[id as usize].facets.push(fid as u32);
                id
            });
            facet_edges.push(ids);
        }

        Self {
            edges,
            facet_edges,
            degenerate_facets,
        }
    }

    /// The number of distinct edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// For each facet, the number of other facets sharing each of its three edges.
    pub fn neighbor_counts(&self) -> Vec<[usize; 3]> {
        self.facet_edges
            .iter()
            .map(|ids| ids.map(|id| self.edges[id as usize].facets.len() - 1))
            .collect()
    }

    /// The edges belonging to a single facet, oriented the way that facet traverses them.
    pub fn boundary_edges(&self) -> Vec<(Point<Real>, Point<Real>)> {
        self.edges
            .iter()
            .filter(|e| e.facets.len() == 1)
            .map(|e| (e.a, e.b))
            .collect()
    }

    /// Is every edge shared by exactly two facets?
    pub fn is_closed_manifold(&self) -> bool {
        !self.edges.is_empty() && self.edges.iter().all(|e| e.facets.len() == 2)
    }

    /// Edge statistics of the facets this topology was built from.
    pub fn stats(&self) -> MeshStats {
        MeshStats {
            facets: self.facet_edges.len(),
            edges: self.edges.len(),
            boundary_edges: self.edges.iter().filter(|e| e.facets.len() == 1).count(),
            non_manifold_edges: self.edges.iter().filter(|e| e.facets.len() > 2).count(),
            degenerate_facets: self.degenerate_facets,
        }
    }
}

/// Snaps together the vertices closer than `tolerance` to each other.
///
/// Vertices are visited in order; each one is replaced by the first previously visited
/// representative lying within `tolerance`, or becomes a representative itself.
/// Returns the number of vertices that moved.
pub fn weld_vertices<M>(facets: &mut [Facet<M>], tolerance: Real) -> usize {
    if tolerance <= 0.0 || !tolerance.is_finite() {
        return 0;
    }

    let cell_of = |pt: &Point<Real>| pt.coords.map(|x| (x / tolerance).floor() as i64);
    let mut representatives: Vec<Point<Real>> = Vec::new();
    let mut grid: HashMap<[i64; 3], SmallVec<[u32; 4]>> = HashMap::default();
    let mut moved = 0;

    for facet in facets.iter_mut() {
        for vtx in facet.vertices.iter_mut() {
            let cell = cell_of(vtx);
            let mut found = None;

            'search: for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let key = [cell.x + dx, cell.y + dy, cell.z + dz];
                        let Some(candidates) = grid.get(&key) else {
                            continue;
                        };
                        if let Some(id) = candidates.iter().find(|id| {
                            na::distance(&representatives[**id as usize], vtx) <= tolerance
                        }) {
                            found = Some(*id);
                            break 'search;
                        }
                    }
                }
            }

            match found {
                Some(id) => {
                    let rep = representatives[id as usize];
                    if rep != *vtx {
                        *vtx = rep;
                        moved += 1;
                    }
                }
                None => {
                    grid.entry(cell.into())
                        .or_default()
                        .push(representatives.len() as u32);
                    representatives.push(*vtx);
                }
            }
        }
    }

    moved
}

/// Removes the facets having two identical vertices. Returns the number of facets removed.
pub fn remove_degenerate_facets<M>(facets: &mut Vec<Facet<M>>) -> usize {
    let len = facets.len();
    facets.retain(|f| !f.is_degenerate());
    len - facets.len()
}

/// Removes the facets sharing no edge with any other facet.
///
/// Repeats up to `passes` times, stopping as soon as a pass removes nothing. Returns the
/// number of facets removed.
pub fn remove_unconnected_facets<M>(facets: &mut Vec<Facet<M>>, passes: usize) -> usize {
    let mut removed = 0;

    for _ in 0..passes {
        let counts = EdgeTopology::new(facets).neighbor_counts();
        let mut counts = counts.iter();
        let len = facets.len();
        facets.retain(|_| counts.next().map_or(true, |c| c.iter().sum::<usize>() != 0));

        if facets.len() == len {
            break;
        }
        removed += len - facets.len();
    }

    removed
}

/// Closes the holes bounded by at most `max_edges` boundary edges with fans of new facets.
///
/// The new facets are wound consistently with the facets around the hole and carry
/// `M::default()` as metadata. Returns the number of facets added.
pub fn fill_holes<M: Default>(facets: &mut Vec<Facet<M>>, max_edges: usize) -> usize {
    let boundary = EdgeTopology::new(facets).boundary_edges();
    if boundary.is_empty() {
        return 0;
    }

    let mut outgoing: HashMap<[u64; 3], SmallVec<[u32; 1]>> = HashMap::default();
    for (i, (a, _)) in boundary.iter().enumerate() {
        outgoing.entry(point_bits(a)).or_default().push(i as u32);
    }

    let mut used = vec![false; boundary.len()];
    let mut added = 0;

    for first in 0..boundary.len() {
        if used[first] {
            continue;
        }

        // Walk the boundary from `first` until coming back to its start.
        let start = point_bits(&boundary[first].0);
        let mut hole = vec![first];
        used[first] = true;

        loop {
            let end = point_bits(&boundary[hole[hole.len() - 1]].1);
            if end == start {
                break;
            }

            let next = outgoing
                .get(&end)
                .and_then(|ids| ids.iter().map(|id| *id as usize).find(|id| !used[*id]));
            match next {
                Some(id) => {
                    used[id] = true;
                    hole.push(id);
                }
                None => {
                    hole.clear();
                    break;
                }
            }
        }

        if hole.len() < 3 || hole.len() > max_edges {
            continue;
        }

        let pts: Vec<_> = hole.iter().map(|id| boundary[*id].0).collect();
        for i in 1..pts.len() - 1 {
            facets.push(Facet::from_vertices(
                pts[0],
                pts[i + 1],
                pts[i],
                M::default(),
            ));
            added += 1;
        }
    }

    added
}

bitflags::bitflags! {
    /// The steps performed by [`repair`].
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
    pub struct RepairFlags: u8 {
        /// Snap together vertices closer than the weld tolerance.
        const WELD_VERTICES = 1;
        /// Remove the facets with two identical vertices.
        const REMOVE_DEGENERATE = 1 << 1;
        /// Remove the facets sharing no edge with any other facet.
        const REMOVE_UNCONNECTED = 1 << 2;
        /// Close the small holes of the mesh.
        const FILL_HOLES = 1 << 3;
    }
}

impl Default for RepairFlags {
    fn default() -> Self {
        RepairFlags::all()
    }
}

/// Parameters of [`repair`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RepairParameters {
    /// The steps to perform.
    pub flags: RepairFlags,
    /// The distance below which two vertices are welded.
    pub weld_tolerance: Real,
    /// The maximum number of passes removing unconnected facets.
    pub unconnected_passes: usize,
    /// Holes with more boundary edges than this are left open.
    pub max_hole_edges: usize,
}

impl Default for RepairParameters {
    fn default() -> Self {
        Self {
            flags: RepairFlags::default(),
            weld_tolerance: 1.0e-5,
            unconnected_passes: 2,
            max_hole_edges: 3,
        }
    }
}

/// What [`repair`] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// The mesh statistics before repair.
    pub before: MeshStats,
    /// The mesh statistics after repair.
    pub after: MeshStats,
    /// The number of vertices moved by welding.
    pub welded_vertices: usize,
    /// The number of degenerate facets removed.
    pub degenerate_removed: usize,
    /// The number of unconnected facets removed.
    pub unconnected_removed: usize,
    /// The number of facets added to fill holes.
    pub hole_facets_added: usize,
}

/// Runs the repair steps selected by `params` on `facets`.
pub fn repair<M: Default>(facets: &mut Vec<Facet<M>>, params: &RepairParameters) -> RepairReport {
    let mut report = RepairReport {
        before: EdgeTopology::new(facets).stats(),
        ..RepairReport::default()
    };

    if params.flags.contains(RepairFlags::WELD_VERTICES) {
        report.welded_vertices = weld_vertices(facets, params.weld_tolerance);
    }
    if params.flags.contains(RepairFlags::REMOVE_DEGENERATE) {
        report.degenerate_removed = remove_degenerate_facets(facets);
    }
    if params.flags.contains(RepairFlags::REMOVE_UNCONNECTED) {
        report.unconnected_removed = remove_unconnected_facets(facets, params.unconnected_passes);
    }
    if params.flags.contains(RepairFlags::FILL_HOLES) {
        report.hole_facets_added = fill_holes(facets, params.max_hole_edges);
    }

    report.after = EdgeTopology::new(facets).stats();
    log::debug!("mesh repair: {:?}", report);

    if report.after.boundary_edges != 0 {
        log::warn!(
            "{} boundary edges remain after repair, the mesh isn’t closed",
            report.after.boundary_edges
        );
    }

    report
}
