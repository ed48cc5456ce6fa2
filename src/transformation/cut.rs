use super::{build_caps, stitch_contour, ContourError, TriangulationError, Triangulator};
use crate::query::split::{separate_facets, SplitStats};
use crate::shape::{Facet, Plane};

/// Parameters of [`cut_facets`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutParameters {
    /// The algorithm used to triangulate the caps.
    pub triangulator: Triangulator,
    /// If `true`, a cross-section that doesn’t stitch into a single closed loop is capped
    /// with the first loop found instead of failing.
    pub allow_partial_contour: bool,
}

/// Errors that can occur when cutting a mesh.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CutError {
    /// The mesh to cut has no facets.
    #[error("the mesh to cut has no facets")]
    EmptyMesh,
    /// The cross-section couldn’t be assembled into a polygon.
    #[error("failed to assemble the cross-section: {0}")]
    Contour(#[from] ContourError),
    /// The cross-section polygon couldn’t be triangulated.
    #[error("failed to triangulate the cross-section: {0}")]
    Triangulation(#[from] TriangulationError),
}

/// Statistics about a cut.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CutStats {
    /// How many input facets fell into each row of the splitting table.
    pub split: SplitStats,
    /// The number of distinct border edges.
    pub border_edges: usize,
    /// The number of border edges left out of the cap.
    pub unmatched_edges: usize,
    /// The number of vertices of the cap polygon.
    pub contour_points: usize,
    /// The number of cap facets added to each half.
    pub cap_facets: usize,
}

/// The two capped halves of a cut mesh.
#[derive(Clone, Debug)]
pub struct CutResult<M> {
    /// The part of the mesh above the plane, i.e., on the side its normal points to.
    pub upper: Vec<Facet<M>>,
    /// The part of the mesh below the plane.
    pub lower: Vec<Facet<M>>,
    /// Statistics about the cut.
    pub stats: CutStats,
}

/// Cuts a closed mesh in two along `plane`, and closes both halves with a cap.
///
/// Cap facets get `M::default()` as metadata. If the plane doesn’t cross the mesh, both
/// halves are returned uncapped (one of them being empty, or both if the mesh lies
/// on the plane).
pub fn cut_facets<M: Clone + Default>(
    facets: &[Facet<M>],
    plane: &Plane,
    params: &CutParameters,
) -> Result<CutResult<M>, CutError> {
    if facets.is_empty() {
        return Err(CutError::EmptyMesh);
    }

    let separated = separate_facets(facets, plane);
    let mut upper = separated.above;
    let mut lower = separated.below;
    let mut stats = CutStats {
        split: separated.stats,
        border_edges: separated.border.len(),
        ..CutStats::default()
    };

    let contour = match stitch_contour(&separated.border, plane) {
        Ok(contour) => Some(contour),
        Err(ContourError::Empty) => {
            log::debug!("the plane doesn’t cross the mesh, skipping the caps");
            None
        }
        Err(ContourError::Incomplete { contour, unmatched }) if params.allow_partial_contour => {
            log::warn!(
                "{} border edges are not part of the cap, the cut halves won’t be closed",
                unmatched
            );
            stats.unmatched_edges = unmatched;
            Some(contour)
        }
        Err(ContourError::Open { contour }) if params.allow_partial_contour => {
            log::warn!(
                "the cross-section isn’t closed, capping the open chain of {} points",
                contour.points.len()
            );
            Some(contour)
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(contour) = contour {
        stats.contour_points = contour.points.len();
        stats.cap_facets = build_caps(
            &contour,
            plane,
            params.triangulator,
            &mut upper,
            &mut lower,
            M::default(),
        )?;
    }

    log::debug!(
        "cut {} facets into {} upper and {} lower facets",
        facets.len(),
        upper.len(),
        lower.len()
    );

    Ok(CutResult {
        upper,
        lower,
        stats,
    })
}
