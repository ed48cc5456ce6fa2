//! Cutting of facet soups into capped halves, and the mesh processing around it.

pub use self::cap::build_caps;
pub use self::contour::{stitch_contour, Contour, ContourError, SPATIAL_INDEX_THRESHOLD};
pub use self::cut::{cut_facets, CutError, CutParameters, CutResult, CutStats};
pub use self::repair::{
    fill_holes, remove_degenerate_facets, remove_unconnected_facets, repair, weld_vertices,
    EdgeTopology, MeshStats, RepairFlags, RepairParameters, RepairReport,
};
pub use self::triangulate::{TriangulationError, Triangulator};

mod cap;
mod contour;
mod cut;
pub(crate) mod ear_clipping;
mod repair;
mod triangulate;
