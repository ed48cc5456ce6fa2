//! Wavefront (`.obj`) export.
//!
//! This module is enabled by the `wavefront` feature flag.

use crate::shape::Facet;
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::point_bits;
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::path::Path;

/// Outputs `facets` as a Wavefront (`.obj`) file at the given path.
///
/// Vertices with exactly the same coordinates are written once. Facet normals and
/// metadata aren’t exported.
pub fn facets_to_obj_file<M>(facets: &[Facet<M>], path: impl AsRef<Path>) -> Result<(), ObjError> {
    let mut file = std::fs::File::create(path)?;
    let mut position = Vec::new();
    let mut index_of = HashMap::default();

    let polys = facets
        .iter()
        .map(|facet| {
            let corners = facet
                .vertices
                .iter()
                .map(|v| {
                    let id = match index_of.entry(point_bits(v)) {
                        Entry::Occupied(entry) => *entry.get(),
                        Entry::Vacant(entry) => {
                            #[allow(clippy::unnecessary_cast)]
                            position.push([v.x as f32, v.y as f32, v.z as f32]);
                            *entry.insert(position.len() - 1)
                        }
                    };
                    IndexTuple(id, None, None)
                })
                .collect();
            SimplePolygon(corners)
        })
        .collect();

    ObjData {
        position,
        objects: vec![Object {
            groups: vec![Group {
                polys,
                name: String::new(),
                index: 0,
                material: None,
            }],
            name: String::new(),
        }],
        ..Default::default()
    }
    .write_to_buf(&mut file)
}
