//! CPU meshing crate: culled triangle soup, vertex welding and collision boxes.
#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use voxedit_blocks::VoxelCatalog;
use voxedit_geom::Vec3;
use voxedit_volume::SparseVolume;

mod collision;
pub mod constants;
mod emit;
pub mod mesh_build;
mod util;
pub mod weld;

pub use constants::{DEFAULT_VOXEL_SIZE, DEFAULT_WELD_FRACTION};
pub use mesh_build::{CollisionMesh, IndexedMesh, MeshBuild};
pub use weld::{WeldStats, weld};

use crate::collision::emit_cell_box;
use crate::constants::BOX_TRIANGLES;
use crate::emit::emit_cell;
use crate::util::hidden_dirs;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MeshParams {
    /// Edge length of one cell in world units.
    pub voxel_size: f32,
    /// Merge radius for the weld pass, in world units.
    pub weld_epsilon: f32,
}

impl MeshParams {
    pub fn with_voxel_size(voxel_size: f32) -> Self {
        Self {
            voxel_size,
            weld_epsilon: voxel_size * DEFAULT_WELD_FRACTION,
        }
    }
}

impl Default for MeshParams {
    fn default() -> Self {
        Self::with_voxel_size(DEFAULT_VOXEL_SIZE)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub occupied_cells: usize,
    pub unknown_cells: usize,
    pub faces_emitted: usize,
    pub faces_culled: usize,
    pub raw_vertices: usize,
    pub welded_vertices: usize,
    pub degenerate_dropped: usize,
}

#[derive(Clone, Debug, Default)]
pub struct VolumeMesh {
    pub render: IndexedMesh,
    pub collision: CollisionMesh,
    pub stats: MeshStats,
}

/// Builds the culled triangle soup and collision boxes for every occupied cell.
pub fn build_soup(
    vol: &SparseVolume,
    cat: &VoxelCatalog,
    params: &MeshParams,
) -> (MeshBuild, CollisionMesh, MeshStats) {
    let mut soup = MeshBuild::default();
    let mut collision = CollisionMesh::default();
    let mut stats = MeshStats::default();
    let mut unknown: BTreeSet<u8> = BTreeSet::new();
    let s = params.voxel_size;
    soup.reserve_triangles(vol.occupied_count() * BOX_TRIANGLES / 2);

    for ([x, y, z], v) in vol.iter_occupied() {
        stats.occupied_cells += 1;
        let Some(ty) = cat.get(v.type_id) else {
            stats.unknown_cells += 1;
            unknown.insert(v.type_id);
            continue;
        };
        let center = Vec3::from_cell(x, y, z) * s;
        let hidden = hidden_dirs(vol, cat, x, y, z);
        let e = emit_cell(&mut soup, ty, v.orient(), hidden, s, center);
        stats.faces_emitted += e.faces_emitted;
        stats.faces_culled += e.faces_culled;
        emit_cell_box(&mut collision, center, s);
    }
    if !unknown.is_empty() {
        log::warn!(
            "{} cell(s) reference unknown voxel types {:?}; skipped",
            stats.unknown_cells,
            unknown
        );
    }
    (soup, collision, stats)
}

/// Full rebuild: soup, weld, collision. Pure function of its inputs.
pub fn build_volume_mesh(
    vol: &SparseVolume,
    cat: &VoxelCatalog,
    params: &MeshParams,
) -> VolumeMesh {
    let (soup, collision, mut stats) = build_soup(vol, cat, params);
    let (render, ws) = weld(&soup, params.weld_epsilon);
    stats.raw_vertices = ws.raw_vertices;
    stats.welded_vertices = ws.welded_vertices;
    stats.degenerate_dropped = ws.degenerate_dropped;
    log::debug!(
        "mesh: {} cells, {} faces ({} culled), {} -> {} vertices, {} tris, {} collision tris",
        stats.occupied_cells,
        stats.faces_emitted,
        stats.faces_culled,
        stats.raw_vertices,
        stats.welded_vertices,
        render.triangle_count(),
        collision.triangle_count()
    );
    VolumeMesh {
        render,
        collision,
        stats,
    }
}
