use voxedit_blocks::{Face, Meshlet, Orientation, VoxelTypeDescriptor, rotate_face};
use voxedit_geom::Vec3;

use crate::mesh_build::MeshBuild;

/// Per-cell emission counts.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct CellEmit {
    pub faces_emitted: usize,
    pub faces_culled: usize,
}

#[inline]
fn emit_meshlet(out: &mut MeshBuild, m: &Meshlet, o: Orientation, scale: f32, offset: Vec3) {
    for t in &m.tris {
        out.add_cell_triangle(t, o, scale, offset);
    }
}

/// Emits the visible meshlets of one voxel. `hidden` holds the world directions
/// covered by neighbours; canonical face `f` is kept iff `rotate_face(f, o)`
/// is not in it, and the interior is kept iff any direction is open.
pub(crate) fn emit_cell(
    out: &mut MeshBuild,
    ty: &VoxelTypeDescriptor,
    o: Orientation,
    hidden: u8,
    scale: f32,
    offset: Vec3,
) -> CellEmit {
    let mut stats = CellEmit::default();
    for f in Face::ALL {
        let m = ty.geometry.face(f);
        if m.is_empty() {
            continue;
        }
        if hidden & rotate_face(f, o).bit() != 0 {
            stats.faces_culled += 1;
            continue;
        }
        emit_meshlet(out, m, o, scale, offset);
        stats.faces_emitted += 1;
    }
    if hidden.count_ones() < 6 {
        emit_meshlet(out, &ty.geometry.interior, o, scale, offset);
    }
    stats
}
