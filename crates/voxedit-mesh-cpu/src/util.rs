use voxedit_blocks::{Face, Voxel, VoxelCatalog, rotate_face_mask};
use voxedit_volume::SparseVolume;

/// World-space solid mask of a voxel; `0` for empty or unknown types.
#[inline]
pub(crate) fn world_solid_mask(cat: &VoxelCatalog, v: Voxel) -> u8 {
    if v.is_empty() {
        return 0;
    }
    rotate_face_mask(cat.solid_face_flags(v.type_id), v.orient())
}

/// Returns true if the neighbour `nb`, lying across `dir`, covers that shared face.
#[inline]
pub(crate) fn occludes_face(cat: &VoxelCatalog, nb: Voxel, dir: Face) -> bool {
    (world_solid_mask(cat, nb) >> dir.opposite().index()) & 1 == 1
}

/// Bitmask of world directions hidden by a neighbour for the cell at `(x,y,z)`.
pub(crate) fn hidden_dirs(vol: &SparseVolume, cat: &VoxelCatalog, x: i32, y: i32, z: i32) -> u8 {
    let mut hidden = 0u8;
    for dir in Face::ALL {
        let (dx, dy, dz) = dir.delta();
        // Past the edge of the coordinate space there is nothing to hide behind.
        let (Some(nx), Some(ny), Some(nz)) =
            (x.checked_add(dx), y.checked_add(dy), z.checked_add(dz))
        else {
            continue;
        };
        if occludes_face(cat, vol.get(nx, ny, nz), dir) {
            hidden |= dir.bit();
        }
    }
    hidden
}
