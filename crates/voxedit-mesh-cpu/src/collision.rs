use voxedit_geom::{Aabb, Vec3};

use crate::constants::BOX_TRIANGLES;
use crate::mesh_build::CollisionMesh;

// Corner order: bit0 = +x, bit1 = +y, bit2 = +z.
const BOX_QUADS: [[usize; 4]; 6] = [
    [1, 3, 7, 5], // +x
    [0, 4, 6, 2], // -x
    [2, 6, 7, 3], // +y
    [0, 1, 5, 4], // -y
    [4, 5, 7, 6], // +z
    [0, 2, 3, 1], // -z
];

/// Appends the full bounding cube of the cell centred at `center` (edge `size`).
pub(crate) fn emit_cell_box(out: &mut CollisionMesh, center: Vec3, size: f32) {
    let bb = Aabb::cube(center, size);
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 != 0 { bb.max.x } else { bb.min.x },
            if i & 2 != 0 { bb.max.y } else { bb.min.y },
            if i & 4 != 0 { bb.max.z } else { bb.min.z },
        )
    };
    out.pos.reserve(BOX_TRIANGLES * 9);
    for [a, b, c, d] in BOX_QUADS {
        out.push_tri(corner(a), corner(b), corner(c));
        out.push_tri(corner(a), corner(c), corner(d));
    }
}
