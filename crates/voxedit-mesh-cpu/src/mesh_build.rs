use voxedit_blocks::{Orientation, Triangle, rotate_vector};
use voxedit_geom::{Aabb, Vec3};

/// Unindexed triangle soup: three consecutive vertices per triangle.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub pos: Vec<Vec3>,
    pub norm: Vec<Vec3>,
}

impl MeshBuild {
    #[inline]
    pub fn reserve_triangles(&mut self, n: usize) {
        self.pos.reserve(n * 3);
        self.norm.reserve(n * 3);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.pos.len() / 3
    }

    /// Appends a unit-cell triangle placed into world space: rotate by `o`,
    /// scale by `scale`, then translate to `offset`. Mirroring orientations
    /// rewind the triangle so it still faces along its normal.
    pub fn add_cell_triangle(&mut self, t: &Triangle, o: Orientation, scale: f32, offset: Vec3) {
        let t = if o.reverses_winding() { t.reversed() } else { *t };
        for i in 0..3 {
            self.pos.push(rotate_vector(t.pos[i], o) * scale + offset);
            self.norm.push(rotate_vector(t.norm[i], o));
        }
    }
}

/// Deduplicated render mesh with flat `f32` attribute arrays.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct IndexedMesh {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub idx: Vec<u32>,
}

impl IndexedMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    pub fn position(&self, i: u32) -> Vec3 {
        let b = i as usize * 3;
        Vec3::new(self.pos[b], self.pos[b + 1], self.pos[b + 2])
    }

    pub fn normal(&self, i: u32) -> Vec3 {
        let b = i as usize * 3;
        Vec3::new(self.norm[b], self.norm[b + 1], self.norm[b + 2])
    }

    /// Iterates triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.idx.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// World-space bounds of the vertices, `None` when empty.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.pos
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        )
    }
}

/// Collision triangle soup (never welded).
#[derive(Default, Clone, Debug, PartialEq)]
pub struct CollisionMesh {
    pub pos: Vec<f32>,
}

impl CollisionMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    #[inline]
    pub(crate) fn push_tri(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        for p in [a, b, c] {
            self.pos.extend_from_slice(&[p.x, p.y, p.z]);
        }
    }
}
