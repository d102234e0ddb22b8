//! Vertex welding: merges soup vertices that are within `eps` of each other and
//! carry bit-identical normals, then drops triangles that collapse.

use hashbrown::HashMap;
use voxedit_geom::Vec3;

use crate::constants::PROBE_RADIUS;
use crate::mesh_build::{IndexedMesh, MeshBuild};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WeldStats {
    pub raw_vertices: usize,
    pub welded_vertices: usize,
    pub degenerate_dropped: usize,
}

type CellKey = (i64, i64, i64);

struct SpatialHash {
    inv_cell: f32,
    cells: HashMap<CellKey, Vec<u32>>,
}

impl SpatialHash {
    fn new(cell: f32) -> Self {
        Self {
            inv_cell: 1.0 / cell,
            cells: HashMap::new(),
        }
    }

    #[inline]
    fn key(&self, p: Vec3) -> CellKey {
        (
            (p.x * self.inv_cell).floor() as i64,
            (p.y * self.inv_cell).floor() as i64,
            (p.z * self.inv_cell).floor() as i64,
        )
    }

    // Lowest matching index wins, so the representative is the first vertex seen.
    fn find(&self, key: CellKey, mut accept: impl FnMut(u32) -> bool) -> Option<u32> {
        let mut best: Option<u32> = None;
        for dz in -PROBE_RADIUS..=PROBE_RADIUS {
            for dy in -PROBE_RADIUS..=PROBE_RADIUS {
                for dx in -PROBE_RADIUS..=PROBE_RADIUS {
                    // Keys saturate when `p / cell` leaves the i64 range.
                    let probe = (
                        key.0.saturating_add(dx),
                        key.1.saturating_add(dy),
                        key.2.saturating_add(dz),
                    );
                    let Some(bucket) = self.cells.get(&probe) else {
                        continue;
                    };
                    for &i in bucket {
                        if best.is_some_and(|b| b <= i) {
                            break;
                        }
                        if accept(i) {
                            best = Some(i);
                            break;
                        }
                    }
                }
            }
        }
        best
    }

    fn insert(&mut self, key: CellKey, i: u32) {
        self.cells.entry(key).or_default().push(i);
    }
}

/// Welds a triangle soup into an indexed mesh. A non-positive or non-finite
/// `eps` merges only exact duplicates.
pub fn weld(soup: &MeshBuild, eps: f32) -> (IndexedMesh, WeldStats) {
    let n = soup.pos.len();
    let mut out_pos: Vec<Vec3> = Vec::new();
    let mut out_nbits: Vec<[u32; 3]> = Vec::new();
    let mut out_norm: Vec<Vec3> = Vec::new();
    let mut remap: Vec<u32> = Vec::with_capacity(n);

    if eps > 0.0 && eps.is_finite() {
        let eps_sq = eps * eps;
        let mut grid = SpatialHash::new(eps);
        for (p, nrm) in soup.pos.iter().zip(&soup.norm) {
            let nb = nrm.canonical_bits();
            let key = grid.key(*p);
            let found = grid.find(key, |i| {
                let i = i as usize;
                out_nbits[i] == nb && out_pos[i].distance_sq(*p) <= eps_sq
            });
            let id = match found {
                Some(i) => i,
                None => {
                    let i = out_pos.len() as u32;
                    out_pos.push(*p);
                    out_norm.push(*nrm);
                    out_nbits.push(nb);
                    grid.insert(key, i);
                    i
                }
            };
            remap.push(id);
        }
    } else {
        let mut exact: HashMap<([u32; 3], [u32; 3]), u32> = HashMap::new();
        for (p, nrm) in soup.pos.iter().zip(&soup.norm) {
            let k = (p.canonical_bits(), nrm.canonical_bits());
            let id = *exact.entry(k).or_insert_with(|| {
                out_pos.push(*p);
                out_norm.push(*nrm);
                out_pos.len() as u32 - 1
            });
            remap.push(id);
        }
    }

    let mut mesh = IndexedMesh {
        pos: Vec::with_capacity(out_pos.len() * 3),
        norm: Vec::with_capacity(out_norm.len() * 3),
        idx: Vec::with_capacity(remap.len()),
    };
    for (p, nrm) in out_pos.iter().zip(&out_norm) {
        mesh.pos.extend_from_slice(&[p.x, p.y, p.z]);
        mesh.norm.extend_from_slice(&[nrm.x, nrm.y, nrm.z]);
    }
    let mut dropped = 0usize;
    for t in remap.chunks_exact(3) {
        let (a, b, c) = (t[0], t[1], t[2]);
        if a == b || b == c || a == c {
            dropped += 1;
            continue;
        }
        mesh.idx.extend_from_slice(&[a, b, c]);
    }
    let stats = WeldStats {
        raw_vertices: n,
        welded_vertices: out_pos.len(),
        degenerate_dropped: dropped,
    };
    (mesh, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soup(tris: &[[Vec3; 3]], n: Vec3) -> MeshBuild {
        let mut m = MeshBuild::default();
        for t in tris {
            for p in t {
                m.pos.push(*p);
                m.norm.push(n);
            }
        }
        m
    }

    #[test]
    fn shared_edge_merges() {
        let up = Vec3::UP;
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(1.0, 0.0, 1.0);
        let d = Vec3::new(0.0, 0.0, 1.0);
        let m = soup(&[[a, c, b], [a, d, c]], up);
        let (mesh, st) = weld(&m, 0.01);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(st.raw_vertices, 6);
        assert_eq!(st.degenerate_dropped, 0);
    }

    #[test]
    fn differing_normals_stay_apart() {
        let p = Vec3::new(0.5, 0.5, 0.5);
        let mut m = MeshBuild::default();
        m.pos.extend([p, p]);
        m.norm.extend([Vec3::UP, Vec3::new(1.0, 0.0, 0.0)]);
        let (mesh, _) = weld(&m, 0.1);
        assert_eq!(mesh.vertex_count(), 2);
    }

    #[test]
    fn negative_zero_normal_matches_positive_zero() {
        let p = Vec3::new(0.0, 0.0, 0.0);
        let mut m = MeshBuild::default();
        m.pos.extend([p, p]);
        m.norm.extend([Vec3::new(-0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -0.0)]);
        assert_eq!(weld(&m, 0.1).0.vertex_count(), 1);
        assert_eq!(weld(&m, 0.0).0.vertex_count(), 1);
    }

    #[test]
    fn collapsed_triangle_is_dropped() {
        let n = Vec3::UP;
        let m = soup(
            &[[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.001, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ]],
            n,
        );
        let (mesh, st) = weld(&m, 0.01);
        assert!(mesh.is_empty());
        assert_eq!(st.degenerate_dropped, 1);
    }

    #[test]
    fn subnormal_radius_still_merges_exact_duplicates() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(1.0, 0.0, 1.0);
        let d = Vec3::new(0.0, 0.0, 1.0);
        let m = soup(&[[a, c, b], [a, d, c]], Vec3::UP);
        let (mesh, st) = weld(&m, 1e-39);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(st.degenerate_dropped, 0);
    }
}
