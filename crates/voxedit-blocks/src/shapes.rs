//! Built-in voxel shapes, authored in unit-cell space `[-0.5, 0.5]^3` in their
//! canonical (identity) orientation.

use voxedit_geom::Vec3;

use crate::face::{ALL_FACES_MASK, Face};
use crate::meshlet::{Meshlet, Triangle};

const H: f32 = 0.5;
const FULL: (f32, f32) = (-H, H);
const LOW: (f32, f32) = (-H, 0.0);
const HIGH: (f32, f32) = (0.0, H);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    None,
    Cube,
    Slab,
    Stairs,
    Wedge,
    /// Triangles supplied by the catalog file.
    Mesh,
}

impl ShapeKind {
    pub fn from_name(s: &str) -> Option<ShapeKind> {
        match s {
            "none" => Some(ShapeKind::None),
            "cube" => Some(ShapeKind::Cube),
            "slab" => Some(ShapeKind::Slab),
            "stairs" => Some(ShapeKind::Stairs),
            "wedge" => Some(ShapeKind::Wedge),
            "mesh" => Some(ShapeKind::Mesh),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::None => "none",
            ShapeKind::Cube => "cube",
            ShapeKind::Slab => "slab",
            ShapeKind::Stairs => "stairs",
            ShapeKind::Wedge => "wedge",
            ShapeKind::Mesh => "mesh",
        }
    }

    /// Faces fully covered by the shape in canonical orientation.
    pub const fn default_solid(self) -> u8 {
        match self {
            ShapeKind::None | ShapeKind::Mesh => 0,
            ShapeKind::Cube => ALL_FACES_MASK,
            ShapeKind::Slab => Face::NegY.bit(),
            ShapeKind::Stairs | ShapeKind::Wedge => Face::NegY.bit() | Face::NegZ.bit(),
        }
    }
}

/// Geometry split by the face it lies on. `faces[f]` is dropped by the mesher
/// when face `f` (after orientation) is covered by a neighbour; `interior` is
/// kept as long as any side of the cell is exposed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeGeometry {
    pub faces: [Meshlet; 6],
    pub interior: Meshlet,
}

impl ShapeGeometry {
    pub fn is_empty(&self) -> bool {
        self.interior.is_empty() && self.faces.iter().all(Meshlet::is_empty)
    }

    pub fn triangle_count(&self) -> usize {
        self.interior.len() + self.faces.iter().map(Meshlet::len).sum::<usize>()
    }

    #[inline]
    pub fn face(&self, f: Face) -> &Meshlet {
        &self.faces[f.index()]
    }

    #[inline]
    fn face_mut(&mut self, f: Face) -> &mut Meshlet {
        &mut self.faces[f.index()]
    }

    /// Geometry for a built-in shape. `Mesh` yields nothing here; see [`ShapeGeometry::from_tagged`].
    pub fn builtin(kind: ShapeKind) -> ShapeGeometry {
        match kind {
            ShapeKind::None | ShapeKind::Mesh => ShapeGeometry::default(),
            ShapeKind::Cube => cube(),
            ShapeKind::Slab => slab(),
            ShapeKind::Stairs => stairs(),
            ShapeKind::Wedge => wedge(),
        }
    }

    /// Groups loose triangles by tag; `None` goes to the interior meshlet.
    pub fn from_tagged(tris: impl IntoIterator<Item = (Option<Face>, Triangle)>) -> ShapeGeometry {
        let mut g = ShapeGeometry::default();
        for (tag, t) in tris {
            match tag {
                Some(f) => g.face_mut(f).tris.push(t),
                None => g.interior.tris.push(t),
            }
        }
        g
    }
}

#[inline]
fn plane_of(face: Face) -> f32 {
    if face.is_positive() { H } else { -H }
}

fn cube() -> ShapeGeometry {
    let mut g = ShapeGeometry::default();
    for f in Face::ALL {
        g.face_mut(f).push_rect(f, plane_of(f), FULL, FULL);
    }
    g
}

// Bottom half, y in [-0.5, 0].
fn slab() -> ShapeGeometry {
    let mut g = ShapeGeometry::default();
    g.face_mut(Face::NegY).push_rect(Face::NegY, -H, FULL, FULL);
    for f in [Face::PosX, Face::NegX] {
        g.face_mut(f).push_rect(f, plane_of(f), LOW, FULL);
    }
    for f in [Face::PosZ, Face::NegZ] {
        g.face_mut(f).push_rect(f, plane_of(f), FULL, LOW);
    }
    g.interior.push_rect(Face::PosY, 0.0, FULL, FULL);
    g
}

// Full bottom step plus a back step toward -Z.
fn stairs() -> ShapeGeometry {
    let mut g = ShapeGeometry::default();
    g.face_mut(Face::NegY).push_rect(Face::NegY, -H, FULL, FULL);
    g.face_mut(Face::NegZ).push_rect(Face::NegZ, -H, FULL, FULL);
    g.face_mut(Face::PosZ).push_rect(Face::PosZ, H, FULL, LOW);
    g.face_mut(Face::PosY).push_rect(Face::PosY, H, FULL, LOW);
    for f in [Face::PosX, Face::NegX] {
        let m = g.face_mut(f);
        m.push_rect(f, plane_of(f), LOW, FULL);
        m.push_rect(f, plane_of(f), HIGH, LOW);
    }
    // tread and riser
    g.interior.push_rect(Face::PosY, 0.0, FULL, HIGH);
    g.interior.push_rect(Face::PosZ, 0.0, FULL, HIGH);
    g
}

// Ramp rising toward -Z.
fn wedge() -> ShapeGeometry {
    let mut g = ShapeGeometry::default();
    g.face_mut(Face::NegY).push_rect(Face::NegY, -H, FULL, FULL);
    g.face_mut(Face::NegZ).push_rect(Face::NegZ, -H, FULL, FULL);
    for f in [Face::PosX, Face::NegX] {
        let x = plane_of(f);
        g.face_mut(f).push_tri(
            Vec3::new(x, -H, -H),
            Vec3::new(x, -H, H),
            Vec3::new(x, H, -H),
            f.normal(),
        );
    }
    let n = Vec3::new(0.0, 1.0, 1.0).normalized();
    g.interior.push_quad(
        Vec3::new(-H, H, -H),
        Vec3::new(H, H, -H),
        Vec3::new(H, -H, H),
        Vec3::new(-H, -H, H),
        n,
    );
    g
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_corners_in_cell(g: &ShapeGeometry) -> bool {
        g.faces
            .iter()
            .chain(std::iter::once(&g.interior))
            .flat_map(|m| m.tris.iter())
            .flat_map(|t| t.pos.iter())
            .all(|p| p.x.abs() <= H && p.y.abs() <= H && p.z.abs() <= H)
    }

    #[test]
    fn builtin_counts() {
        assert_eq!(ShapeGeometry::builtin(ShapeKind::Cube).triangle_count(), 12);
        assert_eq!(ShapeGeometry::builtin(ShapeKind::Slab).triangle_count(), 12);
        assert_eq!(ShapeGeometry::builtin(ShapeKind::Stairs).triangle_count(), 20);
        assert_eq!(ShapeGeometry::builtin(ShapeKind::Wedge).triangle_count(), 8);
        assert!(ShapeGeometry::builtin(ShapeKind::None).is_empty());
    }

    #[test]
    fn builtin_geometry_stays_in_cell_and_faces_outward() {
        for kind in [
            ShapeKind::Cube,
            ShapeKind::Slab,
            ShapeKind::Stairs,
            ShapeKind::Wedge,
        ] {
            let g = ShapeGeometry::builtin(kind);
            assert!(all_corners_in_cell(&g), "{kind:?}");
            let tris = g
                .faces
                .iter()
                .chain(std::iter::once(&g.interior))
                .flat_map(|m| m.tris.iter());
            for t in tris {
                assert!(t.geometric_normal().dot(t.norm[0]) > 0.0, "{kind:?}");
            }
        }
    }

    #[test]
    fn solid_faces_carry_full_quads() {
        for kind in [
            ShapeKind::Cube,
            ShapeKind::Slab,
            ShapeKind::Stairs,
            ShapeKind::Wedge,
        ] {
            let g = ShapeGeometry::builtin(kind);
            for f in Face::ALL {
                if kind.default_solid() & f.bit() != 0 {
                    let area: f32 = g
                        .face(f)
                        .tris
                        .iter()
                        .map(|t| t.geometric_normal().length() * 0.5)
                        .sum();
                    assert!((area - 1.0).abs() < 1e-6, "{kind:?} {f:?}");
                }
            }
        }
    }

    #[test]
    fn names_roundtrip() {
        for kind in [
            ShapeKind::None,
            ShapeKind::Cube,
            ShapeKind::Slab,
            ShapeKind::Stairs,
            ShapeKind::Wedge,
            ShapeKind::Mesh,
        ] {
            assert_eq!(ShapeKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ShapeKind::from_name("sphere"), None);
    }
}
