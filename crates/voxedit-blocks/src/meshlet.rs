use voxedit_geom::Vec3;

use crate::face::Face;

/// One triangle in unit-cell space with a normal per corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub pos: [Vec3; 3],
    pub norm: [Vec3; 3],
}

impl Triangle {
    /// Flat-shaded triangle. Corners are reordered if needed so the winding is
    /// counter-clockwise when viewed from the side `n` points to.
    pub fn flat(a: Vec3, b: Vec3, c: Vec3, n: Vec3) -> Self {
        let (b, c) = if (b - a).cross(c - a).dot(n) < 0.0 {
            (c, b)
        } else {
            (b, c)
        };
        Triangle {
            pos: [a, b, c],
            norm: [n; 3],
        }
    }

    /// Unnormalised face normal from the winding.
    #[inline]
    pub fn geometric_normal(&self) -> Vec3 {
        let [a, b, c] = self.pos;
        (b - a).cross(c - a)
    }

    /// Same triangle with the opposite winding.
    #[inline]
    pub fn reversed(&self) -> Self {
        Triangle {
            pos: [self.pos[2], self.pos[1], self.pos[0]],
            norm: [self.norm[2], self.norm[1], self.norm[0]],
        }
    }
}

/// A small triangle list belonging to one face (or the interior) of a shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Meshlet {
    pub tris: Vec<Triangle>,
}

impl Meshlet {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tris.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tris.len()
    }

    pub fn push_tri(&mut self, a: Vec3, b: Vec3, c: Vec3, n: Vec3) {
        self.tris.push(Triangle::flat(a, b, c, n));
    }

    /// Quad `a-b-c-d` given in perimeter order; split along `a-c`.
    pub fn push_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3, n: Vec3) {
        self.push_tri(a, b, c, n);
        self.push_tri(a, c, d, n);
    }

    /// Axis-aligned rectangle on the plane `axis(face) = plane`, facing `face`.
    ///
    /// Tangent axes: X faces span (Y, Z), Y faces span (X, Z), Z faces span (X, Y).
    pub fn push_rect(&mut self, face: Face, plane: f32, u: (f32, f32), v: (f32, f32)) {
        let at = |pu: f32, pv: f32| match face.axis() {
            0 => Vec3::new(plane, pu, pv),
            1 => Vec3::new(pu, plane, pv),
            _ => Vec3::new(pu, pv, plane),
        };
        self.push_quad(
            at(u.0, v.0),
            at(u.1, v.0),
            at(u.1, v.1),
            at(u.0, v.1),
            face.normal(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_winding_faces_outward() {
        for face in Face::ALL {
            let mut m = Meshlet::default();
            let plane = if face.is_positive() { 0.5 } else { -0.5 };
            m.push_rect(face, plane, (-0.5, 0.5), (-0.5, 0.5));
            assert_eq!(m.len(), 2);
            for t in &m.tris {
                assert!(t.geometric_normal().dot(face.normal()) > 0.0, "{face:?}");
            }
        }
    }

    #[test]
    fn reversed_flips_geometric_normal() {
        let t = Triangle::flat(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert!(t.geometric_normal().z > 0.0);
        assert!(t.reversed().geometric_normal().z < 0.0);
    }

    #[test]
    fn flat_fixes_clockwise_input() {
        let t = Triangle::flat(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert!(t.geometric_normal().z > 0.0);
    }
}
