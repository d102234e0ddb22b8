use proptest::prelude::*;
use voxedit_blocks::{Face, Orientation, rotate_face, rotate_face_mask, rotate_vector};
use voxedit_geom::Vec3;

fn arb_orientation() -> impl Strategy<Value = Orientation> {
    (0u8..8).prop_map(Orientation::from_bits)
}

#[test]
fn normals_follow_face_table() {
    for o in Orientation::ALL {
        for f in Face::ALL {
            assert_eq!(rotate_vector(f.normal(), o), rotate_face(f, o).normal(), "{o:?} {f:?}");
        }
    }
}

#[test]
fn each_orientation_is_a_face_permutation() {
    for o in Orientation::ALL {
        let mut seen = 0u8;
        for f in Face::ALL {
            seen |= rotate_face(f, o).bit();
        }
        assert_eq!(seen, 0b11_1111);
        // opposite faces stay opposite
        for f in Face::ALL {
            assert_eq!(rotate_face(f.opposite(), o), rotate_face(f, o).opposite());
        }
    }
}

#[test]
fn yaw_cycle_about_up() {
    let cycle = [Face::PosX, Face::NegZ, Face::NegX, Face::PosZ];
    for yaw in 0..4u8 {
        let o = Orientation::new(yaw, false);
        for (i, f) in cycle.iter().enumerate() {
            assert_eq!(rotate_face(*f, o), cycle[(i + yaw as usize) % 4]);
        }
    }
}

proptest! {
    #[test]
    fn mask_popcount_preserved(mask in 0u8..64, o in arb_orientation()) {
        prop_assert_eq!(rotate_face_mask(mask, o).count_ones(), mask.count_ones());
        prop_assert_eq!(rotate_face_mask(0b11_1111, o), 0b11_1111);
    }

    // Mask rotation agrees with rotating each face on its own
    #[test]
    fn mask_matches_single_faces(mask in 0u8..64, o in arb_orientation()) {
        let mut expect = 0u8;
        for f in Face::ALL {
            if mask & f.bit() != 0 {
                expect |= rotate_face(f, o).bit();
            }
        }
        prop_assert_eq!(rotate_face_mask(mask, o), expect);
    }

    // Rotation is exact and preserves length
    #[test]
    fn rotate_vector_is_exact(x in -4i32..4, y in -4i32..4, z in -4i32..4, o in arb_orientation()) {
        let v = Vec3::new(x as f32 * 0.25, y as f32 * 0.25, z as f32 * 0.25);
        let r = rotate_vector(v, o);
        prop_assert_eq!(r.dot(r), v.dot(v));
        let back = if o.flip() {
            // undo flip then the yaw
            let unflipped = Vec3::new(r.x, -r.y, r.z);
            rotate_vector(unflipped, Orientation::new((4 - o.yaw()) % 4, false))
        } else {
            rotate_vector(r, Orientation::new((4 - o.yaw()) % 4, false))
        };
        prop_assert_eq!(back, v);
    }

    #[test]
    fn ccw_then_cw_identity(o in arb_orientation()) {
        prop_assert_eq!(o.rotated_ccw().rotated_cw(), o);
        prop_assert_eq!(o.rotated_cw().yaw(), (o.yaw() + 3) % 4);
        prop_assert_eq!(o.flipped().flip(), !o.flip());
    }
}
