//! The eight discrete voxel orientations (4 yaw steps x vertical flip).
//!
//! Geometry and face masks are transformed through the same table
//! ([`ORIENTATIONS`]); the face permutation table is derived from it at compile
//! time, so a rotated meshlet always lands on the face its rotated mask bit names.

use voxedit_geom::Vec3;

use crate::face::Face;

/// Packed orientation: bits 0-1 yaw (90 degree steps about +Y), bit 2 flip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Orientation(u8);

impl Orientation {
    pub const IDENTITY: Orientation = Orientation(0);
    pub const YAW_MASK: u8 = 0b011;
    pub const FLIP_BIT: u8 = 0b100;

    pub const ALL: [Orientation; 8] = [
        Orientation(0),
        Orientation(1),
        Orientation(2),
        Orientation(3),
        Orientation(4),
        Orientation(5),
        Orientation(6),
        Orientation(7),
    ];

    /// Keeps only the meaningful bits of a raw byte.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Orientation(bits & (Self::YAW_MASK | Self::FLIP_BIT))
    }

    #[inline]
    pub const fn new(yaw: u8, flip: bool) -> Self {
        let f = if flip { Self::FLIP_BIT } else { 0 };
        Orientation((yaw & Self::YAW_MASK) | f)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn yaw(self) -> u8 {
        self.0 & Self::YAW_MASK
    }

    #[inline]
    pub const fn flip(self) -> bool {
        self.0 & Self::FLIP_BIT != 0
    }

    /// Mirroring Y inverts handedness, so emitted triangles must be rewound.
    #[inline]
    pub const fn reverses_winding(self) -> bool {
        self.flip()
    }

    /// One yaw step counter-clockwise seen from above.
    #[inline]
    pub const fn rotated_ccw(self) -> Self {
        Self::new((self.yaw() + 1) % 4, self.flip())
    }

    /// One yaw step clockwise seen from above.
    #[inline]
    pub const fn rotated_cw(self) -> Self {
        Self::new((self.yaw() + 3) % 4, self.flip())
    }

    #[inline]
    pub const fn flipped(self) -> Self {
        Orientation(self.0 ^ Self::FLIP_BIT)
    }
}

/// Signed axis permutation: output component `i` is `sign[i] * input[src[i]]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisMap {
    pub src: [usize; 3],
    pub sign: [i8; 3],
}

impl AxisMap {
    #[inline]
    const fn apply_i(&self, d: (i32, i32, i32)) -> (i32, i32, i32) {
        let a = [d.0, d.1, d.2];
        (
            self.sign[0] as i32 * a[self.src[0]],
            self.sign[1] as i32 * a[self.src[1]],
            self.sign[2] as i32 * a[self.src[2]],
        )
    }

    #[inline]
    fn apply(&self, v: Vec3) -> Vec3 {
        let a = v.to_array();
        Vec3::new(
            self.sign[0] as f32 * a[self.src[0]],
            self.sign[1] as f32 * a[self.src[1]],
            self.sign[2] as f32 * a[self.src[2]],
        )
    }
}

// Right-handed rotation about +Y: yaw 1 takes +X to -Z.
const fn axis_map(yaw: u8, flip: bool) -> AxisMap {
    let fy = if flip { -1 } else { 1 };
    match yaw & 3 {
        0 => AxisMap {
            src: [0, 1, 2],
            sign: [1, fy, 1],
        },
        1 => AxisMap {
            src: [2, 1, 0],
            sign: [1, fy, -1],
        },
        2 => AxisMap {
            src: [0, 1, 2],
            sign: [-1, fy, -1],
        },
        _ => AxisMap {
            src: [2, 1, 0],
            sign: [-1, fy, 1],
        },
    }
}

/// Indexed by [`Orientation::index`].
pub const ORIENTATIONS: [AxisMap; 8] = {
    let mut out = [axis_map(0, false); 8];
    let mut i = 0;
    while i < 8 {
        out[i] = axis_map((i & 3) as u8, i & 4 != 0);
        i += 1;
    }
    out
};

/// `FACE_TABLE[o][f]` is the world direction canonical face `f` points to
/// under orientation `o`.
pub const FACE_TABLE: [[Face; 6]; 8] = {
    let mut out = [[Face::PosX; 6]; 8];
    let mut o = 0;
    while o < 8 {
        let mut f = 0;
        while f < 6 {
            let d = Face::ALL[f].delta();
            out[o][f] = match Face::from_delta(ORIENTATIONS[o].apply_i(d)) {
                Some(face) => face,
                None => panic!("orientation table is not a signed axis permutation"),
            };
            f += 1;
        }
        o += 1;
    }
    out
};

/// Rotates `v` about +Y by `yaw * 90` degrees, then mirrors Y if flipped.
/// Exact: only swaps and negates components.
#[inline]
pub fn rotate_vector(v: Vec3, o: Orientation) -> Vec3 {
    ORIENTATIONS[o.index()].apply(v)
}

#[inline]
pub fn rotate_face(face: Face, o: Orientation) -> Face {
    FACE_TABLE[o.index()][face.index()]
}

/// Permutes a 6-bit solid-face mask the same way [`rotate_vector`] moves geometry.
#[inline]
pub fn rotate_face_mask(mask: u8, o: Orientation) -> u8 {
    let table = &FACE_TABLE[o.index()];
    let mut out = 0u8;
    for face in Face::ALL {
        if mask & face.bit() != 0 {
            out |= table[face.index()].bit();
        }
    }
    out
}
