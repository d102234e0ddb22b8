use voxedit_geom::Vec3;

/// Mask with every face bit set.
pub const ALL_FACES_MASK: u8 = 0b11_1111;

/// Cardinal face directions. The discriminant is the bit index used by every
/// face mask in the workspace (catalog flags, persisted data, culling).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(i: usize) -> Option<Face> {
        match i {
            0 => Some(Face::PosX),
            1 => Some(Face::NegX),
            2 => Some(Face::PosY),
            3 => Some(Face::NegY),
            4 => Some(Face::PosZ),
            5 => Some(Face::NegZ),
            _ => None,
        }
    }

    #[inline]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    #[inline]
    pub const fn opposite(self) -> Face {
        match self {
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }

    /// Axis index (0 = X, 1 = Y, 2 = Z).
    #[inline]
    pub const fn axis(self) -> usize {
        self.index() / 2
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.index() % 2 == 0
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub const fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    #[inline]
    pub const fn from_delta(d: (i32, i32, i32)) -> Option<Face> {
        match d {
            (1, 0, 0) => Some(Face::PosX),
            (-1, 0, 0) => Some(Face::NegX),
            (0, 1, 0) => Some(Face::PosY),
            (0, -1, 0) => Some(Face::NegY),
            (0, 0, 1) => Some(Face::PosZ),
            (0, 0, -1) => Some(Face::NegZ),
            _ => None,
        }
    }

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        let (x, y, z) = self.delta();
        Vec3::from_cell(x, y, z)
    }

    /// Name used in catalog files.
    pub const fn name(self) -> &'static str {
        match self {
            Face::PosX => "pos_x",
            Face::NegX => "neg_x",
            Face::PosY => "pos_y",
            Face::NegY => "neg_y",
            Face::PosZ => "pos_z",
            Face::NegZ => "neg_z",
        }
    }

    pub fn from_name(s: &str) -> Option<Face> {
        Face::ALL.into_iter().find(|f| f.name() == s)
    }
}

/// Iterates the faces whose bits are set in `mask`.
pub fn faces_in_mask(mask: u8) -> impl Iterator<Item = Face> {
    Face::ALL.into_iter().filter(move |f| mask & f.bit() != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution_and_negates_delta() {
        for f in Face::ALL {
            assert_eq!(f.opposite().opposite(), f);
            let (x, y, z) = f.delta();
            assert_eq!(f.opposite().delta(), (-x, -y, -z));
            assert_eq!(f.opposite().bit().count_ones(), 1);
        }
    }

    #[test]
    fn index_delta_name_roundtrip() {
        for f in Face::ALL {
            assert_eq!(Face::from_index(f.index()), Some(f));
            assert_eq!(Face::from_delta(f.delta()), Some(f));
            assert_eq!(Face::from_name(f.name()), Some(f));
        }
        assert_eq!(Face::from_index(6), None);
        assert_eq!(Face::from_delta((1, 1, 0)), None);
    }

    #[test]
    fn bit_order_matches_catalog_convention() {
        assert_eq!(Face::PosX.bit(), 0b000001);
        assert_eq!(Face::NegX.bit(), 0b000010);
        assert_eq!(Face::PosY.bit(), 0b000100);
        assert_eq!(Face::NegY.bit(), 0b001000);
        assert_eq!(Face::PosZ.bit(), 0b010000);
        assert_eq!(Face::NegZ.bit(), 0b100000);
        assert_eq!(faces_in_mask(ALL_FACES_MASK).count(), 6);
    }
}
