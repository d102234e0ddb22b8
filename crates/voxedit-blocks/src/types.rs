use serde::{Deserialize, Serialize};

use crate::orient::Orientation;

pub type TypeId = u8;

/// Compact voxel value stored per cell. `type_id == 0` is empty.
///
/// `orientation` keeps the raw persisted byte; only the low three bits are
/// interpreted (see [`Orientation`]).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Voxel {
    pub type_id: TypeId,
    pub orientation: u8,
}

impl Voxel {
    pub const EMPTY: Voxel = Voxel {
        type_id: 0,
        orientation: 0,
    };

    #[inline]
    pub const fn new(type_id: TypeId, orientation: Orientation) -> Self {
        Self {
            type_id,
            orientation: orientation.bits(),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.type_id == 0
    }

    #[inline]
    pub const fn orient(self) -> Orientation {
        Orientation::from_bits(self.orientation)
    }
}
