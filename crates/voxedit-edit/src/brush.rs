use voxedit_blocks::{Orientation, TypeId, Voxel};

/// One edit request for a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOp {
    Place(Voxel),
    Erase,
}

/// Current placement selection: voxel type, orientation and erase mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Brush {
    type_id: TypeId,
    orientation: Orientation,
    erase: bool,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Brush {
    pub fn new(type_id: TypeId) -> Self {
        Self {
            type_id,
            orientation: Orientation::IDENTITY,
            erase: false,
        }
    }

    /// Picks a type and leaves erase mode.
    pub fn select(&mut self, type_id: TypeId) {
        self.type_id = type_id;
        self.erase = false;
    }

    pub fn rotate_cw(&mut self) {
        self.orientation = self.orientation.rotated_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.orientation = self.orientation.rotated_ccw();
    }

    pub fn toggle_flip(&mut self) {
        self.orientation = self.orientation.flipped();
    }

    pub fn toggle_erase(&mut self) {
        self.erase = !self.erase;
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn is_erasing(&self) -> bool {
        self.erase
    }

    /// Edit this brush applies. Selecting the empty type also erases.
    pub fn op(&self) -> EditOp {
        if self.erase || self.type_id == 0 {
            EditOp::Erase
        } else {
            EditOp::Place(Voxel::new(self.type_id, self.orientation))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_and_flip_reach_the_voxel() {
        let mut b = Brush::new(4);
        b.rotate_ccw();
        b.toggle_flip();
        assert_eq!(b.op(), EditOp::Place(Voxel::new(4, Orientation::new(1, true))));
        b.rotate_cw();
        b.rotate_cw();
        assert_eq!(b.orientation(), Orientation::new(3, true));
    }

    #[test]
    fn erase_mode_and_select() {
        let mut b = Brush::default();
        b.toggle_erase();
        assert_eq!(b.op(), EditOp::Erase);
        b.select(2);
        assert!(!b.is_erasing());
        assert_eq!(b.op(), EditOp::Place(Voxel::new(2, Orientation::IDENTITY)));
        b.select(0);
        assert_eq!(b.op(), EditOp::Erase);
    }
}
