//! Dense, self-growing voxel buffer addressed by signed cell coordinates.
#![forbid(unsafe_code)]

use voxedit_blocks::Voxel;

/// Cell storage covering an axis-aligned box of signed coordinates.
///
/// Coordinate `c` lives at backing index `c + origin` on each axis, so the
/// covered range is `-origin ..= size - 1 - origin`. Writes outside that range
/// grow the box just enough to include the cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SparseVolume {
    size: [usize; 3],
    origin: [i32; 3],
    cells: Vec<Voxel>,
}

impl SparseVolume {
    /// Zero-sized volume; the first write anchors it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty `n x n x n` volume centred on the origin cell.
    pub fn with_extent(n: usize) -> Self {
        let o = (n.saturating_sub(1) / 2) as i32;
        Self {
            size: [n; 3],
            origin: [o; 3],
            cells: vec![Voxel::EMPTY; n * n * n],
        }
    }

    /// Wraps decoded cells; `None` if the length does not match `size` or the
    /// covered range does not fit in `i32`.
    pub fn from_raw(size: [usize; 3], origin: [i32; 3], cells: Vec<Voxel>) -> Option<Self> {
        let expect = size[0].checked_mul(size[1])?.checked_mul(size[2])?;
        if cells.len() != expect {
            return None;
        }
        for a in 0..3 {
            origin[a].checked_neg()?;
            let last = i32::try_from(size[a].saturating_sub(1)).ok()?;
            last.checked_sub(origin[a])?;
        }
        Some(Self {
            size,
            origin,
            cells,
        })
    }

    #[inline]
    pub fn size(&self) -> [usize; 3] {
        self.size
    }

    #[inline]
    pub fn origin(&self) -> [i32; 3] {
        self.origin
    }

    /// Inclusive `(min, max)` cell coordinates. `max < min` on a zero-length axis.
    #[inline]
    pub fn bounds(&self) -> ([i32; 3], [i32; 3]) {
        let min = [-self.origin[0], -self.origin[1], -self.origin[2]];
        let max = [
            self.size[0] as i32 - 1 - self.origin[0],
            self.size[1] as i32 - 1 - self.origin[1],
            self.size[2] as i32 - 1 - self.origin[2],
        ];
        (min, max)
    }

    /// Backing cells in z-major, then y, then x order.
    #[inline]
    pub fn cells(&self) -> &[Voxel] {
        &self.cells
    }

    #[inline]
    fn local(&self, x: i32, y: i32, z: i32) -> Option<[usize; 3]> {
        let mut out = [0usize; 3];
        for (a, c) in [x, y, z].into_iter().enumerate() {
            let l = c as i64 + self.origin[a] as i64;
            if l < 0 || l >= self.size[a] as i64 {
                return None;
            }
            out[a] = l as usize;
        }
        Some(out)
    }

    #[inline]
    fn idx(&self, l: [usize; 3]) -> usize {
        (l[2] * self.size[1] + l[1]) * self.size[0] + l[0]
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.local(x, y, z).is_some()
    }

    /// Voxel at a cell; empty outside the covered box.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Voxel {
        match self.local(x, y, z) {
            Some(l) => self.cells[self.idx(l)],
            None => Voxel::EMPTY,
        }
    }

    /// Stores `v`, growing the box first if the cell is outside it.
    pub fn set(&mut self, x: i32, y: i32, z: i32, v: Voxel) {
        if !self.contains(x, y, z) {
            self.grow_to_include([x, y, z]);
        }
        if let Some(l) = self.local(x, y, z) {
            let i = self.idx(l);
            self.cells[i] = v;
        }
    }

    fn grow_to_include(&mut self, c: [i32; 3]) {
        let (min, max) = self.bounds();
        let mut size = self.size;
        let mut origin = self.origin;
        for a in 0..3 {
            if self.size[a] == 0 {
                size[a] = 1;
                origin[a] = -c[a];
            } else if c[a] < min[a] {
                let delta = (min[a] - c[a]) as usize;
                size[a] += delta;
                origin[a] += delta as i32;
            } else if c[a] > max[a] {
                size[a] += (c[a] - max[a]) as usize;
            }
        }
        log::trace!(
            "volume grow {:?} -> {:?} (origin {:?} -> {:?})",
            self.size,
            size,
            self.origin,
            origin
        );

        let mut cells = vec![Voxel::EMPTY; size[0] * size[1] * size[2]];
        // A zero-length axis means there is nothing to carry over.
        if !self.cells.is_empty() {
            let shift = [
                (origin[0] - self.origin[0]) as usize,
                (origin[1] - self.origin[1]) as usize,
                (origin[2] - self.origin[2]) as usize,
            ];
            for z in 0..self.size[2] {
                for y in 0..self.size[1] {
                    let src = (z * self.size[1] + y) * self.size[0];
                    let dst = ((z + shift[2]) * size[1] + (y + shift[1])) * size[0] + shift[0];
                    cells[dst..dst + self.size[0]]
                        .copy_from_slice(&self.cells[src..src + self.size[0]]);
                }
            }
        }
        self.size = size;
        self.origin = origin;
        self.cells = cells;
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|v| !v.is_empty()).count()
    }

    /// True when no cell holds a voxel (including a zero-sized volume).
    pub fn is_empty_region(&self) -> bool {
        self.cells.iter().all(|v| v.is_empty())
    }

    /// Non-empty cells with their coordinates, in z, y, x order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = ([i32; 3], Voxel)> + '_ {
        let [sx, sy, _] = self.size;
        let origin = self.origin;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_empty())
            .map(move |(i, v)| {
                let x = (i % sx) as i32 - origin[0];
                let y = ((i / sx) % sy) as i32 - origin[1];
                let z = (i / (sx * sy)) as i32 - origin[2];
                ([x, y, z], *v)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxedit_blocks::Orientation;

    fn stone() -> Voxel {
        Voxel::new(1, Orientation::IDENTITY)
    }

    #[test]
    fn from_raw_rejects_unrepresentable_ranges() {
        let one = vec![stone()];
        assert!(SparseVolume::from_raw([1, 1, 1], [i32::MIN, 0, 0], one.clone()).is_none());
        assert!(SparseVolume::from_raw([2, 1, 1], [-i32::MAX, 0, 0], vec![stone(); 2]).is_none());
        let edge = SparseVolume::from_raw([1, 1, 1], [-i32::MAX, 0, 0], one).unwrap();
        assert_eq!(edge.bounds(), ([i32::MAX, 0, 0], [i32::MAX, 0, 0]));
        assert_eq!(edge.get(i32::MAX, 0, 0), stone());
    }

    #[test]
    fn seeded_extent_is_centred() {
        let v = SparseVolume::with_extent(7);
        assert_eq!(v.size(), [7, 7, 7]);
        assert_eq!(v.origin(), [3, 3, 3]);
        assert_eq!(v.bounds(), ([-3, -3, -3], [3, 3, 3]));
        assert!(v.is_empty_region());
    }

    #[test]
    fn first_write_anchors_zero_sized_volume() {
        let mut v = SparseVolume::new();
        assert_eq!(v.get(0, 0, 0), Voxel::EMPTY);
        v.set(5, -2, 9, stone());
        assert_eq!(v.size(), [1, 1, 1]);
        assert_eq!(v.bounds(), ([5, -2, 9], [5, -2, 9]));
        assert_eq!(v.get(5, -2, 9), stone());
    }

    #[test]
    fn growth_is_directional_and_minimal() {
        let mut v = SparseVolume::with_extent(3);
        v.set(0, 0, 0, stone());
        v.set(2, 0, 0, stone());
        assert_eq!(v.size(), [4, 3, 3]);
        assert_eq!(v.origin(), [1, 1, 1]);
        v.set(0, -4, 0, stone());
        assert_eq!(v.size(), [4, 6, 3]);
        assert_eq!(v.origin(), [1, 4, 1]);
        assert_eq!(v.get(0, 0, 0), stone());
        assert_eq!(v.get(2, 0, 0), stone());
        assert_eq!(v.occupied_count(), 3);
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(SparseVolume::from_raw([2, 2, 2], [0; 3], vec![Voxel::EMPTY; 8]).is_some());
        assert!(SparseVolume::from_raw([2, 2, 2], [0; 3], vec![Voxel::EMPTY; 7]).is_none());
        assert!(SparseVolume::from_raw([usize::MAX, 2, 2], [0; 3], Vec::new()).is_none());
    }
}
