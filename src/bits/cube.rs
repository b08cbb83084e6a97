//! Anchor arithmetic for the tensor-product families (line, quadrilateral,
//! hexahedron).
//!
//! A [`CubeCoord`] is the address part of a cube-family record: the lower
//! corner at finest resolution plus the refinement level. All operations are
//! unchecked; callers validate levels and indices first.

use super::morton;

/// Anchor and level of a `D`-dimensional cube cell in a tree of depth `MAXLEVEL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeCoord<const D: usize, const MAXLEVEL: u8> {
    pub coords: [i32; D],
    pub level: u8,
}

/// Line segments (dim 1).
pub type LineCoord = CubeCoord<1, 30>;
/// Quadrants (dim 2).
pub type QuadCoord = CubeCoord<2, 30>;
/// Octants (dim 3).
pub type HexCoord = CubeCoord<3, 19>;

impl<const D: usize, const MAXLEVEL: u8> CubeCoord<D, MAXLEVEL> {
    /// Number of children of every cell.
    pub const CHILDREN: usize = 1 << D;
    /// Length of the root cell at finest resolution.
    pub const ROOT_LEN: i32 = 1 << MAXLEVEL;

    /// The level-0 cell.
    pub const fn root() -> Self {
        Self {
            coords: [0; D],
            level: 0,
        }
    }

    /// Edge length of a cell at `level`.
    #[inline]
    pub const fn len_at(level: u8) -> i32 {
        1 << (MAXLEVEL - level)
    }

    /// Edge length of this cell.
    #[inline]
    pub const fn len(&self) -> i32 {
        Self::len_at(self.level)
    }

    /// Position among the siblings, read from the anchor bit at this level.
    pub fn child_id(&self) -> usize {
        if self.level == 0 {
            return 0;
        }
        let h = self.len();
        (0..D)
            .filter(|&axis| self.coords[axis] & h != 0)
            .fold(0, |id, axis| id | (1 << axis))
    }

    pub fn parent(&self) -> Self {
        debug_assert!(self.level > 0);
        let h = self.len();
        Self {
            coords: self.coords.map(|c| c & !h),
            level: self.level - 1,
        }
    }

    pub fn child(&self, child_id: usize) -> Self {
        debug_assert!(self.level < MAXLEVEL && child_id < Self::CHILDREN);
        let shift = Self::len_at(self.level + 1);
        let mut coords = self.coords;
        for (axis, c) in coords.iter_mut().enumerate() {
            if child_id >> axis & 1 != 0 {
                *c |= shift;
            }
        }
        Self {
            coords,
            level: self.level + 1,
        }
    }

    /// The ancestor at `level <= self.level`.
    pub fn ancestor(&self, level: u8) -> Self {
        debug_assert!(level <= self.level);
        let mask = !(Self::len_at(level) - 1);
        Self {
            coords: self.coords.map(|c| c & mask),
            level,
        }
    }

    /// Morton index of this cell projected to `level`.
    pub fn linear_id(&self, level: u8) -> u64 {
        let shift = MAXLEVEL - level;
        morton::encode(self.coords.map(|c| (c >> shift) as u32), level)
    }

    pub fn from_linear_id(level: u8, id: u64) -> Self {
        let shift = MAXLEVEL - level;
        Self {
            coords: morton::decode::<D>(id, level).map(|c| (c as i32) << shift),
            level,
        }
    }

    pub fn first_descendant(&self, level: u8) -> Self {
        debug_assert!(level >= self.level);
        Self {
            coords: self.coords,
            level,
        }
    }

    pub fn last_descendant(&self, level: u8) -> Self {
        debug_assert!(level >= self.level);
        let shift = self.len() - Self::len_at(level);
        Self {
            coords: self.coords.map(|c| c + shift),
            level,
        }
    }

    /// Deepest cell containing both `self` and `other`.
    pub fn nearest_common_ancestor(&self, other: &Self) -> Self {
        let exclor = (0..D).fold(0u32, |acc, axis| {
            acc | (self.coords[axis] ^ other.coords[axis]) as u32
        });
        let differing_bits = (u32::BITS - exclor.leading_zeros()) as u8;
        let level = MAXLEVEL
            .saturating_sub(differing_bits)
            .min(self.level)
            .min(other.level);
        self.ancestor(level)
    }

    /// Corner `vertex` of the cell; bit `k` of `vertex` selects the upper side on axis `k`.
    pub fn vertex(&self, vertex: usize) -> [i32; D] {
        let h = self.len();
        let mut coords = self.coords;
        for (axis, c) in coords.iter_mut().enumerate() {
            if vertex >> axis & 1 != 0 {
                *c += h;
            }
        }
        coords
    }

    /// Whether the anchor is aligned to the level and inside the root cell.
    pub fn is_valid(&self) -> bool {
        self.level <= MAXLEVEL
            && self
                .coords
                .iter()
                .all(|&c| (0..Self::ROOT_LEN).contains(&c) && c & (self.len() - 1) == 0)
    }
}
