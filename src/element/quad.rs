use std::hash::{Hash, Hasher};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::bits::cube::QuadCoord;
use crate::debug_invariants::DebugInvariants;
use crate::eclass::ElementClass;
use crate::scheme_error::SchemeError;

/// Diagnostic record of the higher-dimensional face a quadrant lives on.
///
/// `dim == 3` means the quadrant was extracted from the face of a hexahedron
/// with outward axis `normal` at coordinate `coord`, in quadrant units;
/// `dim == 2` marks a free-standing quadrant. The surround is never part of
/// the address.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct Surround {
    pub dim: i8,
    pub normal: i8,
    #[serde(skip)]
    pad: [u8; 2],
    pub coord: i32,
}

impl Surround {
    /// Nothing recorded (zeroed records).
    pub const UNSET: Surround = Surround {
        dim: 0,
        normal: 0,
        pad: [0; 2],
        coord: 0,
    };
    /// A quadrant of a two-dimensional tree.
    pub const PLANAR: Surround = Surround {
        dim: 2,
        normal: 0,
        pad: [0; 2],
        coord: 0,
    };

    /// A quadrant on the face of a hexahedron with outward axis `normal`.
    pub const fn embedded(normal: i8, coord: i32) -> Self {
        Surround {
            dim: 3,
            normal,
            pad: [0; 2],
            coord,
        }
    }

    /// Whether two surrounds describe the same embedding.
    pub fn matches(&self, other: &Surround) -> bool {
        self.dim == other.dim
            && (self.dim != 3 || (self.normal == other.normal && self.coord == other.coord))
    }
}

/// A quadrant: anchor `(x, y)` at finest resolution, refinement level, and
/// the diagnostic [`Surround`].
///
/// Equality and hashing only look at `(x, y, level)`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, Serialize, Deserialize)]
pub struct QuadElement {
    pub x: i32,
    pub y: i32,
    pub level: u8,
    #[serde(skip)]
    pad: [u8; 3],
    pub surround: Surround,
}

impl QuadElement {
    pub const MAXLEVEL: u8 = 30;
    pub const ROOT_LEN: i32 = 1 << Self::MAXLEVEL;

    pub const fn new(x: i32, y: i32, level: u8) -> Self {
        Self::with_surround(x, y, level, Surround::PLANAR)
    }

    pub const fn with_surround(x: i32, y: i32, level: u8, surround: Surround) -> Self {
        Self {
            x,
            y,
            level,
            pad: [0; 3],
            surround,
        }
    }

    pub const fn root() -> Self {
        Self::new(0, 0, 0)
    }

    pub(crate) fn coord(&self) -> QuadCoord {
        QuadCoord {
            coords: [self.x, self.y],
            level: self.level,
        }
    }

    /// Builds a record from a coordinate, keeping `surround`.
    pub(crate) fn from_coord(c: QuadCoord, surround: Surround) -> Self {
        Self::with_surround(c.coords[0], c.coords[1], c.level, surround)
    }
}

impl Default for QuadElement {
    fn default() -> Self {
        Self::root()
    }
}

impl PartialEq for QuadElement {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.level == other.level
    }
}

impl Eq for QuadElement {}

impl Hash for QuadElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.x, self.y, self.level).hash(state);
    }
}

impl DebugInvariants for QuadElement {
    fn validate_invariants(&self) -> Result<(), SchemeError> {
        super::validate_anchor(
            ElementClass::Quadrilateral,
            &[self.x, self.y],
            self.level,
            Self::MAXLEVEL,
        )
    }
}
