use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::bits::cube::HexCoord;
use crate::debug_invariants::DebugInvariants;
use crate::eclass::ElementClass;
use crate::scheme_error::SchemeError;

/// An octant: anchor `(x, y, z)` and level.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct HexElement {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub level: u8,
    #[serde(skip)]
    pad: [u8; 3],
}

impl HexElement {
    pub const MAXLEVEL: u8 = 19;
    pub const ROOT_LEN: i32 = 1 << Self::MAXLEVEL;

    pub const fn new(x: i32, y: i32, z: i32, level: u8) -> Self {
        Self {
            x,
            y,
            z,
            level,
            pad: [0; 3],
        }
    }

    pub(crate) fn coord(&self) -> HexCoord {
        HexCoord {
            coords: [self.x, self.y, self.z],
            level: self.level,
        }
    }

    pub(crate) fn from_coord(c: HexCoord) -> Self {
        let [x, y, z] = c.coords;
        Self::new(x, y, z, c.level)
    }
}

impl DebugInvariants for HexElement {
    fn validate_invariants(&self) -> Result<(), SchemeError> {
        super::validate_anchor(
            ElementClass::Hexahedron,
            &[self.x, self.y, self.z],
            self.level,
            Self::MAXLEVEL,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(HexElement, [u32; 4]);

    #[test]
    fn bincode_roundtrip() {
        let h = HexElement::new(1 << 18, 0, 1 << 18, 1);
        let bytes = bincode::serialize(&h).unwrap();
        let back: HexElement = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, h);
    }
}
