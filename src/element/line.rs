use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::bits::cube::LineCoord;
use crate::debug_invariants::DebugInvariants;
use crate::eclass::ElementClass;
use crate::scheme_error::SchemeError;

/// A line segment `[x, x + len(level))` of the unit tree.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct LineElement {
    pub x: i32,
    pub level: u8,
    #[serde(skip)]
    pad: [u8; 3],
}

impl LineElement {
    pub const MAXLEVEL: u8 = 30;
    pub const ROOT_LEN: i32 = 1 << Self::MAXLEVEL;

    pub const fn new(x: i32, level: u8) -> Self {
        Self {
            x,
            level,
            pad: [0; 3],
        }
    }

    pub(crate) fn coord(&self) -> LineCoord {
        LineCoord {
            coords: [self.x],
            level: self.level,
        }
    }

    pub(crate) fn from_coord(c: LineCoord) -> Self {
        Self::new(c.coords[0], c.level)
    }
}

impl DebugInvariants for LineElement {
    fn validate_invariants(&self) -> Result<(), SchemeError> {
        super::validate_anchor(ElementClass::Line, &[self.x], self.level, Self::MAXLEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(LineElement, u64);

    #[test]
    fn misaligned_anchor_is_rejected() {
        assert!(LineElement::new(1 << 29, 1).validate_invariants().is_ok());
        assert!(LineElement::new(1 << 28, 1).validate_invariants().is_err());
        assert!(LineElement::new(LineElement::ROOT_LEN, 0).validate_invariants().is_err());
    }
}
