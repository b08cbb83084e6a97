use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::bits::tri;
use crate::debug_invariants::DebugInvariants;
use crate::eclass::ElementClass;
use crate::scheme_error::SchemeError;

/// A triangle of the simplex tree: anchor `(x, y)`, level and type.
///
/// Type 0 spans `a, a + h·e_x, a + h·(1,1)`; type 1 spans
/// `a, a + h·e_y, a + h·(1,1)`.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct TriElement {
    pub x: i32,
    pub y: i32,
    pub level: u8,
    pub ty: u8,
    #[serde(skip)]
    pad: [u8; 2],
}

impl TriElement {
    pub const MAXLEVEL: u8 = 30;
    pub const ROOT_LEN: i32 = 1 << Self::MAXLEVEL;
    pub const NUM_TYPES: u8 = 2;

    pub const fn new(x: i32, y: i32, level: u8, ty: u8) -> Self {
        Self {
            x,
            y,
            level,
            ty,
            pad: [0; 2],
        }
    }

    /// The root triangle `(0,0), (L,0), (L,L)`.
    pub const fn root() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl DebugInvariants for TriElement {
    fn validate_invariants(&self) -> Result<(), SchemeError> {
        let class = ElementClass::Triangle;
        super::validate_anchor(class, &[self.x, self.y], self.level, Self::MAXLEVEL)?;
        if self.ty >= Self::NUM_TYPES {
            return Err(SchemeError::InvalidElement {
                class,
                reason: format!("type {} out of range", self.ty),
            });
        }
        if !tri::is_inside_root(self) {
            return Err(SchemeError::InvalidElement {
                class,
                reason: "triangle outside the root triangle".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(TriElement, [u32; 3]);

    #[test]
    fn upper_half_triangles_are_invalid() {
        let h = 1 << 29;
        assert!(TriElement::new(h, 0, 1, 1).validate_invariants().is_ok());
        assert!(TriElement::new(0, h, 1, 0).validate_invariants().is_err());
        assert!(TriElement::new(0, 0, 1, 1).validate_invariants().is_err());
        assert!(TriElement::new(0, 0, 0, 2).validate_invariants().is_err());
    }
}
