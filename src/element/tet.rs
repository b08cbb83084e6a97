use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::bits::tet;
use crate::debug_invariants::DebugInvariants;
use crate::eclass::ElementClass;
use crate::scheme_error::SchemeError;

/// A tetrahedron of the simplex tree: anchor `(x, y, z)`, level and type.
///
/// The type `b` selects one of the six Kuhn tetrahedra of the cube cell at the
/// anchor: vertex 1 steps along axis `b / 2`, vertex 2 additionally along the
/// axis `(b / 2 + 1 + b % 2) % 3`, vertex 3 is the opposite cube corner.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct TetElement {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub level: u8,
    pub ty: u8,
    #[serde(skip)]
    pad: [u8; 2],
}

impl TetElement {
    pub const MAXLEVEL: u8 = 21;
    pub const ROOT_LEN: i32 = 1 << Self::MAXLEVEL;
    pub const NUM_TYPES: u8 = 6;

    pub const fn new(x: i32, y: i32, z: i32, level: u8, ty: u8) -> Self {
        Self {
            x,
            y,
            z,
            level,
            ty,
            pad: [0; 2],
        }
    }

    /// The root tetrahedron `(0,0,0), (L,0,0), (L,L,0), (L,L,L)`.
    pub const fn root() -> Self {
        Self::new(0, 0, 0, 0, 0)
    }
}

impl DebugInvariants for TetElement {
    fn validate_invariants(&self) -> Result<(), SchemeError> {
        let class = ElementClass::Tetrahedron;
        super::validate_anchor(
            class,
            &[self.x, self.y, self.z],
            self.level,
            Self::MAXLEVEL,
        )?;
        if self.ty >= Self::NUM_TYPES {
            return Err(SchemeError::InvalidElement {
                class,
                reason: format!("type {} out of range", self.ty),
            });
        }
        if !tet::is_inside_root(self) {
            return Err(SchemeError::InvalidElement {
                class,
                reason: "tetrahedron outside the root tetrahedron".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(TetElement, [u32; 4]);

    #[test]
    fn only_type_zero_is_a_root() {
        assert!(TetElement::root().validate_invariants().is_ok());
        for ty in 1..6 {
            assert!(TetElement::new(0, 0, 0, 0, ty).validate_invariants().is_err());
        }
    }

    #[test]
    fn json_roundtrip() {
        let t = TetElement::new(1 << 20, 1 << 20, 0, 1, 4);
        let s = serde_json::to_string(&t).unwrap();
        let back: TetElement = serde_json::from_str(&s).unwrap();
        assert_eq!(back, t);
    }
}
