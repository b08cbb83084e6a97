//! Element records: the fixed-size, plain-old-data addresses of tree elements.
//!
//! Every record is `#[repr(C)]` with explicit padding so that its byte layout
//! is stable and can be viewed through [`bytemuck`] when records are handed
//! verbatim to a forest or communication layer. Padding is always zero for
//! records built through the constructors.

mod hex;
mod line;
mod quad;
mod tet;
mod tri;
mod vertex;

pub use hex::HexElement;
pub use line::LineElement;
pub use quad::{QuadElement, Surround};
pub use tet::TetElement;
pub use tri::TriElement;
pub use vertex::VertexElement;

use crate::eclass::ElementClass;
use crate::scheme_error::SchemeError;

/// Shared level / anchor alignment check for all record kinds.
pub(crate) fn validate_anchor(
    class: ElementClass,
    coords: &[i32],
    level: u8,
    maxlevel: u8,
) -> Result<(), SchemeError> {
    if level > maxlevel {
        return Err(SchemeError::InvalidElement {
            class,
            reason: format!("level {level} exceeds maxlevel {maxlevel}"),
        });
    }
    let root_len = 1i32 << maxlevel;
    let len = 1i32 << (maxlevel - level);
    for (axis, &c) in coords.iter().enumerate() {
        if !(0..root_len).contains(&c) {
            return Err(SchemeError::InvalidElement {
                class,
                reason: format!("coordinate {c} on axis {axis} outside the root cell"),
            });
        }
        if c & (len - 1) != 0 {
            return Err(SchemeError::InvalidElement {
                class,
                reason: format!("coordinate {c} on axis {axis} not aligned to level {level}"),
            });
        }
    }
    Ok(())
}
