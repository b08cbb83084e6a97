use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::eclass::ElementClass;
use crate::scheme_error::SchemeError;

/// A point element. It has no extent; only its level is tracked.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct VertexElement {
    pub level: u8,
}

impl VertexElement {
    pub const MAXLEVEL: u8 = 30;

    pub const fn new(level: u8) -> Self {
        Self { level }
    }
}

impl DebugInvariants for VertexElement {
    fn validate_invariants(&self) -> Result<(), SchemeError> {
        super::validate_anchor(ElementClass::Vertex, &[], self.level, Self::MAXLEVEL)
    }
}
