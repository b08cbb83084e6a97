//! Vertex scheme. A vertex has no extent, so every navigation step only
//! moves the level; it has one child and no faces.

use crate::config::SchemeConfig;
use crate::eclass::ElementClass;
use crate::element::VertexElement;
use crate::pool::ElementPool;

use super::{ElementScheme, TreeElement};

impl TreeElement for VertexElement {
    // Never produced: vertices have no faces.
    type Face = VertexElement;

    const CLASS: ElementClass = ElementClass::Vertex;
    const MAXLEVEL: u8 = VertexElement::MAXLEVEL;

    fn level(&self) -> u8 {
        self.level
    }

    fn parent(&self) -> Self {
        Self::new(self.level - 1)
    }

    fn child(&self, _child_id: usize) -> Self {
        Self::new(self.level + 1)
    }

    fn child_id(&self) -> usize {
        0
    }

    fn ancestor(&self, level: u8) -> Self {
        Self::new(level)
    }

    fn linear_id(&self, _level: u8) -> u64 {
        0
    }

    fn from_linear_id(level: u8, _id: u64) -> Self {
        Self::new(level)
    }

    fn first_descendant(&self, level: u8) -> Self {
        Self::new(level)
    }

    fn last_descendant(&self, level: u8) -> Self {
        Self::new(level)
    }

    fn nearest_common_ancestor(&self, other: &Self) -> Self {
        Self::new(self.level.min(other.level))
    }

    fn anchor(&self) -> [i32; 3] {
        [0; 3]
    }

    fn vertex(&self, _vertex: usize) -> [i32; 3] {
        [0; 3]
    }

    fn root_face(&self, _face: usize) -> Option<usize> {
        None
    }

    fn face_element(&self, _face: usize, _root_face: usize) -> VertexElement {
        *self
    }

    fn extrude(face: &VertexElement, _root_face: usize) -> Self {
        *face
    }
}

/// Element scheme for vertices.
#[derive(Debug, Clone)]
pub struct VertexScheme {
    pool: ElementPool<VertexElement>,
}

impl VertexScheme {
    pub fn new(config: &SchemeConfig) -> Self {
        Self {
            pool: ElementPool::new(ElementClass::Vertex, config),
        }
    }
}

impl Default for VertexScheme {
    fn default() -> Self {
        Self::new(&SchemeConfig::default())
    }
}

impl ElementScheme for VertexScheme {
    type Element = VertexElement;

    fn pool(&self) -> &ElementPool<VertexElement> {
        &self.pool
    }

    fn pool_mut(&mut self) -> &mut ElementPool<VertexElement> {
        &mut self.pool
    }
}
