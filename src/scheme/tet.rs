//! Tetrahedral scheme: Bey's red refinement of the six Kuhn tetrahedra of a
//! cube cell, ordered by the tetrahedral Morton index.
//!
//! Only faces on the boundary of the root tetrahedron have a tree face and a
//! boundary triangle; interior faces report
//! [`SchemeError::FaceNotOnRootBoundary`](crate::scheme_error::SchemeError::FaceNotOnRootBoundary).

use crate::bits::tet;
use crate::config::SchemeConfig;
use crate::eclass::ElementClass;
use crate::element::{TetElement, TriElement};
use crate::pool::ElementPool;

use super::{ElementScheme, TreeElement};

impl TreeElement for TetElement {
    type Face = TriElement;

    const CLASS: ElementClass = ElementClass::Tetrahedron;
    const MAXLEVEL: u8 = TetElement::MAXLEVEL;

    fn level(&self) -> u8 {
        self.level
    }

    fn parent(&self) -> Self {
        tet::parent(self)
    }

    fn child(&self, child_id: usize) -> Self {
        tet::child(self, child_id)
    }

    fn child_id(&self) -> usize {
        tet::child_id(self)
    }

    fn ancestor(&self, level: u8) -> Self {
        tet::ancestor(self, level)
    }

    fn linear_id(&self, level: u8) -> u64 {
        tet::linear_id(self, level)
    }

    fn from_linear_id(level: u8, id: u64) -> Self {
        tet::from_linear_id(level, id)
    }

    fn first_descendant(&self, level: u8) -> Self {
        tet::first_descendant(self, level)
    }

    fn last_descendant(&self, level: u8) -> Self {
        tet::last_descendant(self, level)
    }

    fn nearest_common_ancestor(&self, other: &Self) -> Self {
        tet::nearest_common_ancestor(self, other)
    }

    fn anchor(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    fn vertex(&self, vertex: usize) -> [i32; 3] {
        tet::vertex(self, vertex)
    }

    fn root_face(&self, face: usize) -> Option<usize> {
        tet::root_face(self, face)
    }

    fn face_element(&self, face: usize, root_face: usize) -> TriElement {
        tet::boundary_face(self, face, root_face)
    }

    fn extrude(face: &TriElement, root_face: usize) -> Self {
        tet::extrude(face, root_face)
    }
}

/// Element scheme for tetrahedra.
#[derive(Debug, Clone)]
pub struct TetScheme {
    pool: ElementPool<TetElement>,
}

impl TetScheme {
    pub fn new(config: &SchemeConfig) -> Self {
        Self {
            pool: ElementPool::new(ElementClass::Tetrahedron, config),
        }
    }
}

impl Default for TetScheme {
    fn default() -> Self {
        Self::new(&SchemeConfig::default())
    }
}

impl ElementScheme for TetScheme {
    type Element = TetElement;

    fn pool(&self) -> &ElementPool<TetElement> {
        &self.pool
    }

    fn pool_mut(&mut self) -> &mut ElementPool<TetElement> {
        &mut self.pool
    }
}
