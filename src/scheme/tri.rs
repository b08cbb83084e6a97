//! Triangle scheme: red refinement of the two triangle types of a square cell.

use crate::bits::tri;
use crate::config::SchemeConfig;
use crate::eclass::ElementClass;
use crate::element::{LineElement, TriElement};
use crate::pool::ElementPool;

use super::{ElementScheme, TreeElement};

impl TreeElement for TriElement {
    type Face = LineElement;

    const CLASS: ElementClass = ElementClass::Triangle;
    const MAXLEVEL: u8 = TriElement::MAXLEVEL;

    fn level(&self) -> u8 {
        self.level
    }

    fn parent(&self) -> Self {
        tri::parent(self)
    }

    fn child(&self, child_id: usize) -> Self {
        tri::child(self, child_id)
    }

    fn child_id(&self) -> usize {
        tri::child_id(self)
    }

    fn ancestor(&self, level: u8) -> Self {
        tri::ancestor(self, level)
    }

    fn linear_id(&self, level: u8) -> u64 {
        tri::linear_id(self, level)
    }

    fn from_linear_id(level: u8, id: u64) -> Self {
        tri::from_linear_id(level, id)
    }

    fn first_descendant(&self, level: u8) -> Self {
        tri::first_descendant(self, level)
    }

    fn last_descendant(&self, level: u8) -> Self {
        tri::last_descendant(self, level)
    }

    fn nearest_common_ancestor(&self, other: &Self) -> Self {
        tri::nearest_common_ancestor(self, other)
    }

    fn anchor(&self) -> [i32; 3] {
        [self.x, self.y, 0]
    }

    fn vertex(&self, vertex: usize) -> [i32; 3] {
        let [x, y] = tri::vertex(self, vertex);
        [x, y, 0]
    }

    fn root_face(&self, face: usize) -> Option<usize> {
        tri::root_face(self, face)
    }

    fn face_element(&self, face: usize, root_face: usize) -> LineElement {
        tri::boundary_face(self, face, root_face)
    }

    fn extrude(face: &LineElement, root_face: usize) -> Self {
        tri::extrude(face, root_face)
    }
}

/// Element scheme for triangles.
#[derive(Debug, Clone)]
pub struct TriScheme {
    pool: ElementPool<TriElement>,
}

impl TriScheme {
    pub fn new(config: &SchemeConfig) -> Self {
        Self {
            pool: ElementPool::new(ElementClass::Triangle, config),
        }
    }
}

impl Default for TriScheme {
    fn default() -> Self {
        Self::new(&SchemeConfig::default())
    }
}

impl ElementScheme for TriScheme {
    type Element = TriElement;

    fn pool(&self) -> &ElementPool<TriElement> {
        &self.pool
    }

    fn pool_mut(&mut self) -> &mut ElementPool<TriElement> {
        &mut self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme_error::SchemeError;

    const HALF: i32 = TriElement::ROOT_LEN / 2;

    #[test]
    fn middle_child_is_flipped() {
        let s = TriScheme::default();
        let c = s.child(&TriElement::root(), 2).unwrap();
        assert_eq!(c, TriElement::new(HALF, 0, 1, 1));
        assert_eq!(
            s.vertex_coords(&c, 1).unwrap(),
            [HALF, HALF, 0],
            "type 1 steps along y first"
        );
        assert!(matches!(
            s.tree_face(&c, 0),
            Err(SchemeError::FaceNotOnRootBoundary { face: 0, .. })
        ));
    }

    #[test]
    fn root_boundary_is_three_lines() {
        let s = TriScheme::default();
        let mut out = [LineElement::default(); 3];
        s.boundary(&TriElement::root(), 1, &mut out).unwrap();
        assert_eq!(out, [LineElement::new(0, 0); 3]);
    }

    #[test]
    fn lines_extrude_to_type_zero() {
        let s = TriScheme::default();
        let line = LineElement::new(HALF, 1);
        assert_eq!(s.extrude_face(&line, 0).unwrap(), TriElement::new(HALF, HALF, 1, 0));
        assert_eq!(s.extrude_face(&line, 1).unwrap(), TriElement::new(HALF, HALF, 1, 0));
        assert_eq!(s.extrude_face(&line, 2).unwrap(), TriElement::new(HALF, 0, 1, 0));
    }
}
