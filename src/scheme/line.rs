//! Line scheme: binary refinement of the unit segment.
//!
//! Face 0 is the vertex at `x`, face 1 the vertex at `x + len`.

use crate::bits::cube::LineCoord;
use crate::config::SchemeConfig;
use crate::eclass::ElementClass;
use crate::element::{LineElement, VertexElement};
use crate::pool::ElementPool;

use super::{ElementScheme, TreeElement};

impl TreeElement for LineElement {
    type Face = VertexElement;

    const CLASS: ElementClass = ElementClass::Line;
    const MAXLEVEL: u8 = LineElement::MAXLEVEL;

    fn level(&self) -> u8 {
        self.level
    }

    fn parent(&self) -> Self {
        Self::from_coord(self.coord().parent())
    }

    fn child(&self, child_id: usize) -> Self {
        Self::from_coord(self.coord().child(child_id))
    }

    fn child_id(&self) -> usize {
        self.coord().child_id()
    }

    fn ancestor(&self, level: u8) -> Self {
        Self::from_coord(self.coord().ancestor(level))
    }

    fn linear_id(&self, level: u8) -> u64 {
        self.coord().linear_id(level)
    }

    fn from_linear_id(level: u8, id: u64) -> Self {
        Self::from_coord(LineCoord::from_linear_id(level, id))
    }

    fn first_descendant(&self, level: u8) -> Self {
        Self::from_coord(self.coord().first_descendant(level))
    }

    fn last_descendant(&self, level: u8) -> Self {
        Self::from_coord(self.coord().last_descendant(level))
    }

    fn nearest_common_ancestor(&self, other: &Self) -> Self {
        Self::from_coord(self.coord().nearest_common_ancestor(&other.coord()))
    }

    fn anchor(&self) -> [i32; 3] {
        [self.x, 0, 0]
    }

    fn vertex(&self, vertex: usize) -> [i32; 3] {
        let [x] = self.coord().vertex(vertex);
        [x, 0, 0]
    }

    fn root_face(&self, face: usize) -> Option<usize> {
        Some(face)
    }

    fn face_element(&self, _face: usize, _root_face: usize) -> VertexElement {
        VertexElement::new(self.level)
    }

    fn extrude(face: &VertexElement, root_face: usize) -> Self {
        let x = if root_face == 0 {
            0
        } else {
            Self::ROOT_LEN - LineCoord::len_at(face.level)
        };
        Self::new(x, face.level)
    }
}

/// Element scheme for line segments.
#[derive(Debug, Clone)]
pub struct LineScheme {
    pool: ElementPool<LineElement>,
}

impl LineScheme {
    pub fn new(config: &SchemeConfig) -> Self {
        Self {
            pool: ElementPool::new(ElementClass::Line, config),
        }
    }
}

impl Default for LineScheme {
    fn default() -> Self {
        Self::new(&SchemeConfig::default())
    }
}

impl ElementScheme for LineScheme {
    type Element = LineElement;

    fn pool(&self) -> &ElementPool<LineElement> {
        &self.pool
    }

    fn pool_mut(&mut self) -> &mut ElementPool<LineElement> {
        &mut self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme_error::SchemeError;

    #[test]
    fn boundary_is_two_vertices_of_same_level() {
        let s = LineScheme::default();
        let e = s.set_linear_id(3, 5).unwrap();
        let mut out = [VertexElement::default(); 2];
        s.boundary(&e, 0, &mut out).unwrap();
        assert_eq!(out, [VertexElement::new(3); 2]);
        let mut short = [VertexElement::default(); 1];
        assert!(matches!(
            s.boundary(&e, 0, &mut short),
            Err(SchemeError::LengthMismatch { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn vertices_extrude_to_the_ends() {
        let s = LineScheme::default();
        let v = VertexElement::new(2);
        assert_eq!(s.extrude_face(&v, 0).unwrap(), LineElement::new(0, 2));
        assert_eq!(
            s.extrude_face(&v, 1).unwrap(),
            LineElement::new(3 << 28, 2)
        );
    }

    #[test]
    fn vertex_coords_span_the_segment() {
        let s = LineScheme::default();
        let e = LineElement::new(1 << 29, 1);
        assert_eq!(s.vertex_coords(&e, 0).unwrap(), [1 << 29, 0, 0]);
        assert_eq!(s.vertex_coords(&e, 1).unwrap(), [1 << 30, 0, 0]);
        assert!(s.vertex_coords(&e, 2).is_err());
    }
}
