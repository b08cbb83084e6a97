//! Hexahedron scheme: octree refinement in Morton order.
//!
//! Faces `2k` and `2k + 1` are the low and high sides along axis `k`. A face
//! quadrant keeps the two remaining axes in order and is tagged with the
//! embedding it was cut from.

use crate::bits::cube::HexCoord;
use crate::config::SchemeConfig;
use crate::eclass::ElementClass;
use crate::element::{HexElement, QuadElement, Surround};
use crate::pool::ElementPool;

use super::{ElementScheme, TreeElement};

/// Resolution gap between the quadrant and octant trees.
const FACE_SHIFT: u8 = QuadElement::MAXLEVEL - HexElement::MAXLEVEL;

/// The two in-face axes of a face with normal axis `axis`.
const fn face_axes(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

impl TreeElement for HexElement {
    type Face = QuadElement;

    const CLASS: ElementClass = ElementClass::Hexahedron;
    const MAXLEVEL: u8 = HexElement::MAXLEVEL;

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
        Self::from_coord(HexCoord::from_linear_id(level, id))
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
        [self.x, self.y, self.z]
    }

    fn vertex(&self, vertex: usize) -> [i32; 3] {
        self.coord().vertex(vertex)
    }

    fn root_face(&self, face: usize) -> Option<usize> {
        Some(face)
    }

    fn face_element(&self, face: usize, _root_face: usize) -> QuadElement {
        let c = self.coord();
        let axis = face / 2;
        let (a, b) = face_axes(axis);
        let plane = (c.coords[axis] + if face % 2 == 1 { c.len() } else { 0 }) << FACE_SHIFT;
        QuadElement::with_surround(
            c.coords[a] << FACE_SHIFT,
            c.coords[b] << FACE_SHIFT,
            self.level,
            Surround::embedded(axis as i8, plane),
        )
    }

    fn extrude(face: &QuadElement, root_face: usize) -> Self {
        let axis = root_face / 2;
        let (a, b) = face_axes(axis);
        let mut coords = [0i32; 3];
        coords[a] = face.x >> FACE_SHIFT;
        coords[b] = face.y >> FACE_SHIFT;
        if root_face % 2 == 1 {
            coords[axis] = Self::ROOT_LEN - HexCoord::len_at(face.level);
        }
        Self::from_coord(HexCoord {
            coords,
            level: face.level,
        })
    }
}

/// Element scheme for hexahedra.
#[derive(Debug, Clone)]
pub struct HexScheme {
    pool: ElementPool<HexElement>,
}

impl HexScheme {
    pub fn new(config: &SchemeConfig) -> Self {
        Self {
            pool: ElementPool::new(ElementClass::Hexahedron, config),
        }
    }
}

impl Default for HexScheme {
    fn default() -> Self {
        Self::new(&SchemeConfig::default())
    }
}

impl ElementScheme for HexScheme {
    type Element = HexElement;

    fn pool(&self) -> &ElementPool<HexElement> {
        &self.pool
    }

    fn pool_mut(&mut self) -> &mut ElementPool<HexElement> {
        &mut self.pool
    }
}
