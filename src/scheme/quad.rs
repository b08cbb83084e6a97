//! Quadrilateral scheme: quadtree refinement in Morton order.
//!
//! Faces: 0 is the `x = 0` side, 1 the `x = L` side, 2 the `y = 0` side and
//! 3 the `y = L` side of the element. Every face is its own tree face.

use crate::bits::cube::QuadCoord;
use crate::config::SchemeConfig;
use crate::eclass::ElementClass;
use crate::element::{LineElement, QuadElement, Surround};
use crate::pool::ElementPool;
use crate::scheme_error::SchemeError;

use super::{ElementScheme, TreeElement};

impl TreeElement for QuadElement {
    type Face = LineElement;

    const CLASS: ElementClass = ElementClass::Quadrilateral;
    const MAXLEVEL: u8 = QuadElement::MAXLEVEL;

    fn level(&self) -> u8 {
        self.level
    }

    fn parent(&self) -> Self {
        Self::from_coord(self.coord().parent(), self.surround)
    }

    fn child(&self, child_id: usize) -> Self {
        Self::from_coord(self.coord().child(child_id), self.surround)
    }

    fn child_id(&self) -> usize {
        self.coord().child_id()
    }

    fn ancestor(&self, level: u8) -> Self {
        Self::from_coord(self.coord().ancestor(level), self.surround)
    }

    fn linear_id(&self, level: u8) -> u64 {
        self.coord().linear_id(level)
    }

    fn from_linear_id(level: u8, id: u64) -> Self {
        Self::from_coord(QuadCoord::from_linear_id(level, id), Surround::PLANAR)
    }

    fn first_descendant(&self, level: u8) -> Self {
        Self::from_coord(self.coord().first_descendant(level), self.surround)
    }

    fn last_descendant(&self, level: u8) -> Self {
        Self::from_coord(self.coord().last_descendant(level), self.surround)
    }

    fn nearest_common_ancestor(&self, other: &Self) -> Self {
        Self::from_coord(
            self.coord().nearest_common_ancestor(&other.coord()),
            self.surround,
        )
    }

    fn anchor(&self) -> [i32; 3] {
        [self.x, self.y, 0]
    }

    fn vertex(&self, vertex: usize) -> [i32; 3] {
        let [x, y] = self.coord().vertex(vertex);
        [x, y, 0]
    }

    fn root_face(&self, face: usize) -> Option<usize> {
        Some(face)
    }

    /// Faces 0 and 1 run along `y`, faces 2 and 3 along `x`.
    fn face_element(&self, face: usize, _root_face: usize) -> LineElement {
        let x = if face >> 1 != 0 { self.x } else { self.y };
        LineElement::new(x, self.level)
    }

    fn extrude(face: &LineElement, root_face: usize) -> Self {
        let far = Self::ROOT_LEN - QuadCoord::len_at(face.level);
        let (x, y) = match root_face {
            0 => (0, face.x),
            1 => (far, face.x),
            2 => (face.x, 0),
            _ => (face.x, far),
        };
        Self::new(x, y, face.level)
    }

    fn carry_metadata(&mut self, from: &Self) {
        self.surround = from.surround;
    }

    fn check_compatible(&self, other: &Self) -> Result<(), SchemeError> {
        if self.surround.matches(&other.surround) {
            Ok(())
        } else {
            Err(SchemeError::InvalidElement {
                class: ElementClass::Quadrilateral,
                reason: format!(
                    "surround {:?} does not match {:?}",
                    self.surround, other.surround
                ),
            })
        }
    }
}

/// Element scheme for quadrilaterals.
#[derive(Debug, Clone)]
pub struct QuadScheme {
    pool: ElementPool<QuadElement>,
}

impl QuadScheme {
    pub fn new(config: &SchemeConfig) -> Self {
        Self {
            pool: ElementPool::new(ElementClass::Quadrilateral, config),
        }
    }

    /// Whether `q` and `r` were extracted from the same embedding.
    pub fn surround_matches(&self, q: &QuadElement, r: &QuadElement) -> bool {
        q.surround.matches(&r.surround)
    }
}

impl Default for QuadScheme {
    fn default() -> Self {
        Self::new(&SchemeConfig::default())
    }
}

impl ElementScheme for QuadScheme {
    type Element = QuadElement;

    fn pool(&self) -> &ElementPool<QuadElement> {
        &self.pool
    }

    fn pool_mut(&mut self) -> &mut ElementPool<QuadElement> {
        &mut self.pool
    }
}
