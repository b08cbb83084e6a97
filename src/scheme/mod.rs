//! Element schemes: the per-class contract for navigating and extracting
//! boundaries of tree-element records.
//!
//! The contract is split in two layers:
//!
//! - [`TreeElement`] is implemented by every record type and carries the
//!   unchecked arithmetic of its family (parent, child, linear id, faces).
//! - [`ElementScheme`] is implemented by the scheme objects. Its provided
//!   methods validate every precondition, returning [`SchemeError`] instead of
//!   producing garbage, and then defer to the record's [`TreeElement`] impl.
//!   Each scheme also owns the [`ElementPool`] its records are allocated from.
//!
//! [`Scheme`] is the closed set of schemes selected by [`ElementClass`].

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use itertools::Itertools;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::config::SchemeConfig;
use crate::debug_invariants::DebugInvariants;
use crate::eclass::ElementClass;
use crate::pool::{ElementPool, ElementRun};
use crate::scheme_error::SchemeError;

mod hex;
mod line;
mod quad;
mod tet;
mod tri;
mod vertex;

pub use hex::HexScheme;
pub use line::LineScheme;
pub use quad::QuadScheme;
pub use tet::TetScheme;
pub use tri::TriScheme;
pub use vertex::VertexScheme;

/// Record type of the boundary class of scheme `S`.
pub type FaceOf<S> = <<S as ElementScheme>::Element as TreeElement>::Face;

/// Family arithmetic of one record type.
///
/// Methods assume valid inputs: levels within `0..=MAXLEVEL`, child and
/// face indices in range, records satisfying their invariants. Use the
/// checked [`ElementScheme`] methods from outside the crate.
pub trait TreeElement:
    Copy + Default + PartialEq + fmt::Debug + DebugInvariants + Send + Sync + 'static
{
    /// Record type of the boundary class.
    type Face: TreeElement;

    const CLASS: ElementClass;
    const MAXLEVEL: u8;

    fn level(&self) -> u8;
    fn parent(&self) -> Self;
    fn child(&self, child_id: usize) -> Self;
    fn child_id(&self) -> usize;
    /// Ancestor at `level <= self.level()`.
    fn ancestor(&self, level: u8) -> Self;
    /// Index in traversal order of this element projected to `level`.
    ///
    /// For `level > self.level()` this is the id of the first descendant.
    fn linear_id(&self, level: u8) -> u64;
    fn from_linear_id(level: u8, id: u64) -> Self;
    fn first_descendant(&self, level: u8) -> Self;
    fn last_descendant(&self, level: u8) -> Self;
    fn nearest_common_ancestor(&self, other: &Self) -> Self;
    fn anchor(&self) -> [i32; 3];
    fn vertex(&self, vertex: usize) -> [i32; 3];
    /// Root face that local face `face` lies on, if any.
    fn root_face(&self, face: usize) -> Option<usize>;
    /// Boundary record on local face `face`, which lies on `root_face`.
    fn face_element(&self, face: usize, root_face: usize) -> Self::Face;
    /// Element of this class at the face's level whose face on `root_face` is `face`.
    fn extrude(face: &Self::Face, root_face: usize) -> Self;

    /// Copies diagnostic metadata that is not part of the address.
    fn carry_metadata(&mut self, _from: &Self) {}

    /// Checks that two records may be combined (e.g. share an embedding).
    fn check_compatible(&self, _other: &Self) -> Result<(), SchemeError> {
        Ok(())
    }
}

#[inline]
fn num_children<E: TreeElement>() -> usize {
    1 << E::CLASS.dimension()
}

/// Number of elements at `level`: `2^(dim * level)`.
#[inline]
fn count_at<E: TreeElement>(level: u8) -> u64 {
    1u64 << (u32::from(E::CLASS.dimension()) * u32::from(level))
}

#[inline]
fn assert_valid<E: TreeElement>(e: &E) {
    crate::debug_invariants!(e.validate_invariants(), "element scheme input");
}

fn check_level<E: TreeElement>(level: u8) -> Result<(), SchemeError> {
    if level > E::MAXLEVEL {
        return Err(SchemeError::LevelOutOfRange {
            class: E::CLASS,
            level,
            maxlevel: E::MAXLEVEL,
        });
    }
    Ok(())
}

fn check_child_index<E: TreeElement>(index: usize) -> Result<(), SchemeError> {
    let count = num_children::<E>();
    if index >= count {
        return Err(SchemeError::ChildIndexOutOfRange {
            class: E::CLASS,
            index,
            count,
        });
    }
    Ok(())
}

fn check_face<E: TreeElement>(face: usize) -> Result<(), SchemeError> {
    let count = E::CLASS.num_faces();
    if face >= count {
        return Err(SchemeError::FaceOutOfRange {
            class: E::CLASS,
            face,
            count,
        });
    }
    Ok(())
}

fn check_refinable<E: TreeElement>(e: &E) -> Result<(), SchemeError> {
    if e.level() >= E::MAXLEVEL {
        return Err(SchemeError::LevelOutOfRange {
            class: E::CLASS,
            level: e.level().saturating_add(1),
            maxlevel: E::MAXLEVEL,
        });
    }
    Ok(())
}

fn compare_elements<E: TreeElement>(e1: &E, e2: &E) -> Ordering {
    let level = e1.level().max(e2.level());
    e1.linear_id(level).cmp(&e2.linear_id(level))
}

/// The element-scheme contract shared by every element class.
///
/// Single records are returned by value; `children` and `boundary` fill a
/// caller-provided slice whose length must match exactly.
pub trait ElementScheme {
    type Element: TreeElement;

    fn pool(&self) -> &ElementPool<Self::Element>;
    fn pool_mut(&mut self) -> &mut ElementPool<Self::Element>;

    fn eclass(&self) -> ElementClass {
        Self::Element::CLASS
    }

    /// Byte size of one record.
    fn element_size(&self) -> usize {
        mem::size_of::<Self::Element>()
    }

    fn maxlevel(&self) -> u8 {
        Self::Element::MAXLEVEL
    }

    /// Length of the root cell at finest resolution.
    fn root_len(&self) -> i32 {
        1 << Self::Element::MAXLEVEL
    }

    fn level(&self, e: &Self::Element) -> u8 {
        e.level()
    }

    /// Copies every field, diagnostic metadata included.
    fn copy(&self, src: &Self::Element, dst: &mut Self::Element) {
        *dst = *src;
    }

    /// Orders two elements by their linear ids at the finer of their levels.
    ///
    /// `Equal` does not imply identity: an element compares equal to its
    /// first descendant.
    fn compare(&self, e1: &Self::Element, e2: &Self::Element) -> Ordering {
        assert_valid(e1);
        assert_valid(e2);
        compare_elements(e1, e2)
    }

    fn parent(&self, e: &Self::Element) -> Result<Self::Element, SchemeError> {
        assert_valid(e);
        if e.level() == 0 {
            return Err(SchemeError::RootHasNoParent(self.eclass()));
        }
        Ok(e.parent())
    }

    /// The `sibling_id`-th child of `e`'s parent.
    fn sibling(&self, e: &Self::Element, sibling_id: usize) -> Result<Self::Element, SchemeError> {
        assert_valid(e);
        check_child_index::<Self::Element>(sibling_id)?;
        if e.level() == 0 {
            return Err(SchemeError::RootHasNoParent(self.eclass()));
        }
        Ok(e.parent().child(sibling_id))
    }

    fn num_children(&self, _e: &Self::Element) -> usize {
        num_children::<Self::Element>()
    }

    /// Number of children touching face `face`.
    fn num_face_children(&self, _e: &Self::Element, face: usize) -> Result<usize, SchemeError> {
        check_face::<Self::Element>(face)?;
        Ok(1 << self.eclass().dimension().saturating_sub(1))
    }

    fn child(&self, e: &Self::Element, child_id: usize) -> Result<Self::Element, SchemeError> {
        assert_valid(e);
        check_refinable(e)?;
        check_child_index::<Self::Element>(child_id)?;
        Ok(e.child(child_id))
    }

    /// Writes all children of `e` into `out` in child-index order.
    fn children(&self, e: &Self::Element, out: &mut [Self::Element]) -> Result<(), SchemeError> {
        assert_valid(e);
        check_refinable(e)?;
        let expected = num_children::<Self::Element>();
        if out.len() != expected {
            return Err(SchemeError::LengthMismatch {
                class: self.eclass(),
                expected,
                found: out.len(),
            });
        }
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = e.child(i);
        }
        Ok(())
    }

    fn child_id(&self, e: &Self::Element) -> usize {
        assert_valid(e);
        e.child_id()
    }

    /// Class of the `child_id`-th child. Every implemented class refines into itself.
    fn child_eclass(&self, child_id: usize) -> Result<ElementClass, SchemeError> {
        check_child_index::<Self::Element>(child_id)?;
        Ok(self.eclass())
    }

    /// Whether `family` is exactly the children of one parent, in order.
    fn is_family(&self, family: &[Self::Element]) -> bool {
        let Some(first) = family.first() else {
            return false;
        };
        if family.len() != num_children::<Self::Element>()
            || first.level() == 0
            || !family.iter().map(|c| c.level()).all_equal()
        {
            return false;
        }
        let parent = first.parent();
        family
            .iter()
            .enumerate()
            .all(|(i, c)| *c == parent.child(i))
    }

    /// The element with index `id` at `level`.
    fn set_linear_id(&self, level: u8, id: u64) -> Result<Self::Element, SchemeError> {
        check_level::<Self::Element>(level)?;
        if id >= count_at::<Self::Element>(level) {
            return Err(SchemeError::LinearIdOutOfRange {
                class: self.eclass(),
                level,
                id,
            });
        }
        Ok(Self::Element::from_linear_id(level, id))
    }

    /// Index of `e` projected to `level`.
    fn linear_id(&self, e: &Self::Element, level: u8) -> Result<u64, SchemeError> {
        assert_valid(e);
        check_level::<Self::Element>(level)?;
        Ok(e.linear_id(level))
    }

    /// First descendant of `e` at the maximum level.
    fn first_descendant(&self, e: &Self::Element) -> Self::Element {
        assert_valid(e);
        e.first_descendant(Self::Element::MAXLEVEL)
    }

    /// Last descendant of `e` at the maximum level.
    fn last_descendant(&self, e: &Self::Element) -> Self::Element {
        assert_valid(e);
        e.last_descendant(Self::Element::MAXLEVEL)
    }

    /// The element following `e` in traversal order at `level`.
    fn successor(&self, e: &Self::Element, level: u8) -> Result<Self::Element, SchemeError> {
        assert_valid(e);
        check_level::<Self::Element>(level)?;
        let next = e.linear_id(level) + 1;
        if next >= count_at::<Self::Element>(level) {
            return Err(SchemeError::NoSuccessor {
                class: self.eclass(),
                level,
            });
        }
        let mut succ = Self::Element::from_linear_id(level, next);
        succ.carry_metadata(e);
        Ok(succ)
    }

    /// Deepest element containing both `e1` and `e2`.
    fn nearest_common_ancestor(&self, e1: &Self::Element, e2: &Self::Element) -> Self::Element {
        assert_valid(e1);
        assert_valid(e2);
        crate::debug_invariants!(e1.check_compatible(e2), "nearest common ancestor operands");
        e1.nearest_common_ancestor(e2)
    }

    /// Ancestor of `e` at `level`, which may not exceed `e`'s own level.
    fn ancestor(&self, e: &Self::Element, level: u8) -> Result<Self::Element, SchemeError> {
        assert_valid(e);
        if level > e.level() {
            return Err(SchemeError::LevelOutOfRange {
                class: self.eclass(),
                level,
                maxlevel: e.level(),
            });
        }
        Ok(e.ancestor(level))
    }

    /// Whether `a` contains `d` (or equals it).
    fn is_ancestor(&self, a: &Self::Element, d: &Self::Element) -> bool {
        a.level() <= d.level() && d.ancestor(a.level()) == *a
    }

    fn num_faces(&self, _e: &Self::Element) -> usize {
        self.eclass().num_faces()
    }

    /// Element of this class whose face on root face `root_face` is `face`.
    fn extrude_face(
        &self,
        face: &FaceOf<Self>,
        root_face: usize,
    ) -> Result<Self::Element, SchemeError> {
        assert_valid(face);
        check_face::<Self::Element>(root_face)?;
        check_level::<Self::Element>(face.level())?;
        Ok(Self::Element::extrude(face, root_face))
    }

    /// Root face that local face `face` of `e` lies on.
    fn tree_face(&self, e: &Self::Element, face: usize) -> Result<usize, SchemeError> {
        assert_valid(e);
        check_face::<Self::Element>(face)?;
        e.root_face(face)
            .ok_or(SchemeError::FaceNotOnRootBoundary {
                class: self.eclass(),
                face,
            })
    }

    /// Boundary element on local face `face` of `e`.
    fn boundary_face(&self, e: &Self::Element, face: usize) -> Result<FaceOf<Self>, SchemeError> {
        let root_face = self.tree_face(e, face)?;
        Ok(e.face_element(face, root_face))
    }

    /// Writes every boundary element of dimension `min_dim..dim` into `out`.
    ///
    /// Only codimension-1 extraction is provided, so `min_dim` must be at
    /// least `dim - 1`.
    fn boundary(
        &self,
        e: &Self::Element,
        min_dim: u8,
        out: &mut [FaceOf<Self>],
    ) -> Result<(), SchemeError> {
        let class = self.eclass();
        if min_dim.saturating_add(1) < class.dimension() {
            return Err(SchemeError::UnsupportedBoundaryDimension { class, min_dim });
        }
        let (expected, _) = class.count_boundary(min_dim);
        if out.len() != expected {
            return Err(SchemeError::LengthMismatch {
                class,
                expected,
                found: out.len(),
            });
        }
        for (face, slot) in out.iter_mut().enumerate() {
            *slot = self.boundary_face(e, face)?;
        }
        Ok(())
    }

    /// Lower corner of `e`; unused axes are zero.
    fn anchor(&self, e: &Self::Element) -> [i32; 3] {
        e.anchor()
    }

    /// Coordinates of corner `vertex` of `e`; unused axes are zero.
    fn vertex_coords(&self, e: &Self::Element, vertex: usize) -> Result<[i32; 3], SchemeError> {
        assert_valid(e);
        let count = self.eclass().num_vertices();
        if vertex >= count {
            return Err(SchemeError::VertexOutOfRange {
                class: self.eclass(),
                vertex,
                count,
            });
        }
        Ok(e.vertex(vertex))
    }

    /// Sorts `elements` in traversal order (stable for equal keys).
    fn sort(&self, elements: &mut [Self::Element]) {
        #[cfg(feature = "rayon")]
        elements.par_sort_by(compare_elements);
        #[cfg(not(feature = "rayon"))]
        elements.sort_by(compare_elements);
    }

    /// Allocates `count` contiguous default records from the scheme's pool.
    fn new_elements(&mut self, count: usize) -> Result<ElementRun, SchemeError> {
        self.pool_mut().alloc(count)
    }

    /// Allocates a run holding all children of `e`.
    fn new_children(&mut self, e: &Self::Element) -> Result<ElementRun, SchemeError> {
        assert_valid(e);
        check_refinable(e)?;
        let parent = *e;
        let run = self.new_elements(num_children::<Self::Element>())?;
        for (i, slot) in self.elements_mut(run)?.iter_mut().enumerate() {
            *slot = parent.child(i);
        }
        Ok(run)
    }

    /// Returns a run to the pool.
    fn destroy_elements(&mut self, run: ElementRun) -> Result<(), SchemeError> {
        self.pool_mut().free(run)
    }

    fn elements(&self, run: ElementRun) -> Result<&[Self::Element], SchemeError> {
        self.pool().get(run)
    }

    fn elements_mut(&mut self, run: ElementRun) -> Result<&mut [Self::Element], SchemeError> {
        self.pool_mut().get_mut(run)
    }
}

/// One scheme per implemented element class.
#[derive(Debug, Clone)]
pub enum Scheme {
    Vertex(VertexScheme),
    Line(LineScheme),
    Quad(QuadScheme),
    Triangle(TriScheme),
    Hex(HexScheme),
    Tet(TetScheme),
}

macro_rules! dispatch {
    ($scheme:expr, $s:ident => $body:expr) => {
        match $scheme {
            Scheme::Vertex($s) => $body,
            Scheme::Line($s) => $body,
            Scheme::Quad($s) => $body,
            Scheme::Triangle($s) => $body,
            Scheme::Hex($s) => $body,
            Scheme::Tet($s) => $body,
        }
    };
}

macro_rules! typed_accessors {
    ($($variant:ident, $ty:ty, $get:ident, $get_mut:ident;)*) => {
        $(
            pub fn $get(&self) -> Option<&$ty> {
                match self {
                    Scheme::$variant(s) => Some(s),
                    _ => None,
                }
            }

            pub fn $get_mut(&mut self) -> Option<&mut $ty> {
                match self {
                    Scheme::$variant(s) => Some(s),
                    _ => None,
                }
            }
        )*
    };
}

impl Scheme {
    /// Instantiates the scheme for `class` with its own pool.
    pub fn new(class: ElementClass, config: &SchemeConfig) -> Result<Self, SchemeError> {
        Ok(match class {
            ElementClass::Vertex => Scheme::Vertex(VertexScheme::new(config)),
            ElementClass::Line => Scheme::Line(LineScheme::new(config)),
            ElementClass::Quadrilateral => Scheme::Quad(QuadScheme::new(config)),
            ElementClass::Triangle => Scheme::Triangle(TriScheme::new(config)),
            ElementClass::Hexahedron => Scheme::Hex(HexScheme::new(config)),
            ElementClass::Tetrahedron => Scheme::Tet(TetScheme::new(config)),
            ElementClass::Prism | ElementClass::Pyramid => {
                return Err(SchemeError::UnsupportedClass(class));
            }
        })
    }

    pub fn eclass(&self) -> ElementClass {
        dispatch!(self, s => s.eclass())
    }

    pub fn element_size(&self) -> usize {
        dispatch!(self, s => s.element_size())
    }

    pub fn maxlevel(&self) -> u8 {
        dispatch!(self, s => s.maxlevel())
    }

    pub fn root_len(&self) -> i32 {
        dispatch!(self, s => s.root_len())
    }

    /// Records currently handed out by the scheme's pool.
    pub fn live_records(&self) -> usize {
        dispatch!(self, s => s.pool().live_records())
    }

    typed_accessors! {
        Vertex, VertexScheme, as_vertex, as_vertex_mut;
        Line, LineScheme, as_line, as_line_mut;
        Quad, QuadScheme, as_quad, as_quad_mut;
        Triangle, TriScheme, as_tri, as_tri_mut;
        Hex, HexScheme, as_hex, as_hex_mut;
        Tet, TetScheme, as_tet, as_tet_mut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prism_and_pyramid_have_no_scheme() {
        let cfg = SchemeConfig::default();
        for class in [ElementClass::Prism, ElementClass::Pyramid] {
            assert_eq!(
                Scheme::new(class, &cfg).unwrap_err(),
                SchemeError::UnsupportedClass(class)
            );
        }
    }

    #[test]
    fn enum_reports_class_constants() {
        let cfg = SchemeConfig::default();
        let expected = [
            (ElementClass::Vertex, 30, 1),
            (ElementClass::Line, 30, 8),
            (ElementClass::Quadrilateral, 30, 20),
            (ElementClass::Triangle, 30, 12),
            (ElementClass::Hexahedron, 19, 16),
            (ElementClass::Tetrahedron, 21, 16),
        ];
        for (class, maxlevel, size) in expected {
            let s = Scheme::new(class, &cfg).unwrap();
            assert_eq!(s.eclass(), class);
            assert_eq!(s.maxlevel(), maxlevel);
            assert_eq!(s.root_len(), 1 << maxlevel);
            assert_eq!(s.element_size(), size, "{class}");
        }
    }

    #[test]
    fn typed_access_matches_variant() {
        let mut s = Scheme::new(ElementClass::Tetrahedron, &SchemeConfig::default()).unwrap();
        assert!(s.as_tet().is_some());
        assert!(s.as_quad().is_none());
        let tet = s.as_tet_mut().unwrap();
        let run = tet.new_elements(8).unwrap();
        assert_eq!(s.live_records(), 8);
        s.as_tet_mut().unwrap().destroy_elements(run).unwrap();
        assert_eq!(s.live_records(), 0);
    }
}
