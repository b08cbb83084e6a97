//! SchemeError: unified error type for tree-scheme public APIs
//!
//! Every precondition an element scheme relies on (level bounds, child and
//! face indices, linear-id ranges, output buffer lengths) is checked and
//! reported through this type instead of being left undefined.

use crate::eclass::ElementClass;
use thiserror::Error;

/// Unified error type for element-scheme, pool and registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemeError {
    /// A refinement level outside `0..=maxlevel` (or one that cannot be refined further).
    #[error("{class}: level {level} out of range (maxlevel {maxlevel})")]
    LevelOutOfRange {
        class: ElementClass,
        level: u8,
        maxlevel: u8,
    },
    /// A child or sibling index outside `0..num_children`.
    #[error("{class}: child index {index} out of range (num_children {count})")]
    ChildIndexOutOfRange {
        class: ElementClass,
        index: usize,
        count: usize,
    },
    /// A face index outside `0..num_faces`.
    #[error("{class}: face {face} out of range (num_faces {count})")]
    FaceOutOfRange {
        class: ElementClass,
        face: usize,
        count: usize,
    },
    /// A vertex index outside `0..num_vertices`.
    #[error("{class}: vertex {vertex} out of range (num_vertices {count})")]
    VertexOutOfRange {
        class: ElementClass,
        vertex: usize,
        count: usize,
    },
    /// A linear id not below `2^(dim * level)`.
    #[error("{class}: linear id {id} out of range at level {level}")]
    LinearIdOutOfRange {
        class: ElementClass,
        level: u8,
        id: u64,
    },
    /// Parent or sibling requested for a level-0 element.
    #[error("{0}: the root element has no parent")]
    RootHasNoParent(ElementClass),
    /// Successor requested for the last element of a level.
    #[error("{class}: element is the last one at level {level} and has no successor")]
    NoSuccessor { class: ElementClass, level: u8 },
    /// A simplex face that does not lie on the boundary of the root simplex.
    #[error("{class}: face {face} does not lie on the root boundary")]
    FaceNotOnRootBoundary { class: ElementClass, face: usize },
    /// A caller-provided output buffer has the wrong length.
    #[error("{class}: output length mismatch (expected {expected}, found {found})")]
    LengthMismatch {
        class: ElementClass,
        expected: usize,
        found: usize,
    },
    /// Boundary extraction below codimension 1 is not provided.
    #[error("{class}: boundary extraction down to dimension {min_dim} is not supported")]
    UnsupportedBoundaryDimension { class: ElementClass, min_dim: u8 },
    /// The element class has a registry slot but no scheme implementation.
    #[error("{0}: no element scheme is available for this class")]
    UnsupportedClass(ElementClass),
    /// Lookup of a registry slot that was never populated.
    #[error("{0}: no scheme registered for this class")]
    ClassNotRegistered(ElementClass),
    /// A registry slot was populated twice.
    #[error("{0}: a scheme is already registered for this class")]
    ClassAlreadyRegistered(ElementClass),
    /// The slab pool reached its configured capacity.
    #[error("{class}: element pool exhausted ({requested} requested, {live} live, capacity {capacity})")]
    PoolExhausted {
        class: ElementClass,
        requested: usize,
        live: usize,
        capacity: usize,
    },
    /// A run handle that is stale, foreign, or already released.
    #[error("{class}: invalid element run handle (start {start}, len {len})")]
    InvalidHandle {
        class: ElementClass,
        start: u32,
        len: u32,
    },
    /// An element record violates its class invariants.
    #[error("{class}: invalid element: {reason}")]
    InvalidElement { class: ElementClass, reason: String },
}
