#![cfg_attr(docsrs, feature(doc_cfg))]
//! # tree-scheme
//!
//! tree-scheme provides the element schemes of an adaptive space-tree mesh
//! library: compact, fixed-size addresses for the elements of a recursively
//! refined reference cell, their position along a space-filling curve, and
//! the navigation a forest needs to refine, coarsen and connect them.
//!
//! ## Features
//! - Quadtree and octree elements in Morton order
//! - Triangle and tetrahedron elements with orientation types, refined by
//!   Bey's red refinement and ordered by the tetrahedral Morton index
//! - Parent / child / sibling / ancestor navigation, linear ids, successors,
//!   nearest common ancestors and first/last descendants
//! - Boundary extraction across dimensions (hex → quad, tet → triangle,
//!   quad and triangle → line, line → vertex) and extrusion back
//! - Per-scheme slab pools handing out contiguous runs of records
//! - An explicitly owned [`SchemeRegistry`](registry::SchemeRegistry)
//!
//! Every precondition is checked and reported as a
//! [`SchemeError`](scheme_error::SchemeError). Record invariants are asserted
//! in debug builds, and in release builds with the `check-invariants` feature.
//!
//! ## Usage
//!
//! ```
//! use tree_scheme::prelude::*;
//!
//! let registry = SchemeRegistry::with_classes(
//!     SchemeConfig::default(),
//!     &[ElementClass::Quadrilateral],
//! )?;
//! let quads = registry.quad()?;
//! let root = QuadElement::root();
//! let corner = quads.child(&root, 3)?;
//! assert_eq!((corner.x, corner.y), (1 << 29, 1 << 29));
//! assert_eq!(quads.parent(&corner)?, root);
//! # Ok::<(), SchemeError>(())
//! ```

pub mod bits;
pub mod config;
pub mod debug_invariants;
pub mod eclass;
pub mod element;
pub mod pool;
pub mod registry;
pub mod scheme;
pub mod scheme_error;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::config::SchemeConfig;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::eclass::ElementClass;
    pub use crate::element::{
        HexElement, LineElement, QuadElement, Surround, TetElement, TriElement, VertexElement,
    };
    pub use crate::pool::{ElementPool, ElementRun};
    pub use crate::registry::SchemeRegistry;
    pub use crate::scheme::{
        ElementScheme, FaceOf, HexScheme, LineScheme, QuadScheme, Scheme, TetScheme,
        TreeElement, TriScheme, VertexScheme,
    };
    pub use crate::scheme_error::SchemeError;
}
