//! Coordinate primitives: per-family integer bit arithmetic.
//!
//! These functions are the low-level layer under the element schemes. They
//! assume valid inputs (checked only by `debug_assert!`); the schemes in
//! [`crate::scheme`] validate levels and indices before calling in.

pub mod cube;
pub mod morton;
pub mod tet;
pub mod tri;
