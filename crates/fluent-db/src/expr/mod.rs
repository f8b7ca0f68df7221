//! Expression types for building conditions and load paths.
//!
//! This module contains the building blocks of query filters and includes.

pub mod column;
pub mod nav;
pub mod ops;

pub use column::Col;
pub use nav::{Hop, Nav};
pub use ops::{BinaryOp, Condition, LikeAnchor, LogicalOp, Predicate};
