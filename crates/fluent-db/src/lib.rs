//! Composable query values for fluent repositories.
//!
//! A [`Query`] accumulates filters and eager-load chains without executing.
//! Columns ([`expr::Col`]) and navigations ([`expr::Nav`]) are typed by the
//! entity they belong to, so conditions and includes are checked at compile
//! time. [`QueryEngine`] is the capability the fluent builders consume;
//! [`MemoryEngine`] implements it over in-memory row sets.

pub mod engine;
pub mod error;
pub mod expr;
pub mod macros;
pub mod memory;
pub mod query;
pub mod traits;
pub mod value;

pub use engine::QueryEngine;
pub use error::{DbError, Result};
pub use expr::{Col, Condition, Hop, Nav};
pub use memory::MemoryEngine;
pub use query::{Includable, LoadChain, Query};
pub use traits::{Entity, EntityType};
pub use value::Value;

#[cfg(test)]
mod test_fixtures;
