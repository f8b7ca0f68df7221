//! Fluent filter and eager-load composition for repositories.
//!
//! A [`Repository`] hands out filter builders; a filter builder hands off to
//! an include builder; the include builder produces a [`fluent_db::Query`]
//! identical to one chained by hand with `include`/`then_include`.
//!
//! Includes can delegate to a sub-builder rooted at the related entity. Each
//! include requested inside that sub-builder loads the full path from the
//! root entity, so per-entity include sets compose without knowing where
//! they are used.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fluent_repository::{
//!     fluent_db::MemoryEngine, models::OrderStatus, FilterOptions, IncludeOptions,
//!     OrderRepository,
//! };
//!
//! let orders = OrderRepository::new(Arc::new(MemoryEngine::new()));
//!
//! let query = orders
//!     .query()
//!     .with_status(OrderStatus::Submitted)
//!     .include()
//!     .delivery_address()?
//!     .customer_with_addresses()?
//!     .into_query()?;
//!
//! assert_eq!(query.loads().len(), 3);
//! # Ok::<(), fluent_repository::RepositoryError>(())
//! ```

pub mod error;
pub mod filter;
pub mod handle;
pub mod include;
pub mod macros;
pub mod models;
pub mod options;
pub mod repository;

pub use error::{RepositoryError, Result};
pub use filter::FilterBuilder;
pub use fluent_db;
pub use handle::QueryHandle;
pub use include::{ChainPosition, IncludeBuilder, IncludeNode, LoadStep};
pub use options::{FilterOptions, IncludeFn, IncludeOptions};
pub use repository::{
    AddressIncludes, CustomerFilters, CustomerIncludes, CustomerRepository, EntityRepository,
    OrderFilters, OrderIncludes, OrderRepository, Repository,
};
