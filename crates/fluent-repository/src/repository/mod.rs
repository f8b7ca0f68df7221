//! Repositories and the per-entity option types they hand out.
//!
//! - [`Repository`] - Generic façade over a query engine
//! - [`OrderRepository`] - Orders with [`OrderFilters`] and [`OrderIncludes`]
//! - [`CustomerRepository`] - Customers with [`CustomerFilters`] and [`CustomerIncludes`]
//! - [`AddressIncludes`] - Includes reachable from an address

mod address;
mod customer;
mod order;

use std::{fmt, marker::PhantomData, sync::Arc};

pub use address::AddressIncludes;
pub use customer::{CustomerFilters, CustomerIncludes, CustomerRepository};
use fluent_db::Entity;
pub use order::{OrderFilters, OrderIncludes, OrderRepository};
use tracing::debug;

use crate::{filter::FilterBuilder, options::FilterOptions};

/// Hands out fresh filter builders over one query engine.
///
/// `F` picks the filter surface, and with it the entity and include surface.
/// A repository holds nothing but the engine, so it can be cloned and shared
/// across threads freely; every [`Repository::query`] call starts an
/// independent chain.
pub struct Repository<F: FilterOptions> {
    engine: Arc<F::Engine>,
    _options: PhantomData<fn() -> F>,
}

/// Repository over an entity with only the generic builder surface.
pub type EntityRepository<E, Q> = Repository<FilterBuilder<E, Q>>;

impl<F: FilterOptions> Repository<F> {
    pub fn new(engine: Arc<F::Engine>) -> Self {
        Self {
            engine,
            _options: PhantomData,
        }
    }

    pub fn engine(&self) -> &Arc<F::Engine> {
        &self.engine
    }

    /// A new filter builder over the unfiltered source.
    pub fn query(&self) -> F {
        debug!(entity = <F::Entity as Entity>::NAME, "starting query");
        F::from_builder(FilterBuilder::new(Arc::clone(&self.engine)))
    }
}

impl<F: FilterOptions> Clone for Repository<F> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.engine))
    }
}

impl<F: FilterOptions> fmt::Debug for Repository<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("entity", &<F::Entity as Entity>::NAME)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use fluent_db::MemoryEngine;

    use super::*;
    use crate::{
        models::{customers, Customer},
        options::IncludeOptions,
    };

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_repository_is_shareable() {
        assert_send_sync::<EntityRepository<Customer, MemoryEngine>>();
        assert_send_sync::<OrderRepository<MemoryEngine>>();
    }

    #[test]
    fn test_generic_repository_composes_queries() {
        let repo = EntityRepository::<Customer, MemoryEngine>::new(Arc::new(MemoryEngine::new()));

        let query = repo
            .query()
            .add_filter(customers::EMAIL.like("@example.com"))
            .include()
            .add_include(customers::BILLING_ADDRESS)
            .and_then(IncludeOptions::into_query)
            .unwrap();

        assert_eq!(query.filters().len(), 1);
        assert_eq!(query.load_paths(), vec!["BillingAddress"]);
    }

    #[test]
    fn test_clones_share_engine() {
        let repo = EntityRepository::<Customer, MemoryEngine>::new(Arc::new(MemoryEngine::new()));
        let clone = repo.clone();

        assert!(Arc::ptr_eq(repo.engine(), clone.engine()));
    }
}
