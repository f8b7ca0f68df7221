use std::{fmt, sync::Arc};

use fluent_db::{Condition, Entity, Query, QueryEngine};
use tracing::debug;

use crate::{handle::QueryHandle, include::IncludeBuilder};

/// Narrows a query over `E` before its include tree is built.
///
/// Filters compose by conjunction: each one is handed to the engine on top of
/// whatever is already present.
pub struct FilterBuilder<E, Q> {
    query: Query<E>,
    engine: Arc<Q>,
}

impl<E: Entity, Q: QueryEngine> FilterBuilder<E, Q> {
    /// Starts from the engine's unfiltered source of `E`.
    pub fn new(engine: Arc<Q>) -> Self {
        let query = engine.source::<E>();
        Self { query, engine }
    }

    pub fn add_filter(self, condition: Condition<E>) -> Self {
        debug!(
            entity = E::NAME,
            existing = self.query.filters().len(),
            "adding filter"
        );
        let query = self.engine.filter(&self.query, condition);
        Self { query, ..self }
    }

    /// Freezes the filtered query as the seed of a new include tree.
    pub fn include(self) -> IncludeBuilder<E> {
        IncludeBuilder::new(QueryHandle::new(self.query), self.engine)
    }

    pub fn query(&self) -> &Query<E> {
        &self.query
    }

    pub fn into_query(self) -> Query<E> {
        self.query
    }

    pub fn engine(&self) -> &Arc<Q> {
        &self.engine
    }
}

impl<E, Q> fmt::Debug for FilterBuilder<E, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterBuilder")
            .field("query", &self.query)
            .finish()
    }
}
