//! In-memory query engine.
//!
//! Keeps one row set per entity type and materializes queries by applying
//! their filters. Eager-load chains are validated while composing but relation
//! population is left to real storage backends.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::RwLock,
};

use tracing::{debug, trace};

use crate::{
    engine::QueryEngine,
    error::{DbError, Result},
    expr::{Condition, Hop},
    query::Query,
    traits::Entity,
};

type RowSet = Box<dyn Any + Send + Sync>;

/// A [`QueryEngine`] backed by in-memory row sets.
///
/// # Example
///
/// ```ignore
/// let engine = MemoryEngine::new();
/// engine.insert(vec![order_a, order_b])?;
///
/// let query = engine.filter(&engine.source::<Order>(), orders::STATUS.eq(OrderStatus::Submitted));
/// let submitted = engine.fetch(&query)?;
/// ```
#[derive(Default)]
pub struct MemoryEngine {
    tables: RwLock<HashMap<TypeId, RowSet>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends rows for entity `E`, returning the new row count.
    pub fn insert<E, I>(&self, rows: I) -> Result<usize>
    where
        E: Entity + Send + Sync,
        I: IntoIterator<Item = E>,
    {
        let mut tables = self.tables.write().map_err(|_| DbError::Poisoned)?;
        let table = tables
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<E>::new()));
        let table = table
            .downcast_mut::<Vec<E>>()
            .ok_or(DbError::UnknownEntity(E::NAME))?;

        let before = table.len();
        table.extend(rows);
        debug!(
            entity = E::NAME,
            inserted = table.len() - before,
            "inserted rows"
        );
        Ok(table.len())
    }

    /// Materializes a query, cloning every matching row.
    pub fn fetch<E: Entity + Clone>(&self, query: &Query<E>) -> Result<Vec<E>> {
        self.with_rows(|rows: &Vec<E>| {
            rows.iter()
                .filter(|row| query.matches(row))
                .cloned()
                .collect()
        })
    }

    /// Counts the rows a query would return.
    pub fn count<E: Entity>(&self, query: &Query<E>) -> Result<usize> {
        self.with_rows(|rows: &Vec<E>| rows.iter().filter(|row| query.matches(row)).count())
    }

    fn with_rows<E: Entity, T>(&self, f: impl FnOnce(&Vec<E>) -> T) -> Result<T> {
        let tables = self.tables.read().map_err(|_| DbError::Poisoned)?;
        let rows = tables
            .get(&TypeId::of::<E>())
            .and_then(|table| table.downcast_ref::<Vec<E>>())
            .ok_or(DbError::UnknownEntity(E::NAME))?;
        Ok(f(rows))
    }
}

impl QueryEngine for MemoryEngine {
    fn source<E: Entity>(&self) -> Query<E> {
        Query::new()
    }

    fn filter<E: Entity>(&self, query: &Query<E>, condition: Condition<E>) -> Query<E> {
        trace!(entity = E::NAME, condition = ?condition.predicate(), "narrowing query");
        query.clone().filter(condition)
    }

    fn attach_load<R: Entity>(&self, query: &Query<R>, hop: Hop) -> Result<Query<R>> {
        trace!(root = R::NAME, navigation = hop.name, "attaching load path");
        query.attach(hop)
    }

    fn continue_load<R: Entity>(&self, query: &Query<R>, hop: Hop) -> Result<Query<R>> {
        trace!(root = R::NAME, navigation = hop.name, "continuing load path");
        query.extend(hop)
    }
}
