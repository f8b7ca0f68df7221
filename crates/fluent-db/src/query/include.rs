//! Eager-load chains and the typed include/then-include API.

use std::{fmt, marker::PhantomData};

use crate::{
    expr::{Condition, Hop, Nav},
    query::builder::Query,
    traits::Entity,
};

/// One eager-load path: a first hop from the query root followed by zero or
/// more continuation hops.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadChain {
    hops: Vec<Hop>,
}

impl LoadChain {
    pub(crate) fn new(first: Hop) -> Self {
        Self { hops: vec![first] }
    }

    pub(crate) fn push(&mut self, hop: Hop) {
        self.hops.push(hop);
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn depth(&self) -> usize {
        self.hops.len()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.hops.iter().map(|h| h.name).collect()
    }
}

impl fmt::Display for LoadChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join("."))
    }
}

/// A query whose most recent load path ends at `P` and may be continued.
///
/// Produced by [`Query::include`]; [`Includable::then_include`] extends the
/// same path while [`Includable::include`] starts a sibling path from the root.
pub struct Includable<E, P> {
    query: Query<E>,
    _previous: PhantomData<fn() -> P>,
}

impl<E, P> Includable<E, P> {
    pub(crate) fn new(query: Query<E>) -> Self {
        Self {
            query,
            _previous: PhantomData,
        }
    }

    pub fn query(&self) -> &Query<E> {
        &self.query
    }

    pub fn into_query(self) -> Query<E> {
        self.query
    }
}

impl<E: Entity, P: Entity> Includable<E, P> {
    /// Extends the current load path by one hop from `P`.
    pub fn then_include<T: Entity>(mut self, nav: Nav<P, T>) -> Includable<E, T> {
        self.query.push_hop(nav.hop());
        Includable::new(self.query)
    }

    /// Starts a new, independent load path from the query root.
    pub fn include<T: Entity>(self, nav: Nav<E, T>) -> Includable<E, T> {
        self.query.include(nav)
    }

    /// Narrows the query, closing the open load path.
    pub fn filter(self, condition: Condition<E>) -> Query<E> {
        self.query.filter(condition)
    }
}

impl<E, P> From<Includable<E, P>> for Query<E> {
    fn from(includable: Includable<E, P>) -> Self {
        includable.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{authors, books, Book};

    #[test]
    fn test_sibling_includes_start_new_chains() {
        let query: Query<Book> = Query::new()
            .include(books::AUTHOR)
            .include(books::REVIEWS)
            .into();

        let chains = query.loads();
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].names(), vec!["Author"]);
        assert_eq!(chains[1].names(), vec!["Reviews"]);
    }

    #[test]
    fn test_then_include_extends_chain() {
        let query = Query::<Book>::new()
            .include(books::AUTHOR)
            .then_include(authors::PUBLISHER)
            .into_query();

        assert_eq!(query.loads().len(), 1);
        assert_eq!(query.loads()[0].depth(), 2);
        assert_eq!(query.loads()[0].to_string(), "Author.Publisher");
        assert_eq!(
            query.open_target().map(|t| t.name()),
            Some("Publisher")
        );
    }

    #[test]
    fn test_collection_hops_are_flagged() {
        let query = Query::<Book>::new().include(books::REVIEWS).into_query();

        assert!(query.loads()[0].hops()[0].collection);
    }
}
