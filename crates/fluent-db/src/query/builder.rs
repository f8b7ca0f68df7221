//! The composable query value.

use std::{fmt, marker::PhantomData};

use crate::{
    error::{DbError, Result},
    expr::{Condition, Hop, Nav, Predicate},
    query::include::{Includable, LoadChain},
    traits::{Entity, EntityType},
    value::Value,
};

/// A lazily evaluated query over entity `E`.
///
/// A query accumulates conjunctive filters and eager-load chains; nothing runs
/// until a [`crate::QueryEngine`] materializes it. Every operation returns a
/// new value (or consumes `self`), so a query is never mutated behind a caller's
/// back.
///
/// Two queries are equal when they target the same table with the same filters
/// and the same load chains in the same order.
///
/// # Example
///
/// ```rust
/// use fluent_db::{define_entity, Query};
///
/// #[derive(Debug, Clone)]
/// pub struct User {
///     pub id: i64,
/// }
///
/// #[derive(Debug, Clone)]
/// pub struct Profile {
///     pub id: i64,
/// }
///
/// define_entity!(
///     User => users {
///         table: "users",
///         columns: { ID(id): i64 => "id" },
///         navigations: { PROFILE: Profile => "Profile" }
///     }
/// );
///
/// define_entity!(
///     Profile => profiles {
///         table: "profiles",
///         columns: { ID(id): i64 => "id" },
///         navigations: {}
///     }
/// );
///
/// fn main() {
///     let query = Query::<User>::new()
///         .filter(users::ID.gt(0))
///         .include(users::PROFILE)
///         .into_query();
///
///     assert_eq!(query.load_paths(), vec!["Profile".to_string()]);
/// }
/// ```
pub struct Query<E> {
    table: &'static str,
    filters: Vec<Predicate>,
    loads: Vec<LoadChain>,
    open: Option<EntityType>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Query<E> {
    /// Starts an unfiltered query over every row of `E`.
    pub fn new() -> Self {
        Self {
            table: E::TABLE,
            filters: vec![],
            loads: vec![],
            open: None,
            _entity: PhantomData,
        }
    }

    /// Narrows the query with an additional condition.
    ///
    /// Filtering closes any open load path, so the next continuation must be
    /// preceded by a fresh include.
    pub fn filter(mut self, condition: Condition<E>) -> Self {
        self.filters.push(condition.into_predicate());
        self.open = None;
        self
    }

    /// Starts a new eager-load path at a navigation of `E`.
    pub fn include<T: Entity>(mut self, nav: Nav<E, T>) -> Includable<E, T> {
        self.start_chain(nav.hop());
        Includable::new(self)
    }

    /// Starts a new load path from an erased hop.
    ///
    /// # Errors
    ///
    /// [`DbError::TypeMismatch`] if the hop does not start at `E`.
    pub fn attach(&self, hop: Hop) -> Result<Self> {
        let root = E::entity_type();
        if hop.source != root {
            return Err(DbError::TypeMismatch {
                navigation: hop.name,
                expected: root.name(),
                found: hop.source.name(),
            });
        }

        let mut next = self.clone();
        next.start_chain(hop);
        Ok(next)
    }

    /// Extends the open load path by one hop.
    ///
    /// # Errors
    ///
    /// - [`DbError::InvalidIncludeChain`] if no load path is open.
    /// - [`DbError::TypeMismatch`] if the open path does not end at the hop's source.
    pub fn extend(&self, hop: Hop) -> Result<Self> {
        let Some(open) = self.open else {
            return Err(DbError::InvalidIncludeChain {
                navigation: hop.name,
                reason: "no load path is open",
            });
        };
        if open != hop.source {
            return Err(DbError::TypeMismatch {
                navigation: hop.name,
                expected: open.name(),
                found: hop.source.name(),
            });
        }

        let mut next = self.clone();
        next.push_hop(hop);
        Ok(next)
    }

    /// Checks whether a row satisfies every filter.
    pub fn matches(&self, row: &E) -> bool {
        self.filters.iter().all(|p| p.evaluate(row))
    }
}

impl<E> Query<E> {
    fn start_chain(&mut self, hop: Hop) {
        self.loads.push(LoadChain::new(hop));
        self.open = Some(hop.target);
    }

    pub(crate) fn push_hop(&mut self, hop: Hop) {
        if let Some(chain) = self.loads.last_mut() {
            chain.push(hop);
        }
        self.open = Some(hop.target);
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn filters(&self) -> &[Predicate] {
        &self.filters
    }

    /// Load chains in the order they were attached.
    pub fn loads(&self) -> &[LoadChain] {
        &self.loads
    }

    /// Entity type at the end of the open load path, if any.
    pub fn open_target(&self) -> Option<EntityType> {
        self.open
    }

    /// Distinct navigation paths that will be loaded, in first-seen order.
    ///
    /// Loading `A.B.C` also loads `A` and `A.B`, so every prefix of every
    /// chain is reported once.
    pub fn load_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = vec![];
        for chain in &self.loads {
            let mut prefix = String::new();
            for hop in chain.hops() {
                if !prefix.is_empty() {
                    prefix.push('.');
                }
                prefix.push_str(hop.name);
                if !paths.contains(&prefix) {
                    paths.push(prefix.clone());
                }
            }
        }
        paths
    }

    /// Renders the query text and its bound parameters.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut params = vec![];
        let mut sql = format!("SELECT * FROM {}", self.table);

        if !self.filters.is_empty() {
            sql.push_str(" WHERE ");
            let conditions = self
                .filters
                .iter()
                .map(|p| p.to_sql(&mut params))
                .collect::<Vec<_>>();
            sql.push_str(&conditions.join(" AND "));
        }

        for chain in &self.loads {
            sql.push_str(&format!(" INCLUDE {}", chain));
        }

        (sql, params)
    }
}

impl<E: Entity> Default for Query<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Query<E> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            filters: self.filters.clone(),
            loads: self.loads.clone(),
            open: self.open,
            _entity: PhantomData,
        }
    }
}

impl<E> PartialEq for Query<E> {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.filters == other.filters && self.loads == other.loads
    }
}

impl<E> fmt::Debug for Query<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("table", &self.table)
            .field("filters", &self.filters)
            .field("loads", &self.loads)
            .finish()
    }
}

impl<E> fmt::Display for Query<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sql, params) = self.to_sql();
        write!(f, "{sql}")?;
        if !params.is_empty() {
            let params = params
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " -- params: [{params}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{authors, books, Book};

    #[test]
    fn test_attach_requires_root_source() {
        let query = Query::<Book>::new();

        let result = query.attach(authors::PUBLISHER.hop());
        assert!(matches!(
            result,
            Err(DbError::TypeMismatch {
                navigation: "Publisher",
                expected: "Book",
                found: "Author"
            })
        ));
    }

    #[test]
    fn test_extend_without_open_path() {
        let query = Query::<Book>::new();

        let result = query.extend(authors::PUBLISHER.hop());
        assert!(matches!(
            result,
            Err(DbError::InvalidIncludeChain {
                navigation: "Publisher",
                ..
            })
        ));
    }

    #[test]
    fn test_filter_closes_open_path() {
        let query = Query::<Book>::new()
            .include(books::AUTHOR)
            .filter(books::PAGES.gt(10));

        assert!(query.open_target().is_none());
        assert!(query.extend(authors::PUBLISHER.hop()).is_err());
    }

    #[test]
    fn test_extend_checks_last_hop_target() {
        let query = Query::<Book>::new().include(books::REVIEWS).into_query();

        let result = query.extend(authors::PUBLISHER.hop());
        assert!(matches!(
            result,
            Err(DbError::TypeMismatch {
                expected: "Review",
                found: "Author",
                ..
            })
        ));
    }

    #[test]
    fn test_erased_and_typed_chains_are_equal() {
        let typed = Query::<Book>::new()
            .include(books::AUTHOR)
            .then_include(authors::PUBLISHER)
            .into_query();

        let erased = Query::<Book>::new()
            .attach(books::AUTHOR.hop())
            .and_then(|q| q.extend(authors::PUBLISHER.hop()))
            .unwrap();

        assert_eq!(typed, erased);
    }

    #[test]
    fn test_attach_does_not_modify_source() {
        let query = Query::<Book>::new();
        let attached = query.attach(books::AUTHOR.hop()).unwrap();

        assert!(query.loads().is_empty());
        assert_eq!(attached.loads().len(), 1);
    }

    #[test]
    fn test_load_paths_report_prefixes_once() {
        let query = Query::<Book>::new()
            .include(books::AUTHOR)
            .then_include(authors::PUBLISHER)
            .include(books::AUTHOR)
            .include(books::REVIEWS)
            .into_query();

        assert_eq!(
            query.load_paths(),
            vec!["Author", "Author.Publisher", "Reviews"]
        );
        assert_eq!(query.loads().len(), 3);
    }

    #[test]
    fn test_to_sql_rendering() {
        let query = Query::<Book>::new()
            .filter(books::TITLE.eq("Dune"))
            .filter(books::ISBN.not_null())
            .include(books::AUTHOR)
            .then_include(authors::PUBLISHER)
            .into_query();

        let (sql, params) = query.to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM books WHERE title = ? AND isbn IS NOT NULL INCLUDE Author.Publisher"
        );
        assert_eq!(params, vec![Value::from("Dune")]);
        assert_eq!(
            query.to_string(),
            "SELECT * FROM books WHERE title = ? AND isbn IS NOT NULL INCLUDE Author.Publisher -- params: ['Dune']"
        );
    }

    #[test]
    fn test_matches_is_conjunctive() {
        let query = Query::<Book>::new()
            .filter(books::PAGES.gt(100))
            .filter(books::TITLE.like("Du"));

        assert!(query.matches(&Book::new(1, "Dune", 412, None)));
        assert!(!query.matches(&Book::new(2, "Dubliners", 90, None)));
        assert!(!query.matches(&Book::new(3, "Emma", 474, None)));
    }
}
