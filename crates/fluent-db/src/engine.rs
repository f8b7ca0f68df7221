//! The query engine capability.
//!
//! These four operations are the whole surface a fluent repository needs from
//! a data-access layer. Any backend that can start a query, narrow it and
//! record attach/continue eager loads can sit behind the builders.

use crate::{
    error::Result,
    expr::{Condition, Hop},
    query::Query,
    traits::Entity,
};

/// A data-access backend that composes [`Query`] values.
///
/// Every operation is pure: it takes the current query by reference and
/// returns the next one, leaving the input untouched.
pub trait QueryEngine: Send + Sync + 'static {
    /// An unfiltered query over every instance of `E`.
    fn source<E: Entity>(&self) -> Query<E>;

    /// Narrows a query with one more condition.
    fn filter<E: Entity>(&self, query: &Query<E>, condition: Condition<E>) -> Query<E>;

    /// Begins a new eager-load path at a navigation of the root entity `R`.
    ///
    /// # Errors
    ///
    /// Fails if `hop` does not start at `R`.
    fn attach_load<R: Entity>(&self, query: &Query<R>, hop: Hop) -> Result<Query<R>>;

    /// Extends the most recently attached load path by one hop.
    ///
    /// # Errors
    ///
    /// Fails if no load path is open or the open path does not end where `hop`
    /// starts.
    fn continue_load<R: Entity>(&self, query: &Query<R>, hop: Hop) -> Result<Query<R>>;
}
