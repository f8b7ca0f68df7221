//! Self-typed builder surfaces.
//!
//! Per-entity option types wrap a generic builder and add named methods on
//! top of it. The traits here supply the generic operations with `Self` as
//! their return type, so a chain that starts on `OrderIncludes` stays on
//! `OrderIncludes`.

use fluent_db::{Condition, Entity, Nav, Query, QueryEngine};

use crate::{error::Result, filter::FilterBuilder, include::IncludeBuilder};

/// Sub-builder callback accepted by delegating include methods.
pub type IncludeFn<O> = Box<dyn FnOnce(O) -> Result<O>>;

/// An include surface over entity [`IncludeOptions::Entity`].
pub trait IncludeOptions: Sized {
    type Entity: Entity;

    fn from_builder(builder: IncludeBuilder<Self::Entity>) -> Self;

    fn builder(&self) -> &IncludeBuilder<Self::Entity>;

    fn into_builder(self) -> IncludeBuilder<Self::Entity>;

    /// See [`IncludeBuilder::add_include`].
    fn add_include<T: Entity>(self, nav: Nav<Self::Entity, T>) -> Result<Self> {
        self.into_builder()
            .add_include(nav)
            .map(Self::from_builder)
    }

    /// See [`IncludeBuilder::add_include_with`].
    fn add_include_with<O, F>(self, nav: Nav<Self::Entity, O::Entity>, extra: Option<F>) -> Result<Self>
    where
        O: IncludeOptions,
        F: FnOnce(O) -> Result<O>,
    {
        self.into_builder()
            .add_include_with::<O, F>(nav, extra)
            .map(Self::from_builder)
    }

    fn query(&self) -> Result<Query<Self::Entity>> {
        self.builder().query()
    }

    fn into_query(self) -> Result<Query<Self::Entity>> {
        self.into_builder().into_query()
    }
}

impl<E: Entity> IncludeOptions for IncludeBuilder<E> {
    type Entity = E;

    fn from_builder(builder: IncludeBuilder<E>) -> Self {
        builder
    }

    fn builder(&self) -> &IncludeBuilder<E> {
        self
    }

    fn into_builder(self) -> IncludeBuilder<E> {
        self
    }
}

/// A filter surface over entity [`FilterOptions::Entity`], handing off to
/// [`FilterOptions::Includes`] once filtering is done.
pub trait FilterOptions: Sized {
    type Entity: Entity;
    type Engine: QueryEngine;
    type Includes: IncludeOptions<Entity = Self::Entity>;

    fn from_builder(builder: FilterBuilder<Self::Entity, Self::Engine>) -> Self;

    fn builder(&self) -> &FilterBuilder<Self::Entity, Self::Engine>;

    fn into_builder(self) -> FilterBuilder<Self::Entity, Self::Engine>;

    /// See [`FilterBuilder::add_filter`].
    fn add_filter(self, condition: Condition<Self::Entity>) -> Self {
        Self::from_builder(self.into_builder().add_filter(condition))
    }

    /// See [`FilterBuilder::include`].
    fn include(self) -> Self::Includes {
        Self::Includes::from_builder(self.into_builder().include())
    }

    fn query(&self) -> &Query<Self::Entity> {
        self.builder().query()
    }

    fn into_query(self) -> Query<Self::Entity> {
        self.into_builder().into_query()
    }
}

impl<E: Entity, Q: QueryEngine> FilterOptions for FilterBuilder<E, Q> {
    type Entity = E;
    type Engine = Q;
    type Includes = IncludeBuilder<E>;

    fn from_builder(builder: FilterBuilder<E, Q>) -> Self {
        builder
    }

    fn builder(&self) -> &FilterBuilder<E, Q> {
        self
    }

    fn into_builder(self) -> FilterBuilder<E, Q> {
        self
    }
}
