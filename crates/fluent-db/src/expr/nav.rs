//! Typed navigation properties.
//!
//! A `Nav<S, T>` names the relation from entity `S` to entity `T`. It is the
//! accessor handed to the include APIs; once erased into a [`Hop`] it still
//! carries both endpoint types so load paths can be checked hop by hop.

use std::{fmt, marker::PhantomData};

use crate::traits::{Entity, EntityType};

/// A typed reference to a navigation property of `S` yielding `T`.
///
/// # Example
///
/// ```rust
/// use fluent_db::expr::Nav;
///
/// struct Post;
/// struct Comment;
/// const COMMENTS: Nav<Post, Comment> = Nav::many("Comments");
/// ```
pub struct Nav<S, T> {
    pub name: &'static str,
    pub collection: bool,
    _types: PhantomData<fn(&S) -> T>,
}

impl<S, T> Nav<S, T> {
    /// A navigation to a single related entity.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            collection: false,
            _types: PhantomData,
        }
    }

    /// A navigation to a collection of related entities.
    pub const fn many(name: &'static str) -> Self {
        Self {
            name,
            collection: true,
            _types: PhantomData,
        }
    }
}

impl<S: Entity, T: Entity> Nav<S, T> {
    /// Erases the static types into a runtime hop descriptor.
    pub fn hop(&self) -> Hop {
        Hop {
            name: self.name,
            source: S::entity_type(),
            target: T::entity_type(),
            collection: self.collection,
        }
    }
}

impl<S, T> Clone for Nav<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for Nav<S, T> {}

impl<S, T> fmt::Debug for Nav<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nav")
            .field("name", &self.name)
            .field("collection", &self.collection)
            .finish()
    }
}

/// One relation hop in an eager-load path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hop {
    pub name: &'static str,
    pub source: EntityType,
    pub target: EntityType,
    pub collection: bool,
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
