//! Core traits that power the query values.
//!
//! These traits define the contract for:
//! - Describing a queryable entity (`Entity`)
//! - Identifying an entity type at runtime without reflection (`EntityType`)

use std::any::TypeId;

use crate::value::Value;

/// A type that can be the subject of a [`crate::Query`].
///
/// Usually implemented through [`crate::define_entity!`], which also declares
/// the typed columns and navigations of the entity.
///
/// # Example
///
/// ```rust
/// use fluent_db::{Entity, Value};
///
/// struct User {
///     id: i64,
/// }
///
/// impl Entity for User {
///     const TABLE: &'static str = "users";
///     const NAME: &'static str = "User";
///
///     fn value(&self, column: &str) -> Value {
///         match column {
///             "id" => self.id.into(),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait Entity: 'static {
    /// Backing table name.
    const TABLE: &'static str;

    /// Entity name as it appears in load paths and diagnostics.
    const NAME: &'static str;

    /// Reads a column of this row. Unknown columns read as `Null`.
    fn value(&self, column: &str) -> Value;

    fn entity_type() -> EntityType
    where
        Self: Sized,
    {
        EntityType::of::<Self>()
    }
}

/// Runtime identity of an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityType {
    id: TypeId,
    name: &'static str,
}

impl EntityType {
    pub fn of<E: Entity>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: E::NAME,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
