//! Represents a typed entity column.
//!
//! `Col<E, T>` ties a column name to the entity `E` it belongs to and the Rust
//! type `T` it holds. Conditions built from it are `Condition<E>`, so a column
//! of one entity can never filter a query over another.

use std::marker::PhantomData;

use crate::{
    expr::ops::{BinaryOp, Condition, LikeAnchor, Predicate},
    value::Value,
};

/// A typed reference to an entity column.
///
/// The type parameter `T` documents the Rust type stored in the column; values
/// passed to the comparison methods only need to convert into a [`Value`].
///
/// # Example
///
/// ```rust
/// use fluent_db::expr::Col;
///
/// struct User;
/// const NAME: Col<User, String> = Col::new("name");
/// ```
pub struct Col<E, T> {
    pub name: &'static str,
    _type: PhantomData<fn(&E) -> T>,
}

impl<E, T> Col<E, T> {
    /// Creates a new column reference.
    ///
    /// # Parameters
    ///
    /// - `name`: the column name in the backing table (e.g., `"user_name"`)
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    fn binary<V: Into<Value>>(self, op: BinaryOp, value: V) -> Condition<E> {
        Condition::new(Predicate::Binary {
            column: self.name,
            op,
            value: value.into(),
        })
    }

    /// Creates a `=` condition.
    pub fn eq<V: Into<Value>>(self, value: V) -> Condition<E> {
        self.binary(BinaryOp::Eq, value)
    }

    /// Creates a `!=` condition.
    pub fn ne<V: Into<Value>>(self, value: V) -> Condition<E> {
        self.binary(BinaryOp::Ne, value)
    }

    /// Creates a `>` condition.
    pub fn gt<V: Into<Value>>(self, value: V) -> Condition<E> {
        self.binary(BinaryOp::Gt, value)
    }

    /// Creates a `<` condition.
    pub fn lt<V: Into<Value>>(self, value: V) -> Condition<E> {
        self.binary(BinaryOp::Lt, value)
    }

    /// Creates a `>=` condition.
    pub fn gte<V: Into<Value>>(self, value: V) -> Condition<E> {
        self.binary(BinaryOp::Gte, value)
    }

    /// Creates a `<=` condition.
    pub fn lte<V: Into<Value>>(self, value: V) -> Condition<E> {
        self.binary(BinaryOp::Lte, value)
    }

    fn text_match(
        self,
        pattern: String,
        anchor: LikeAnchor,
        case_insensitive: bool,
    ) -> Condition<E> {
        Condition::new(Predicate::Like {
            column: self.name,
            pattern,
            anchor,
            case_insensitive,
        })
    }

    /// Creates a substring `LIKE` condition.
    ///
    /// The pattern is literal text: `%` and `_` are escaped when rendered.
    pub fn like(self, pattern: impl Into<String>) -> Condition<E> {
        self.text_match(pattern.into(), LikeAnchor::Contains, false)
    }

    /// Creates a case-insensitive substring `LIKE` condition.
    pub fn ilike(self, pattern: impl Into<String>) -> Condition<E> {
        self.text_match(pattern.into(), LikeAnchor::Contains, true)
    }

    /// Creates a `LIKE` condition matching text that ends with `suffix`.
    pub fn ends_with(self, suffix: impl Into<String>) -> Condition<E> {
        self.text_match(suffix.into(), LikeAnchor::Suffix, false)
    }

    /// Case-insensitive [`Col::ends_with`].
    pub fn iends_with(self, suffix: impl Into<String>) -> Condition<E> {
        self.text_match(suffix.into(), LikeAnchor::Suffix, true)
    }

    /// Creates an `IN` condition.
    pub fn in_<V, I>(self, values: I) -> Condition<E>
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Condition::new(Predicate::In {
            column: self.name,
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        })
    }

    /// Creates a `NOT IN` condition.
    pub fn not_in<V, I>(self, values: I) -> Condition<E>
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Condition::new(Predicate::In {
            column: self.name,
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        })
    }

    /// Creates an `IS NULL` condition.
    pub fn null(self) -> Condition<E> {
        Condition::new(Predicate::Null {
            column: self.name,
            is_null: true,
        })
    }

    /// Creates an `IS NOT NULL` condition.
    pub fn not_null(self) -> Condition<E> {
        Condition::new(Predicate::Null {
            column: self.name,
            is_null: false,
        })
    }
}

impl<E, T> Clone for Col<E, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, T> Copy for Col<E, T> {}
