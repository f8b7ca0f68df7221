//! Condition operators.
//!
//! A [`Predicate`] is the untyped expression tree (`col = ?`, `col LIKE ?`,
//! `a AND b`, ...). It renders to a SQL fragment with bound parameters and
//! evaluates against an [`Entity`] row. [`Condition`] ties a predicate to the
//! entity type it was built from so filters cannot be applied to the wrong query.

use std::{cmp::Ordering, fmt, marker::PhantomData};

use crate::{traits::Entity, value::Value};

/// Binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl BinaryOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Gte => ">=",
            BinaryOp::Lte => "<=",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            BinaryOp::Eq => ordering == Ordering::Equal,
            BinaryOp::Ne => ordering != Ordering::Equal,
            BinaryOp::Gt => ordering == Ordering::Greater,
            BinaryOp::Lt => ordering == Ordering::Less,
            BinaryOp::Gte => ordering != Ordering::Less,
            BinaryOp::Lte => ordering != Ordering::Greater,
        }
    }
}

/// `AND` / `OR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// Where a literal `LIKE` pattern has to occur in the column text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAnchor {
    /// Anywhere in the text.
    Contains,
    /// At the end of the text.
    Suffix,
}

impl LikeAnchor {
    fn wrap(&self, escaped: &str) -> String {
        match self {
            LikeAnchor::Contains => format!("%{escaped}%"),
            LikeAnchor::Suffix => format!("%{escaped}"),
        }
    }

    fn found(&self, text: &str, pattern: &str) -> bool {
        match self {
            LikeAnchor::Contains => text.contains(pattern),
            LikeAnchor::Suffix => text.ends_with(pattern),
        }
    }
}

/// Escapes `LIKE` wildcards so the pattern matches literally under `ESCAPE '\'`.
fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// An untyped condition expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Binary {
        column: &'static str,
        op: BinaryOp,
        value: Value,
    },
    /// Literal text match; `%` and `_` in `pattern` are not wildcards.
    Like {
        column: &'static str,
        pattern: String,
        anchor: LikeAnchor,
        case_insensitive: bool,
    },
    In {
        column: &'static str,
        values: Vec<Value>,
        negated: bool,
    },
    Null {
        column: &'static str,
        is_null: bool,
    },
    Logical {
        left: Box<Predicate>,
        right: Box<Predicate>,
        op: LogicalOp,
    },
    Not(Box<Predicate>),
}

impl Predicate {
    /// Converts this predicate into a SQL fragment, appending bound parameters.
    ///
    /// Placeholders are `?`, in the same order as the pushed parameters.
    pub fn to_sql(&self, params: &mut Vec<Value>) -> String {
        match self {
            Predicate::Binary { column, op, value } => {
                params.push(value.clone());
                format!("{} {} ?", column, op.as_sql())
            }
            Predicate::Like {
                column,
                pattern,
                anchor,
                case_insensitive,
            } => {
                params.push(anchor.wrap(&escape_like(pattern)).into());
                if *case_insensitive {
                    format!("LOWER({}) LIKE LOWER(?) ESCAPE '\\'", column)
                } else {
                    format!("{} LIKE ? ESCAPE '\\'", column)
                }
            }
            Predicate::In {
                column,
                values,
                negated,
            } => {
                let placeholders = vec!["?"; values.len()].join(", ");
                params.extend(values.iter().cloned());
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{} {} ({})", column, op, placeholders)
            }
            Predicate::Null { column, is_null } => {
                let op = if *is_null { "IS NULL" } else { "IS NOT NULL" };
                format!("{} {}", column, op)
            }
            Predicate::Logical { left, right, op } => {
                let left_sql = left.to_sql(params);
                let right_sql = right.to_sql(params);
                format!("({} {} {})", left_sql, op.as_sql(), right_sql)
            }
            Predicate::Not(inner) => format!("NOT ({})", inner.to_sql(params)),
        }
    }

    /// Evaluates this predicate against a row.
    pub fn evaluate<E: Entity>(&self, row: &E) -> bool {
        match self {
            Predicate::Binary { column, op, value } => row
                .value(column)
                .compare(value)
                .is_some_and(|ordering| op.accepts(ordering)),
            Predicate::Like {
                column,
                pattern,
                anchor,
                case_insensitive,
            } => {
                let cell = row.value(column);
                let Some(text) = cell.as_text() else {
                    return false;
                };
                if *case_insensitive {
                    anchor.found(&text.to_lowercase(), &pattern.to_lowercase())
                } else {
                    anchor.found(text, pattern)
                }
            }
            Predicate::In {
                column,
                values,
                negated,
            } => {
                let cell = row.value(column);
                if cell.is_null() {
                    return false;
                }
                let found = values
                    .iter()
                    .any(|v| cell.compare(v) == Some(Ordering::Equal));
                found != *negated
            }
            Predicate::Null { column, is_null } => row.value(column).is_null() == *is_null,
            Predicate::Logical { left, right, op } => match op {
                LogicalOp::And => left.evaluate(row) && right.evaluate(row),
                LogicalOp::Or => left.evaluate(row) || right.evaluate(row),
            },
            Predicate::Not(inner) => !inner.evaluate(row),
        }
    }
}

/// A predicate over entity `E`.
///
/// Built from [`crate::expr::Col`] methods and combined with [`Condition::and`],
/// [`Condition::or`] and [`Condition::not`].
pub struct Condition<E> {
    predicate: Predicate,
    _entity: PhantomData<fn(&E)>,
}

impl<E> Condition<E> {
    pub(crate) fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            _entity: PhantomData,
        }
    }

    /// Combines two conditions with `AND`.
    pub fn and(self, other: Condition<E>) -> Self {
        Self::new(Predicate::Logical {
            left: Box::new(self.predicate),
            right: Box::new(other.predicate),
            op: LogicalOp::And,
        })
    }

    /// Combines two conditions with `OR`.
    pub fn or(self, other: Condition<E>) -> Self {
        Self::new(Predicate::Logical {
            left: Box::new(self.predicate),
            right: Box::new(other.predicate),
            op: LogicalOp::Or,
        })
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::new(Predicate::Not(Box::new(self.predicate)))
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn into_predicate(self) -> Predicate {
        self.predicate
    }

    pub fn to_sql(&self, params: &mut Vec<Value>) -> String {
        self.predicate.to_sql(params)
    }
}

impl<E: Entity> Condition<E> {
    pub fn matches(&self, row: &E) -> bool {
        self.predicate.evaluate(row)
    }
}

impl<E> Clone for Condition<E> {
    fn clone(&self) -> Self {
        Self::new(self.predicate.clone())
    }
}

impl<E> PartialEq for Condition<E> {
    fn eq(&self, other: &Self) -> bool {
        self.predicate == other.predicate
    }
}

impl<E> fmt::Debug for Condition<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Condition").field(&self.predicate).finish()
    }
}
