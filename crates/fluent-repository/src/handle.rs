//! The canonical in-progress query of one include tree.

use std::{cell::RefCell, fmt, rc::Rc};

use fluent_db::Query;
use tracing::trace;

use crate::error::{RepositoryError, Result};

/// Shared, replace-only cell holding the query an include tree is composing.
///
/// Exactly one handle exists per tree: the root builder owns it and every
/// node reaches it through its parent links. The query inside is never
/// mutated in place; each include swaps in the next query value.
pub struct QueryHandle<R> {
    cell: Rc<RefCell<Option<Query<R>>>>,
}

impl<R> QueryHandle<R> {
    pub fn new(query: Query<R>) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Some(query))),
        }
    }

    /// Another reference to the same cell.
    pub(crate) fn share(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }

    /// Whether the handle still holds a query.
    ///
    /// Fails with a contract violation while the handle is being written.
    pub fn is_set(&self) -> Result<bool> {
        let query = self.cell.try_borrow().map_err(|_| busy())?;
        Ok(query.is_some())
    }

    /// A copy of the current query.
    pub fn current(&self) -> Result<Query<R>> {
        let query = self.cell.try_borrow().map_err(|_| busy())?;
        query.as_ref().cloned().ok_or_else(unset)
    }

    /// Computes the next query from the current one and swaps it in.
    ///
    /// The handle is left untouched when `next` fails.
    pub fn replace<F>(&self, next: F) -> Result<()>
    where
        F: FnOnce(&Query<R>) -> Result<Query<R>>,
    {
        let query = {
            let current = self.cell.try_borrow().map_err(|_| busy())?;
            next(current.as_ref().ok_or_else(unset)?)?
        };

        let mut slot = self.cell.try_borrow_mut().map_err(|_| busy())?;
        trace!(loads = query.loads().len(), "query handle replaced");
        *slot = Some(query);
        Ok(())
    }

    /// Takes the query out, leaving the handle unset.
    pub fn release(&self) -> Result<Query<R>> {
        let mut slot = self.cell.try_borrow_mut().map_err(|_| busy())?;
        slot.take().ok_or_else(unset)
    }
}

impl<R> fmt::Debug for QueryHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("QueryHandle");
        match self.cell.try_borrow() {
            Ok(query) => s.field("set", &query.is_some()),
            Err(_) => s.field("set", &format_args!("<busy>")),
        };
        s.field("refs", &Rc::strong_count(&self.cell)).finish()
    }
}

fn unset() -> RepositoryError {
    RepositoryError::ContractViolation("the include tree's query handle is unset")
}

fn busy() -> RepositoryError {
    RepositoryError::ContractViolation("the include tree's query handle is already in use")
}
