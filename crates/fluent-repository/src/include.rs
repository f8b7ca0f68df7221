//! The include tree.
//!
//! Every [`IncludeBuilder`] owns one [`IncludeNode`]. The root node is created
//! from a filtered query and holds the tree's only [`QueryHandle`]; delegating
//! includes create child nodes that remember their parent and the navigation
//! that led to them.
//!
//! When an include is requested at a node, the node walks its parent links to
//! rebuild the full path from the root entity and classifies each hop:
//!
//! - a hop requested at the root, or the navigation of a node whose parent is
//!   the root, is **root-starting** and attaches a new load path;
//! - every deeper hop is **continuing** and extends the path just attached.
//!
//! The classification depends only on the shape of the tree, so two includes
//! at the root always produce sibling paths, and a sub-builder several levels
//! deep still starts its chain at the root entity.

use std::{fmt, marker::PhantomData, rc::Rc, sync::Arc};

use fluent_db::{Entity, Hop, Nav, Query, QueryEngine};
use tracing::{debug, trace};

use crate::{
    error::{RepositoryError, Result},
    handle::QueryHandle,
    options::IncludeOptions,
};

/// Where a hop sits within its load path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPosition {
    /// Starts a new load path at the root entity.
    RootStarting,
    /// Extends the load path attached just before it.
    Continuing,
}

/// One resolved hop of an include request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStep {
    pub position: ChainPosition,
    pub hop: Hop,
}

/// Applies resolved load steps to the tree's query.
pub(crate) trait LoadTarget {
    fn apply(&self, steps: &[LoadStep]) -> Result<()>;
}

struct HandleTarget<R, Q> {
    handle: QueryHandle<R>,
    engine: Arc<Q>,
}

impl<R: Entity, Q: QueryEngine> LoadTarget for HandleTarget<R, Q> {
    fn apply(&self, steps: &[LoadStep]) -> Result<()> {
        self.handle.replace(|query| {
            let mut next = query.clone();
            for step in steps {
                trace!(navigation = step.hop.name, position = ?step.position, "applying load step");
                next = match step.position {
                    ChainPosition::RootStarting => self.engine.attach_load(&next, step.hop)?,
                    ChainPosition::Continuing => self.engine.continue_load(&next, step.hop)?,
                };
            }
            Ok(next)
        })
    }
}

enum NodeLink {
    Root(Rc<dyn LoadTarget>),
    Child { parent: Rc<IncludeNode>, accessor: Hop },
}

/// A node of the include tree.
pub struct IncludeNode {
    link: NodeLink,
}

impl IncludeNode {
    pub(crate) fn root(target: Rc<dyn LoadTarget>) -> Rc<Self> {
        Rc::new(Self {
            link: NodeLink::Root(target),
        })
    }

    pub(crate) fn child(parent: &Rc<Self>, accessor: Hop) -> Rc<Self> {
        Rc::new(Self {
            link: NodeLink::Child {
                parent: Rc::clone(parent),
                accessor,
            },
        })
    }

    pub fn parent(&self) -> Option<&IncludeNode> {
        match &self.link {
            NodeLink::Root(_) => None,
            NodeLink::Child { parent, .. } => Some(parent),
        }
    }

    /// The navigation that led from the parent to this node.
    pub fn accessor(&self) -> Option<Hop> {
        match &self.link {
            NodeLink::Root(_) => None,
            NodeLink::Child { accessor, .. } => Some(*accessor),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Number of parent links between this node and the root.
    pub fn depth(&self) -> usize {
        self.parent().map_or(0, |parent| parent.depth() + 1)
    }

    /// Chain position of this node's own navigation: root-starting when the
    /// node has no parent or its parent is the root.
    pub fn position(&self) -> ChainPosition {
        match self.parent() {
            Some(parent) if !parent.is_root() => ChainPosition::Continuing,
            _ => ChainPosition::RootStarting,
        }
    }

    /// Position taken by a hop requested at this node.
    fn request_position(&self) -> ChainPosition {
        if self.is_root() {
            ChainPosition::RootStarting
        } else {
            ChainPosition::Continuing
        }
    }

    /// Resolves a hop requested at this node into the steps that load it,
    /// starting from the root entity.
    pub fn resolve(&self, hop: Hop) -> Vec<LoadStep> {
        let mut steps = match &self.link {
            NodeLink::Root(_) => Vec::new(),
            NodeLink::Child { parent, accessor } => parent.resolve(*accessor),
        };
        steps.push(LoadStep {
            position: self.request_position(),
            hop,
        });
        steps
    }

    fn target(&self) -> &dyn LoadTarget {
        match &self.link {
            NodeLink::Root(target) => target.as_ref(),
            NodeLink::Child { parent, .. } => parent.target(),
        }
    }

    pub(crate) fn include(&self, hop: Hop) -> Result<()> {
        let steps = self.resolve(hop);
        debug!(
            navigation = hop.name,
            depth = steps.len(),
            position = ?self.request_position(),
            "including navigation"
        );
        self.target().apply(&steps)
    }
}

impl fmt::Debug for IncludeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncludeNode")
            .field("accessor", &self.accessor().map(|hop| hop.name))
            .field("depth", &self.depth())
            .field("position", &self.position())
            .finish()
    }
}

/// Builds the eager-load part of a query over `E`.
///
/// The builder returned by [`crate::FilterBuilder::include`] is the root of
/// its tree and yields the composed query through [`IncludeBuilder::into_query`].
/// Builders handed to delegating includes are children rooted at the related
/// entity; their includes are spliced into the root's query.
pub struct IncludeBuilder<E> {
    node: Rc<IncludeNode>,
    root: Option<QueryHandle<E>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> IncludeBuilder<E> {
    /// Seeds a new include tree with a (usually filtered) query.
    pub fn new<Q: QueryEngine>(handle: QueryHandle<E>, engine: Arc<Q>) -> Self {
        let target: Rc<dyn LoadTarget> = Rc::new(HandleTarget {
            handle: handle.share(),
            engine,
        });
        Self {
            node: IncludeNode::root(target),
            root: Some(handle),
            _entity: PhantomData,
        }
    }

    fn child(parent: &Rc<IncludeNode>, accessor: Hop) -> Self {
        Self {
            node: IncludeNode::child(parent, accessor),
            root: None,
            _entity: PhantomData,
        }
    }

    pub fn node(&self) -> &IncludeNode {
        &self.node
    }

    pub fn is_root(&self) -> bool {
        self.node.is_root()
    }

    /// Includes a navigation of `E`.
    ///
    /// At the root this attaches a new load path; inside a delegated builder
    /// it continues the path leading to `E`.
    pub fn add_include<T: Entity>(self, nav: Nav<E, T>) -> Result<Self> {
        self.node.include(nav.hop())?;
        Ok(self)
    }

    /// Includes a navigation of `E`, optionally handing the related entity to
    /// a sub-builder that requests further nested includes.
    ///
    /// Without `extra` this is [`IncludeBuilder::add_include`]. With `extra`,
    /// only the includes requested by the sub-builder are applied, each one
    /// loading the full path through `nav`.
    pub fn add_include_with<O, F>(self, nav: Nav<E, O::Entity>, extra: Option<F>) -> Result<Self>
    where
        O: IncludeOptions,
        F: FnOnce(O) -> Result<O>,
    {
        match extra {
            Some(extra) => {
                let child = IncludeBuilder::<O::Entity>::child(&self.node, nav.hop());
                trace!(
                    navigation = nav.name,
                    depth = child.node.depth(),
                    "delegating include"
                );
                extra(O::from_builder(child))?;
                debug!(navigation = nav.name, "delegated include finished");
            }
            None => self.node.include(nav.hop())?,
        }
        Ok(self)
    }

    /// A copy of the composed query.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::ContractViolation`] on a delegated builder, which
    /// does not own the tree's query.
    pub fn query(&self) -> Result<Query<E>> {
        self.root_handle()?.current()
    }

    /// Finishes the tree and returns the composed query.
    pub fn into_query(self) -> Result<Query<E>> {
        self.root_handle()?.release()
    }

    fn root_handle(&self) -> Result<&QueryHandle<E>> {
        self.root.as_ref().ok_or(RepositoryError::ContractViolation(
            "only the root include builder holds the composed query",
        ))
    }
}

impl<E> fmt::Debug for IncludeBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncludeBuilder")
            .field("node", &self.node)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use fluent_db::{MemoryEngine, Query};

    use super::*;
    use crate::models::{addresses, customers, orders, Address, Customer, Order};

    fn root() -> IncludeBuilder<Order> {
        IncludeBuilder::new(
            QueryHandle::new(Query::<Order>::new()),
            Arc::new(MemoryEngine::new()),
        )
    }

    #[test]
    fn test_root_includes_are_siblings() {
        let query = root()
            .add_include(orders::DELIVERY_ADDRESS)
            .and_then(|b| b.add_include(orders::BILLING_ADDRESS))
            .and_then(IncludeBuilder::into_query)
            .unwrap();

        let expected: Query<Order> = Query::new()
            .include(orders::DELIVERY_ADDRESS)
            .include(orders::BILLING_ADDRESS)
            .into();

        assert_eq!(query, expected);
        assert_eq!(query.loads().len(), 2);
    }

    #[test]
    fn test_delegated_includes_continue_parent_path() {
        let query = root()
            .add_include_with(
                orders::CUSTOMER,
                Some(|c: IncludeBuilder<Customer>| {
                    c.add_include(customers::DELIVERY_ADDRESS)?
                        .add_include(customers::BILLING_ADDRESS)
                }),
            )
            .and_then(IncludeBuilder::into_query)
            .unwrap();

        let expected: Query<Order> = Query::new()
            .include(orders::CUSTOMER)
            .then_include(customers::DELIVERY_ADDRESS)
            .include(orders::CUSTOMER)
            .then_include(customers::BILLING_ADDRESS)
            .into();

        assert_eq!(query, expected);
    }

    #[test]
    fn test_nested_delegation_reaches_depth_three() {
        let query = root()
            .add_include_with(
                orders::CUSTOMER,
                Some(|c: IncludeBuilder<Customer>| {
                    c.add_include_with(
                        customers::DELIVERY_ADDRESS,
                        Some(|a: IncludeBuilder<Address>| a.add_include(addresses::COUNTRY)),
                    )
                }),
            )
            .and_then(IncludeBuilder::into_query)
            .unwrap();

        assert_eq!(query.loads().len(), 1);
        assert_eq!(
            query.loads()[0].names(),
            vec!["Customer", "DeliveryAddress", "Country"]
        );
    }

    #[test]
    fn test_chain_positions_follow_tree_shape() {
        let positions = Cell::new(None);

        root()
            .add_include_with(
                orders::CUSTOMER,
                Some(|c: IncludeBuilder<Customer>| {
                    let customer_position = c.node().position();
                    c.add_include_with(
                        customers::DELIVERY_ADDRESS,
                        Some(|a: IncludeBuilder<Address>| {
                            positions.set(Some((
                                customer_position,
                                a.node().position(),
                                a.node().depth(),
                            )));
                            Ok(a)
                        }),
                    )
                }),
            )
            .unwrap();

        assert_eq!(
            positions.get(),
            Some((ChainPosition::RootStarting, ChainPosition::Continuing, 2))
        );
    }

    #[test]
    fn test_resolve_walks_parent_links() {
        let root = root();
        let customer = IncludeNode::child(&root.node, orders::CUSTOMER.hop());
        let address = IncludeNode::child(&customer, customers::BILLING_ADDRESS.hop());

        let steps = address.resolve(addresses::COUNTRY.hop());
        let positions: Vec<_> = steps.iter().map(|s| s.position).collect();
        let names: Vec<_> = steps.iter().map(|s| s.hop.name).collect();

        assert_eq!(
            positions,
            vec![
                ChainPosition::RootStarting,
                ChainPosition::Continuing,
                ChainPosition::Continuing
            ]
        );
        assert_eq!(names, vec!["Customer", "BillingAddress", "Country"]);
        assert_eq!(root.node.resolve(orders::CUSTOMER.hop()).len(), 1);
    }

    #[test]
    fn test_absent_delegate_behaves_like_plain_include() {
        let plain = root()
            .add_include(orders::CUSTOMER)
            .and_then(IncludeBuilder::into_query)
            .unwrap();
        let delegated = root()
            .add_include_with(
                orders::CUSTOMER,
                None::<fn(IncludeBuilder<Customer>) -> Result<IncludeBuilder<Customer>>>,
            )
            .and_then(IncludeBuilder::into_query)
            .unwrap();

        assert_eq!(plain, delegated);
    }

    #[test]
    fn test_delegate_without_includes_adds_nothing() {
        let query = root()
            .add_include_with(orders::CUSTOMER, Some(|c: IncludeBuilder<Customer>| Ok(c)))
            .and_then(IncludeBuilder::into_query)
            .unwrap();

        assert!(query.loads().is_empty());
    }

    #[test]
    fn test_child_builder_does_not_own_query() {
        let result = root().add_include_with(
            orders::CUSTOMER,
            Some(|c: IncludeBuilder<Customer>| {
                assert!(!c.is_root());
                assert!(matches!(
                    c.query(),
                    Err(RepositoryError::ContractViolation(_))
                ));
                Ok(c)
            }),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_sub_builder_error_propagates() {
        let result = root().add_include_with(
            orders::CUSTOMER,
            Some(|_: IncludeBuilder<Customer>| {
                Err(RepositoryError::ContractViolation("rejected by caller"))
            }),
        );

        assert_eq!(
            result.unwrap_err(),
            RepositoryError::ContractViolation("rejected by caller")
        );
    }

    #[test]
    fn test_include_after_release_is_contract_violation() {
        let handle = QueryHandle::new(Query::<Order>::new());
        let builder = IncludeBuilder::new(handle.share(), Arc::new(MemoryEngine::new()));
        handle.release().unwrap();

        let result = builder.add_include(orders::CUSTOMER);
        assert!(matches!(
            result,
            Err(RepositoryError::ContractViolation(_))
        ));
    }

    #[test]
    fn test_query_peeks_without_finishing() {
        let builder = root().add_include(orders::LINE_ITEMS).unwrap();

        assert_eq!(builder.query().unwrap().load_paths(), vec!["LineItems"]);
        let builder = builder.add_include(orders::CUSTOMER).unwrap();
        assert_eq!(builder.into_query().unwrap().loads().len(), 2);
    }
}
