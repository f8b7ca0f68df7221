//! Order repository and its option types.

use fluent_db::QueryEngine;

use super::{CustomerIncludes, Repository};
use crate::{
    error::Result,
    filter_options, include_options,
    models::{orders, Order, OrderStatus},
    options::{FilterOptions, IncludeFn, IncludeOptions},
};

include_options!(
    /// Includes reachable from an order.
    pub struct OrderIncludes(Order);
);

filter_options!(
    /// Filters over orders.
    pub struct OrderFilters(Order) => OrderIncludes;
);

/// Repository of orders.
pub type OrderRepository<Q> = Repository<OrderFilters<Q>>;

impl<Q: QueryEngine> OrderFilters<Q> {
    /// Submitted orders whose payment has been confirmed.
    pub fn ready_to_ship(self) -> Self {
        self.add_filter(
            orders::STATUS
                .eq(OrderStatus::Submitted)
                .and(orders::PAYMENT_CONFIRMED_DATE.not_null()),
        )
    }

    pub fn with_status(self, status: OrderStatus) -> Self {
        self.add_filter(orders::STATUS.eq(status))
    }

    pub fn shipped(self) -> Self {
        self.add_filter(orders::SHIPPED_DATE.not_null())
    }
}

impl OrderIncludes {
    /// The ordering customer, optionally with further includes on it.
    pub fn customer(self, extra: Option<IncludeFn<CustomerIncludes>>) -> Result<Self> {
        self.add_include_with::<CustomerIncludes, _>(orders::CUSTOMER, extra)
    }

    /// The customer with both of their addresses and each address's country.
    pub fn customer_with_addresses(self) -> Result<Self> {
        self.customer(Some(Box::new(CustomerIncludes::both_addresses)))
    }

    pub fn delivery_address(self) -> Result<Self> {
        self.add_include(orders::DELIVERY_ADDRESS)
    }

    pub fn billing_address(self) -> Result<Self> {
        self.add_include(orders::BILLING_ADDRESS)
    }

    pub fn both_addresses(self) -> Result<Self> {
        self.delivery_address()?.billing_address()
    }

    pub fn line_items(self) -> Result<Self> {
        self.add_include(orders::LINE_ITEMS)
    }
}
