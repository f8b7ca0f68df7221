//! The order-management sample domain.

mod address;
mod customer;
mod order;

pub use address::{addresses, countries, Address, Country};
pub use customer::{customers, Customer};
pub use order::{line_items, orders, LineItem, Order, OrderStatus, UnknownStatus};
