//! The query value.
//!
//! [`Query`] is the lazily evaluated, composable query the engine hands out.
//! Filters narrow it conjunctively; includes record eager-load chains. The
//! typed [`Includable`] API is the hand-written form of a composed query:
//!
//! ```ignore
//! let query = Query::<Order>::new()
//!     .filter(orders::STATUS.eq(OrderStatus::Submitted))
//!     .include(orders::CUSTOMER)
//!     .then_include(customers::DELIVERY_ADDRESS)
//!     .into_query();
//! ```
//!
//! # Submodules
//!
//! - [`builder`] - Implementation of [`Query`].
//! - [`include`] - [`LoadChain`] and the typed [`Includable`] continuation.

pub mod builder;
pub mod include;

pub use builder::Query;
pub use include::{Includable, LoadChain};
