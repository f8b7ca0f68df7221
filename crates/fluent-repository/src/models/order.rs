use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use fluent_db::{define_entity, Value};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Address, Customer};

/// Lifecycle state of an order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum OrderStatus {
    #[default]
    Draft,
    Submitted,
    Shipped,
    Delivered,
    Returned,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Draft,
        OrderStatus::Submitted,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Returned,
        OrderStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "Draft",
            OrderStatus::Submitted => "Submitted",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Returned => "Returned",
            OrderStatus::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OrderStatus> for Value {
    fn from(status: OrderStatus) -> Self {
        Value::Text(status.as_str().to_string())
    }
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Unknown order status: {0}")]
#[diagnostic(
    code(fluent_repository::unknown_status),
    help("Use one of: Draft, Submitted, Shipped, Delivered, Returned, Canceled")
)]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LineItem {
    pub id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Order {
    pub id: i64,
    pub order_date: DateTime<Utc>,
    #[serde(default)]
    pub shipped_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub delivery_address: Option<Address>,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub payment_confirmed_date: Option<DateTime<Utc>>,
}

define_entity!(
    Order => orders {
        table: "orders",
        columns: {
            ID(id): i64 => "id",
            ORDER_DATE(order_date): DateTime<Utc> => "order_date",
            SHIPPED_DATE(shipped_date): Option<DateTime<Utc>> => "shipped_date",
            STATUS(status): OrderStatus => "status",
            PAYMENT_CONFIRMED_DATE(payment_confirmed_date): Option<DateTime<Utc>> => "payment_confirmed_date"
        },
        navigations: {
            BILLING_ADDRESS: Address => "BillingAddress",
            DELIVERY_ADDRESS: Address => "DeliveryAddress",
            CUSTOMER: Customer => "Customer",
            LINE_ITEMS: [LineItem] => "LineItems"
        }
    }
);

define_entity!(
    LineItem => line_items {
        table: "line_items",
        columns: {
            ID(id): i64 => "id",
            PRODUCT_NAME(product_name): String => "product_name",
            QUANTITY(quantity): i32 => "quantity",
            PRICE(price): f64 => "price"
        },
        navigations: {}
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!("submitted".parse::<OrderStatus>(), Ok(OrderStatus::Submitted));
        assert_eq!(" Shipped ".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
        assert_eq!(
            "lost".parse::<OrderStatus>(),
            Err(UnknownStatus("lost".to_string()))
        );
    }

    #[test]
    fn test_status_column_reads_as_text() {
        let order = Order {
            status: OrderStatus::Returned,
            ..Default::default()
        };

        assert_eq!(order_value(&order, "status"), Value::from("Returned"));
        assert!(order_value(&order, "shipped_date").is_null());
    }

    #[test]
    fn test_order_deserializes_with_defaults() {
        let order: Order = serde_json::from_str(
            r#"{"id": 7, "order_date": "2024-03-01T10:00:00Z", "status": "Submitted"}"#,
        )
        .unwrap();

        assert_eq!(order.id, 7);
        assert_eq!(order.status, OrderStatus::Submitted);
        assert!(order.customer.is_none());
        assert!(order.line_items.is_empty());
    }

    fn order_value(order: &Order, column: &str) -> Value {
        fluent_db::Entity::value(order, column)
    }
}
