use fluent_db::define_entity;
use serde::{Deserialize, Serialize};

use super::Address;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub delivery_address: Option<Address>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

define_entity!(
    Customer => customers {
        table: "customers",
        columns: {
            ID(id): i64 => "id",
            FIRST_NAME(first_name): String => "first_name",
            LAST_NAME(last_name): String => "last_name",
            EMAIL(email): String => "email"
        },
        navigations: {
            BILLING_ADDRESS: Address => "BillingAddress",
            DELIVERY_ADDRESS: Address => "DeliveryAddress"
        }
    }
);
