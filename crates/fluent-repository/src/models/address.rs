use fluent_db::define_entity;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Address {
    pub id: i64,
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub postal_code: String,
    #[serde(default)]
    pub country: Option<Country>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
}

define_entity!(
    Address => addresses {
        table: "addresses",
        columns: {
            ID(id): i64 => "id",
            STREET(street): String => "street",
            CITY(city): String => "city",
            STATE(state): String => "state",
            POSTAL_CODE(postal_code): String => "postal_code"
        },
        navigations: {
            COUNTRY: Country => "Country"
        }
    }
);

define_entity!(
    Country => countries {
        table: "countries",
        columns: {
            ID(id): i64 => "id",
            NAME(name): String => "name"
        },
        navigations: {}
    }
);
