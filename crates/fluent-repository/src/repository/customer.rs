//! Customer repository and its option types.

use fluent_db::QueryEngine;

use super::{AddressIncludes, Repository};
use crate::{
    error::Result,
    filter_options, include_options,
    models::{customers, Customer},
    options::{FilterOptions, IncludeOptions},
};

include_options!(
    /// Includes reachable from a customer.
    pub struct CustomerIncludes(Customer);
);

filter_options!(
    /// Filters over customers.
    pub struct CustomerFilters(Customer) => CustomerIncludes;
);

/// Repository of customers.
pub type CustomerRepository<Q> = Repository<CustomerFilters<Q>>;

impl<Q: QueryEngine> CustomerFilters<Q> {
    pub fn with_email(self, email: &str) -> Self {
        self.add_filter(customers::EMAIL.eq(email))
    }

    /// Customers whose email address is at `domain`, ignoring case.
    pub fn email_domain(self, domain: &str) -> Self {
        self.add_filter(customers::EMAIL.iends_with(format!("@{domain}")))
    }
}

impl CustomerIncludes {
    pub fn delivery_address(self) -> Result<Self> {
        self.add_include(customers::DELIVERY_ADDRESS)
    }

    pub fn billing_address(self) -> Result<Self> {
        self.add_include(customers::BILLING_ADDRESS)
    }

    /// Both addresses, each with its country.
    pub fn both_addresses(self) -> Result<Self> {
        self.add_include_with(
            customers::DELIVERY_ADDRESS,
            Some(AddressIncludes::with_country),
        )?
        .add_include_with(
            customers::BILLING_ADDRESS,
            Some(AddressIncludes::with_country),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fluent_db::{MemoryEngine, Query, Value};

    use super::*;
    use crate::models::addresses;

    fn repo() -> CustomerRepository<MemoryEngine> {
        let engine = MemoryEngine::new();
        engine
            .insert(vec![
                customer(1, "Ada", "ada@Example.com"),
                customer(2, "Grace", "grace@navy.mil"),
                customer(3, "Edsger", "edsger@example.com"),
                customer(4, "Alan", "alan@example.community"),
                customer(5, "Barbara", "barbara@notexample.com"),
            ])
            .unwrap();
        CustomerRepository::new(Arc::new(engine))
    }

    fn customer(id: i64, first_name: &str, email: &str) -> Customer {
        Customer {
            id,
            first_name: first_name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_customer_is_root_of_its_own_tree() {
        let query = repo()
            .query()
            .include()
            .both_addresses()
            .and_then(CustomerIncludes::into_query)
            .unwrap();

        let expected: Query<Customer> = Query::new()
            .include(customers::DELIVERY_ADDRESS)
            .then_include(addresses::COUNTRY)
            .include(customers::BILLING_ADDRESS)
            .then_include(addresses::COUNTRY)
            .into();

        assert_eq!(query, expected);
    }

    #[test]
    fn test_email_filters() {
        let repo = repo();

        let exact = repo.query().with_email("grace@navy.mil").into_query();
        let domain = repo.query().email_domain("example.com").into_query();

        let names = |query: &Query<Customer>| -> Vec<String> {
            repo.engine()
                .fetch(query)
                .unwrap()
                .into_iter()
                .map(|c| c.first_name)
                .collect()
        };

        assert_eq!(names(&exact), vec!["Grace"]);
        assert_eq!(names(&domain), vec!["Ada", "Edsger"]);
    }

    #[test]
    fn test_email_domain_rejects_look_alike_domains() {
        let repo = repo();
        let query = repo.query().email_domain("example.com").into_query();

        let ids: Vec<i64> = repo
            .engine()
            .fetch(&query)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let (sql, params) = query.to_sql();
        assert_eq!(
            sql,
            r"SELECT * FROM customers WHERE LOWER(email) LIKE LOWER(?) ESCAPE '\'"
        );
        assert_eq!(params, vec![Value::from("%@example.com")]);
    }
}
