use std::sync::Arc;

use fluent_db::{MemoryEngine, Query, QueryEngine};
use fluent_repository::{
    models::{addresses, customers, orders, Order, OrderStatus},
    FilterOptions, IncludeOptions, OrderIncludes, OrderRepository,
};
use nu_ansi_term::Color::{Cyan, Green, Red};
use tracing::{debug, info};

use crate::{config::Config, error::Result, utils::Colored};

/// Orders ready to ship with their delivery address and the customer's
/// addresses, chained by hand.
pub fn hand_chained_query() -> Query<Order> {
    Query::<Order>::new()
        .filter(
            orders::STATUS
                .eq(OrderStatus::Submitted)
                .and(orders::PAYMENT_CONFIRMED_DATE.not_null()),
        )
        .include(orders::DELIVERY_ADDRESS)
        .include(orders::CUSTOMER)
        .then_include(customers::DELIVERY_ADDRESS)
        .then_include(addresses::COUNTRY)
        .include(orders::CUSTOMER)
        .then_include(customers::BILLING_ADDRESS)
        .then_include(addresses::COUNTRY)
        .into()
}

/// The same query composed through the order repository.
pub fn fluent_query<Q: QueryEngine>(repo: &OrderRepository<Q>) -> Result<Query<Order>> {
    let query = repo
        .query()
        .ready_to_ship()
        .include()
        .delivery_address()
        .and_then(OrderIncludes::customer_with_addresses)
        .and_then(OrderIncludes::into_query)?;
    Ok(query)
}

pub fn compare(config: &Config) -> Result<bool> {
    let repo = OrderRepository::new(Arc::new(MemoryEngine::new()));

    let manual = hand_chained_query();
    let fluent = fluent_query(&repo)?;
    let identical = manual == fluent;
    debug!(identical, loads = fluent.loads().len(), "compared order queries");

    if identical {
        info!(identical, "{}", Colored(Green, "Queries are identical"));
    } else {
        info!(identical, "{}", Colored(Red, "Queries differ"));
    }

    report("Hand-chained", &manual, config.show_sql());
    report("Fluent", &fluent, config.show_sql());

    Ok(identical)
}

fn report(label: &str, query: &Query<Order>, show_sql: bool) {
    info!(label, "\n{}", Colored(Cyan, label));

    if show_sql {
        let (sql, params) = query.to_sql();
        info!(label, sql = %sql, params = params.len(), "  {}", query);
    }

    for path in query.load_paths() {
        info!(label, path = %path, "  include {}", path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_query_matches_hand_chained() {
        let repo = OrderRepository::new(Arc::new(MemoryEngine::new()));

        assert_eq!(fluent_query(&repo).unwrap(), hand_chained_query());
    }

    #[test]
    fn test_compare_reports_identical() {
        let config = Config {
            show_sql: Some(false),
            ..Default::default()
        };

        assert!(compare(&config).unwrap());
    }
}
