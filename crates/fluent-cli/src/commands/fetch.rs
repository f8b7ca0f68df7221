use std::{fs, path::Path, sync::Arc};

use fluent_db::{MemoryEngine, Query, QueryEngine};
use fluent_repository::{
    models::{Customer, Order, OrderStatus},
    FilterOptions, IncludeOptions, OrderRepository,
};
use nu_ansi_term::Color::{Blue, Cyan, Green, Magenta};
use tracing::{debug, info};

use crate::{
    config::Config,
    error::{CliError, ErrorContext, Result},
    utils::{or_dash, Colored},
};

/// Narrowing and includes requested on the command line.
#[derive(Debug, Default)]
pub struct FetchOptions {
    pub ready_to_ship: bool,
    pub status: Option<OrderStatus>,
    pub with_customer: bool,
}

/// Resolves `--status`: absent, present without a value (the configured
/// default), or an explicit status name.
pub fn resolve_status(config: &Config, status: Option<Option<String>>) -> Result<Option<OrderStatus>> {
    match status {
        None => Ok(None),
        Some(None) => Ok(Some(config.default_status())),
        Some(Some(status)) => Ok(Some(status.parse()?)),
    }
}

pub fn load_seed(path: &Path) -> Result<Vec<Order>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;

    serde_json::from_str(&content).map_err(|source| {
        CliError::Seed {
            path: path.display().to_string(),
            source,
        }
    })
}

pub fn build_query<Q: QueryEngine>(
    repo: &OrderRepository<Q>,
    options: &FetchOptions,
) -> Result<Query<Order>> {
    let mut filters = repo.query();
    if options.ready_to_ship {
        filters = filters.ready_to_ship();
    }
    if let Some(status) = options.status {
        filters = filters.with_status(status);
    }

    let mut includes = filters.include().line_items()?;
    if options.with_customer {
        includes = includes.customer_with_addresses()?;
    }

    Ok(includes.into_query()?)
}

pub fn fetch(config: &Config, seed: Option<&Path>, options: &FetchOptions) -> Result<usize> {
    let seed = seed
        .or(config.seed_path.as_deref())
        .ok_or(CliError::MissingSeed)?;

    let engine = Arc::new(MemoryEngine::new());
    let seeded = engine.insert(load_seed(seed)?)?;
    debug!(seed = %seed.display(), orders = seeded, "seeded engine");

    let repo = OrderRepository::new(Arc::clone(&engine));
    let query = build_query(&repo, options)?;
    if config.show_sql() {
        info!(sql = %query, "{}", query);
    }

    let rows = engine.fetch(&query)?;
    for order in &rows {
        print_order(order);
    }
    info!(count = rows.len(), "{} of {} orders matched", rows.len(), seeded);

    Ok(rows.len())
}

fn print_order(order: &Order) {
    let customer = order.customer.as_ref().map(Customer::full_name);

    info!(
        id = order.id,
        status = %order.status,
        order_date = %order.order_date,
        "#{} {} ordered {} shipped {} customer {} ({} items)",
        Colored(Blue, order.id),
        Colored(Magenta, order.status),
        Colored(Green, order.order_date.format("%Y-%m-%d")),
        or_dash(order.shipped_date.map(|d| d.format("%Y-%m-%d"))),
        Colored(Cyan, or_dash(customer)),
        order.line_items.len(),
    );
}
