//! Command actions and the records they print.
//!
//! Nothing here persists anything: `order create` echoes the order it
//! would send, `order list` filters a fixed set of sample orders and
//! `topping add` reports how the catalog sees the new topping.

use std::time::Duration;

use kubepizza_catalog::Catalog;
use kubepizza_core::{ActionError, Invocation, ParsedValues};
use serde::Serialize;
use tracing::{info, warn};

use crate::output::{OutputFormat, Tabular, render};

/// An order as received from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub pizza: String,
    pub size: String,
    pub toppings: Vec<String>,
    pub delivery: bool,
    /// Requested toppings the kitchen is currently out of.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unavailable: Vec<String>,
}

impl OrderRequest {
    /// Reads the order from bound values, spelling names as the catalog does.
    pub fn from_values(values: &ParsedValues, catalog: &Catalog) -> Self {
        let pizza = values.get_str("--pizza").unwrap_or_default();
        let pizza = catalog.canonical_pizza(pizza).unwrap_or(pizza).to_string();

        let toppings: Vec<String> = values
            .get_list("--toppings")
            .iter()
            .map(|t| catalog.canonical_topping(t).unwrap_or(t).to_string())
            .collect();
        let unavailable = toppings
            .iter()
            .filter(|t| !catalog.is_available(t))
            .cloned()
            .collect();

        Self {
            pizza,
            size: values.get_str("--size").unwrap_or("medium").to_string(),
            toppings,
            delivery: values.get_bool("--delivery").unwrap_or(false),
            unavailable,
        }
    }
}

impl Tabular for OrderRequest {
    fn headers(&self) -> Vec<&'static str> {
        vec!["pizza", "size", "toppings", "delivery"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.pizza.clone(),
            self.size.clone(),
            join_or_dash(&self.toppings),
            yes_no(self.delivery).to_string(),
        ]]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const FILTERS: [&'static str; 4] = ["all", "open", "delivered", "cancelled"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: u32,
    pub pizza: String,
    pub size: String,
    pub toppings: Vec<String>,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderList(pub Vec<Order>);

impl Tabular for OrderList {
    fn headers(&self) -> Vec<&'static str> {
        vec!["id", "pizza", "size", "toppings", "status"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.0
            .iter()
            .map(|order| {
                vec![
                    order.id.to_string(),
                    order.pizza.clone(),
                    order.size.clone(),
                    join_or_dash(&order.toppings),
                    order.status.as_str().to_string(),
                ]
            })
            .collect()
    }
}

/// Orders shown by `order list`.
pub fn sample_orders() -> Vec<Order> {
    vec![
        sample(1, "margherita", "medium", &["basil"], OrderStatus::Delivered),
        sample(2, "diavola", "large", &["chili", "olives"], OrderStatus::Open),
        sample(3, "marinara", "small", &[], OrderStatus::Cancelled),
        sample(4, "capricciosa", "large", &[], OrderStatus::Open),
    ]
}

fn sample(id: u32, pizza: &str, size: &str, toppings: &[&str], status: OrderStatus) -> Order {
    Order {
        id,
        pizza: pizza.to_string(),
        size: size.to_string(),
        toppings: toppings.iter().map(|t| t.to_string()).collect(),
        status,
    }
}

/// Keeps orders matching a `--status` filter; `all` keeps everything.
pub fn filter_orders(orders: Vec<Order>, status: &str) -> OrderList {
    OrderList(
        orders
            .into_iter()
            .filter(|order| status == "all" || order.status.as_str() == status)
            .collect(),
    )
}

/// A topping as the catalog sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToppingEntry {
    pub name: String,
    pub known: bool,
    pub available: bool,
}

impl ToppingEntry {
    pub fn lookup(name: &str, catalog: &Catalog) -> Self {
        let name = name.trim();
        match catalog.canonical_topping(name) {
            Some(canonical) => Self {
                name: canonical.to_string(),
                known: true,
                available: catalog.is_available(canonical),
            },
            None => Self {
                name: name.to_string(),
                known: false,
                available: false,
            },
        }
    }
}

impl Tabular for ToppingEntry {
    fn headers(&self) -> Vec<&'static str> {
        vec!["name", "known", "available"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.name.clone(),
            yes_no(self.known).to_string(),
            yes_no(self.available).to_string(),
        ]]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ToppingList(pub Vec<ToppingEntry>);

impl Tabular for ToppingList {
    fn headers(&self) -> Vec<&'static str> {
        vec!["name", "available"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.0
            .iter()
            .map(|t| vec![t.name.clone(), yes_no(t.available).to_string()])
            .collect()
    }
}

pub fn create_order(
    inv: &mut Invocation<'_>,
    catalog: &Catalog,
    send_delay: Duration,
) -> Result<(), ActionError> {
    let order = OrderRequest::from_values(inv.values, catalog);
    if !order.unavailable.is_empty() {
        warn!(toppings = ?order.unavailable, "ordering toppings that are out of stock");
    }

    info!(pizza = %order.pizza, delay_ms = send_delay.as_millis() as u64, "sending order");
    inv.cancel.sleep(send_delay)?;
    print(inv, &order)
}

pub fn list_orders(inv: &mut Invocation<'_>) -> Result<(), ActionError> {
    let status = inv.values.get_str("--status").unwrap_or("all");
    let orders = filter_orders(sample_orders(), status);
    print(inv, &orders)
}

pub fn add_topping(inv: &mut Invocation<'_>, catalog: &Catalog) -> Result<(), ActionError> {
    let name = inv.values.get_str("--name").unwrap_or_default();
    let entry = ToppingEntry::lookup(name, catalog);
    if !entry.known {
        warn!(name = %entry.name, "topping is not in the catalog");
    }
    print(inv, &entry)
}

pub fn list_toppings(inv: &mut Invocation<'_>, catalog: &Catalog) -> Result<(), ActionError> {
    let toppings = ToppingList(
        catalog
            .toppings()
            .iter()
            .map(|name| ToppingEntry::lookup(name, catalog))
            .collect(),
    );
    print(inv, &toppings)
}

fn print<T: Serialize + Tabular>(inv: &mut Invocation<'_>, value: &T) -> Result<(), ActionError> {
    let text = render(value, output_format(inv.values)?).map_err(ActionError::Output)?;
    inv.out.write_all(text.as_bytes())?;
    Ok(())
}

fn output_format(values: &ParsedValues) -> Result<OutputFormat, ActionError> {
    match values.get_str("--output") {
        Some(name) => name.parse().map_err(ActionError::Output),
        None => Ok(OutputFormat::default()),
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, kubepizza_core::Value)]) -> ParsedValues {
        let mut values = ParsedValues::default();
        for (name, value) in pairs {
            values.insert(name, value.clone(), true);
        }
        values
    }

    #[test]
    fn test_order_request_uses_catalog_spelling() {
        let catalog = Catalog::builtin();
        let values = values(&[
            ("--pizza", "DIAVOLA".into()),
            ("--toppings", vec!["Chili".to_string(), "pineapple".to_string()].into()),
            ("--delivery", true.into()),
        ]);

        let order = OrderRequest::from_values(&values, &catalog);
        assert_eq!(order.pizza, "diavola");
        assert_eq!(order.size, "medium");
        assert_eq!(order.toppings, ["chili", "pineapple"]);
        assert!(order.delivery);
        assert_eq!(order.unavailable, ["pineapple"]);
    }

    #[test]
    fn test_order_table_row() {
        let order = OrderRequest {
            pizza: "margherita".into(),
            size: "small".into(),
            toppings: Vec::new(),
            delivery: false,
            unavailable: Vec::new(),
        };
        assert_eq!(order.rows(), vec![vec!["margherita", "small", "-", "no"]]);
        let json = render(&order, OutputFormat::Json).unwrap();
        assert!(!json.contains("unavailable"));
    }

    #[test]
    fn test_filter_orders_by_status() {
        assert_eq!(filter_orders(sample_orders(), "all").0.len(), 4);
        let open = filter_orders(sample_orders(), "open");
        assert!(open.0.iter().all(|o| o.status == OrderStatus::Open));
        assert_eq!(open.0.len(), 2);
        assert!(filter_orders(sample_orders(), "delivered").0[0].id == 1);
    }

    #[test]
    fn test_topping_lookup() {
        let catalog = Catalog::builtin();
        assert_eq!(
            ToppingEntry::lookup("BASIL", &catalog),
            ToppingEntry {
                name: "basil".into(),
                known: true,
                available: true,
            }
        );
        let unknown = ToppingEntry::lookup(" anchovies ", &catalog);
        assert_eq!(unknown.name, "anchovies");
        assert!(!unknown.known);
    }
}
