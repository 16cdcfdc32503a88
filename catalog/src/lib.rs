//! Pizza and topping catalog for kubepizza.
//!
//! A [`Catalog`] is a read-only snapshot of known pizzas, known toppings,
//! per-pizza recommended toppings and the toppings currently available.
//! It is either the [built-in](Catalog::builtin) snapshot or loaded from a
//! YAML/JSON document through [`CatalogFile`]. Both paths enforce the same
//! invariants: names are non-empty and unique ignoring case, and every
//! referenced topping is a known topping.
//!
//! # Quick start
//!
//! ```
//! use kubepizza_catalog::Catalog;
//!
//! let catalog = Catalog::builtin();
//! assert!(catalog.is_known_pizza("Diavola"));
//! assert_eq!(catalog.recommended_toppings("margherita"), ["mozzarella", "tomato", "basil"]);
//! ```

mod catalog;
mod error;
mod file;

pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use file::{CatalogFile, PizzaEntry};
