//! In-memory pizza and topping catalog.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::{CatalogError, Result};

const BUILTIN_PIZZAS: &[(&str, &[&str])] = &[
    ("margherita", &["mozzarella", "tomato", "basil"]),
    ("diavola", &["mozzarella", "salami", "chili"]),
    ("marinara", &[]),
    ("capricciosa", &["mozzarella", "ham", "mushrooms", "artichokes", "olives"]),
    ("quattro-formaggi", &["mozzarella", "gorgonzola", "parmesan", "fontina"]),
    ("hawaii", &["mozzarella", "ham", "pineapple"]),
];

const BUILTIN_TOPPINGS: &[&str] = &[
    "mozzarella",
    "tomato",
    "basil",
    "salami",
    "chili",
    "ham",
    "mushrooms",
    "artichokes",
    "olives",
    "gorgonzola",
    "parmesan",
    "fontina",
    "pineapple",
    "garlic",
    "oregano",
];

const BUILTIN_UNAVAILABLE: &[&str] = &["fontina", "pineapple"];

/// A read-only snapshot of what can be ordered.
///
/// Names are stored in their canonical spelling and looked up ignoring
/// ASCII case. Every recommended or available topping is a known topping.
///
/// # Examples
///
/// ```
/// use kubepizza_catalog::Catalog;
///
/// let catalog = Catalog::builtin();
/// assert_eq!(catalog.canonical_pizza("MARGHERITA"), Some("margherita"));
/// assert_eq!(catalog.recommended_toppings("Diavola"), ["mozzarella", "salami", "chili"]);
/// assert!(catalog.recommended_toppings("marinara").is_empty());
/// assert!(catalog.is_available("basil"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pizzas: Vec<String>,
    toppings: Vec<String>,
    recommended: BTreeMap<String, Vec<String>>,
    available: Vec<String>,
}

impl Catalog {
    /// Builds a catalog, checking its invariants.
    ///
    /// Recommended and available toppings are rewritten to the spelling
    /// used in `toppings`; recommendation keys to the spelling in `pizzas`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] or [`CatalogError::DuplicateEntry`]
    /// for malformed name lists, [`CatalogError::UnknownPizza`] for a
    /// recommendation keyed by an unlisted pizza, and
    /// [`CatalogError::UnknownTopping`] for any referenced topping that is
    /// not listed.
    pub fn new<R>(
        pizzas: Vec<String>,
        toppings: Vec<String>,
        recommended: R,
        available: Vec<String>,
    ) -> Result<Self>
    where
        R: IntoIterator<Item = (String, Vec<String>)>,
    {
        check_names("pizza", &pizzas)?;
        check_names("topping", &toppings)?;

        let mut catalog = Self {
            pizzas,
            toppings,
            recommended: BTreeMap::new(),
            available: Vec::new(),
        };

        for (pizza, list) in recommended {
            let pizza = catalog
                .canonical_pizza(&pizza)
                .ok_or(CatalogError::UnknownPizza(pizza.clone()))?
                .to_string();
            let context = format!("pizza '{pizza}'");
            let list = catalog.canonical_toppings(&list, &context)?;
            catalog.recommended.insert(pizza, list);
        }

        catalog.available = catalog.canonical_toppings(&available, "the availability list")?;
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        let recommended = BUILTIN_PIZZAS
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(pizza, list)| {
                let list = list.iter().map(|t| t.to_string()).collect();
                (pizza.to_string(), list)
            })
            .collect();

        Self {
            pizzas: BUILTIN_PIZZAS.iter().map(|(p, _)| p.to_string()).collect(),
            toppings: BUILTIN_TOPPINGS.iter().map(|t| t.to_string()).collect(),
            recommended,
            available: BUILTIN_TOPPINGS
                .iter()
                .filter(|t| !BUILTIN_UNAVAILABLE.contains(*t))
                .map(|t| t.to_string())
                .collect(),
        }
    }

    /// Known pizzas in declaration order.
    pub fn pizzas(&self) -> &[String] {
        &self.pizzas
    }

    /// Known toppings in declaration order.
    pub fn toppings(&self) -> &[String] {
        &self.toppings
    }

    /// Toppings currently available, in declaration order.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn canonical_pizza(&self, name: &str) -> Option<&str> {
        find_ignore_case(&self.pizzas, name)
    }

    pub fn canonical_topping(&self, name: &str) -> Option<&str> {
        find_ignore_case(&self.toppings, name)
    }

    pub fn is_known_pizza(&self, name: &str) -> bool {
        self.canonical_pizza(name).is_some()
    }

    pub fn is_known_topping(&self, name: &str) -> bool {
        self.canonical_topping(name).is_some()
    }

    /// Recommended toppings for `pizza`; empty when the pizza is unknown
    /// or has no recommendation.
    pub fn recommended_toppings(&self, pizza: &str) -> &[String] {
        self.canonical_pizza(pizza)
            .and_then(|p| self.recommended.get(p))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_available(&self, topping: &str) -> bool {
        find_ignore_case(&self.available, topping).is_some()
    }

    pub(crate) fn recommendations(&self) -> &BTreeMap<String, Vec<String>> {
        &self.recommended
    }

    fn canonical_toppings(&self, names: &[String], context: &str) -> Result<Vec<String>> {
        names
            .iter()
            .map(|name| {
                self.canonical_topping(name)
                    .map(str::to_string)
                    .ok_or_else(|| CatalogError::UnknownTopping {
                        topping: name.clone(),
                        context: context.to_string(),
                    })
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn find_ignore_case<'a>(names: &'a [String], name: &str) -> Option<&'a str> {
    names
        .iter()
        .find(|n| n.eq_ignore_ascii_case(name))
        .map(String::as_str)
}

fn check_names(kind: &'static str, names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName(kind));
        }
        if !seen.insert(name.to_ascii_lowercase()) {
            return Err(CatalogError::DuplicateEntry {
                kind,
                name: name.clone(),
            });
        }
    }
    Ok(())
}
