//! Value model shared by option definitions, the binder and actions.
//!
//! Options declare a [`ValueType`] and an [`Arity`]; binding produces a
//! [`Value`] which is stored in [`ParsedValues`] under the option's primary
//! name. Values serialize with [`serde`] so actions can echo them in any
//! output format.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Value type accepted by an option.
///
/// # Examples
///
/// ```
/// use kubepizza_core::{Arity, ValueType};
///
/// assert_eq!(ValueType::default(), ValueType::String);
/// assert_eq!(ValueType::Bool.default_arity(), Arity::ZeroOrOne);
/// assert_eq!(ValueType::StringArray.default_arity(), Arity::ZeroOrMore);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValueType {
    /// Single string value (the default).
    #[default]
    String,
    /// Boolean flag; `--flag` alone binds `true`.
    Bool,
    /// Ordered list of strings.
    StringArray,
}

impl ValueType {
    /// Returns the arity an option of this type gets unless overridden.
    pub fn default_arity(self) -> Arity {
        match self {
            Self::String => Arity::ExactlyOne,
            Self::Bool => Arity::ZeroOrOne,
            Self::StringArray => Arity::ZeroOrMore,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Bool => f.write_str("boolean"),
            Self::StringArray => f.write_str("string list"),
        }
    }
}

/// How many value tokens an option consumes per occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// Exactly one token must follow the option name.
    ExactlyOne,
    /// A token may follow the option name.
    ZeroOrOne,
    /// Every following non-option token is consumed.
    ZeroOrMore,
}

impl Arity {
    /// Returns `true` if values accumulate across occurrences.
    pub fn is_multi(self) -> bool {
        matches!(self, Self::ZeroOrMore)
    }
}

/// A bound option value.
///
/// # Examples
///
/// ```
/// use kubepizza_core::Value;
///
/// let size = Value::from("large");
/// assert_eq!(size.as_str(), Some("large"));
/// assert_eq!(size.strings(), vec!["large"]);
///
/// let toppings = Value::from(vec!["mozzarella".to_string(), "chili".to_string()]);
/// assert_eq!(toppings.as_list().map(<[String]>::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    String(String),
    List(Vec<String>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns every string carried by this value, in order.
    ///
    /// Booleans yield nothing; they never take part in allowed-set checks.
    pub fn strings(&self) -> Vec<&str> {
        match self {
            Self::Bool(_) => Vec::new(),
            Self::String(s) => vec![s.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Values bound during one parse, keyed by primary option name.
///
/// Tracks which values came from the command line and which were filled in
/// by a default supplier.
///
/// # Examples
///
/// ```
/// use kubepizza_core::{ParsedValues, Value};
///
/// let mut values = ParsedValues::default();
/// values.insert("--size", Value::from("medium"), false);
/// values.insert("--pizza", Value::from("margherita"), true);
///
/// assert_eq!(values.get_str("--size"), Some("medium"));
/// assert!(!values.is_explicit("--size"));
/// assert!(values.is_explicit("--pizza"));
/// assert!(values.get_list("--toppings").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedValues {
    values: BTreeMap<String, Value>,
    #[serde(skip)]
    explicit: BTreeSet<String>,
}

impl ParsedValues {
    /// Stores a value, replacing any previous one for the same option.
    pub fn insert(&mut self, name: &str, value: Value, explicit: bool) {
        if explicit {
            self.explicit.insert(name.to_string());
        } else {
            self.explicit.remove(name);
        }
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Returns the list bound to `name`, or an empty slice when absent.
    ///
    /// A single string value is returned as a one-element slice.
    pub fn get_list(&self, name: &str) -> &[String] {
        match self.get(name) {
            Some(Value::List(items)) => items,
            Some(Value::String(s)) => std::slice::from_ref(s),
            _ => &[],
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns `true` if the value was supplied on the command line.
    pub fn is_explicit(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_strings_by_variant() {
        assert!(Value::Bool(true).strings().is_empty());
        assert_eq!(Value::from("a").strings(), vec!["a"]);
        assert_eq!(
            Value::from(vec!["a".to_string(), "b".to_string()]).strings(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_parsed_values_reinsert_clears_explicit_marker() {
        let mut values = ParsedValues::default();
        values.insert("--size", Value::from("small"), true);
        values.insert("--size", Value::from("medium"), false);

        assert_eq!(values.get_str("--size"), Some("medium"));
        assert!(!values.is_explicit("--size"));
    }

    #[test]
    fn test_get_list_wraps_single_string() {
        let mut values = ParsedValues::default();
        values.insert("--pizza", Value::from("diavola"), true);
        assert_eq!(values.get_list("--pizza"), ["diavola".to_string()]);
    }
}
