//! Two-tier validation of a parsed command line.
//!
//! Per-option validators run first, in option declaration order, over every
//! bound value. Command-level validators of the resolved command run next,
//! over the whole bound set. Both tiers always run, so one pass reports
//! every problem the user can fix.

use tracing::debug;

use crate::{CommandNode, OptionDef, ParseResult, ParsedValues, Value};

/// Input to a per-option validator.
#[derive(Debug, Clone, Copy)]
pub struct OptionCheck<'a> {
    /// Command the line resolved to.
    pub node: &'a CommandNode,
    pub option: &'a OptionDef,
    /// The option's bound value.
    pub value: &'a Value,
    /// Every bound value, for cross-checks.
    pub values: &'a ParsedValues,
}

impl OptionCheck<'_> {
    /// Strings carried by the bound value.
    pub fn strings(&self) -> Vec<&str> {
        self.value.strings()
    }
}

/// Input to a command-level validator.
#[derive(Debug, Clone, Copy)]
pub struct CommandCheck<'a> {
    pub node: &'a CommandNode,
    pub values: &'a ParsedValues,
}

impl ParseResult<'_> {
    /// Runs both validator tiers, appending to [`errors`](ParseResult::errors).
    ///
    /// # Examples
    ///
    /// ```
    /// use kubepizza_core::*;
    ///
    /// let tree = CommandTree::new(
    ///     CommandNode::new("kubepizza").with_subcommand(
    ///         CommandNode::new("create")
    ///             .with_option(OptionDef::string("--size").with_default("medium"))
    ///             .with_option(OptionDef::list("--toppings"))
    ///             .with_validator(|check, errors| {
    ///                 if check.values.get_str("--size") == Some("small")
    ///                     && check.values.get_list("--toppings").len() > 3
    ///                 {
    ///                     errors.push(UsageError::rule("too many toppings for a small pizza"));
    ///                 }
    ///             }),
    ///     ),
    /// )
    /// .unwrap();
    ///
    /// let mut result = tree.parse(&["create", "--size", "small", "--toppings", "a", "b", "c", "d"]);
    /// result.validate();
    /// assert_eq!(result.errors, vec![UsageError::rule("too many toppings for a small pizza")]);
    /// ```
    pub fn validate(&mut self) {
        let before = self.errors.len();
        let node = self.node();

        for &option in &self.options {
            let Some(value) = self.values.get(&option.name) else {
                continue;
            };
            let check = OptionCheck {
                node,
                option,
                value,
                values: &self.values,
            };
            for validator in &option.validators {
                validator(&check, &mut self.errors);
            }
        }

        let check = CommandCheck {
            node,
            values: &self.values,
        };
        for validator in node.validators() {
            validator(&check, &mut self.errors);
        }

        debug!(
            path = %self.path(),
            added = self.errors.len() - before,
            "validation finished"
        );
    }
}
