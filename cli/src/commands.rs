//! The `kubepizza` command tree.

use std::sync::Arc;

use kubepizza_catalog::Catalog;
use kubepizza_core::{
    CommandCheck, CommandNode, CommandTree, CompletionSource, DefinitionError, OptionCheck,
    OptionDef, UsageError, split_delimited,
};

use crate::actions::{self, OrderStatus};
use crate::config::Settings;
use crate::output::OutputFormat;

/// First token that turns a command line into a completion query.
pub const SUGGEST_DIRECTIVE: &str = "[suggest]";

/// Most toppings a small pizza takes.
pub const SMALL_PIZZA_MAX_TOPPINGS: usize = 3;

const SIZES: [&str; 3] = ["small", "medium", "large"];

/// Builds the command tree over `catalog`.
///
/// # Errors
///
/// Returns a [`DefinitionError`] if the tree is malformed, which is a bug
/// in this function.
pub fn build_tree(catalog: Arc<Catalog>, settings: &Settings) -> Result<CommandTree, DefinitionError> {
    let output = Arc::new(
        OptionDef::string("--output")
            .with_alias("-o")
            .with_description("Output format")
            .with_value_name("format")
            .with_allowed_values(OutputFormat::NAMES)
            .with_default(OutputFormat::default().as_str()),
    );

    let root = CommandNode::new("kubepizza")
        .with_description("Order pizza from the command line")
        .with_shared_option(&output)
        .with_subcommand(order_command(&catalog, settings))
        .with_subcommand(topping_command(&catalog))
        .with_example("kubepizza order create --pizza margherita")
        .with_example("kubepizza topping list --output json");

    CommandTree::new(root)
}

fn order_command(catalog: &Arc<Catalog>, settings: &Settings) -> CommandNode {
    CommandNode::new("order")
        .with_alias("o")
        .with_description("Create and list orders")
        .with_subcommand(create_command(catalog, settings))
        .with_subcommand(
            CommandNode::new("list")
                .with_description("List recent orders")
                .with_option(
                    OptionDef::string("--status")
                        .with_alias("-s")
                        .with_description("Only show orders in this state")
                        .with_allowed_values(OrderStatus::FILTERS)
                        .with_default("all"),
                )
                .with_action(actions::list_orders)
                .with_example("kubepizza order list --status open"),
        )
}

fn create_command(catalog: &Arc<Catalog>, settings: &Settings) -> CommandNode {
    let pizza = {
        let known = catalog.pizzas().to_vec();
        let catalog = Arc::clone(catalog);
        OptionDef::string("--pizza")
            .with_alias("-p")
            .with_description("Pizza to order")
            .with_value_name("name")
            .required()
            .with_validator(move |check, errors| known_pizza(&catalog, check, errors))
            .with_completions(CompletionSource::Static(known))
    };

    let toppings = {
        let validate = Arc::clone(catalog);
        let suggest = Arc::clone(catalog);
        OptionDef::list("--toppings")
            .with_alias("-t")
            .with_description("Extra toppings, repeated or comma separated")
            .with_value_name("topping")
            .with_tokenizer(split_delimited(','))
            .with_validator(move |check, errors| known_toppings(&validate, check, errors))
            .with_suggestions(move |ctx| {
                let recommended = ctx
                    .values
                    .get_str("--pizza")
                    .map(|pizza| suggest.recommended_toppings(pizza))
                    .unwrap_or_default();
                if recommended.is_empty() {
                    suggest.toppings().to_vec()
                } else {
                    recommended.to_vec()
                }
            })
    };

    let action_catalog = Arc::clone(catalog);
    let send_delay = settings.send_delay();

    CommandNode::new("create")
        .with_description("Place a new order")
        .with_option(pizza)
        .with_option(
            OptionDef::string("--size")
                .with_alias("-s")
                .with_description("Pizza size")
                .with_allowed_values(SIZES)
                .with_default("medium"),
        )
        .with_option(toppings)
        .with_option(
            OptionDef::flag("--delivery")
                .with_alias("-d")
                .with_description("Deliver instead of pick up")
                .with_default(false),
        )
        .with_validator(small_pizza_topping_limit)
        .with_action(move |inv| actions::create_order(inv, &action_catalog, send_delay))
        .with_example("kubepizza order create --pizza margherita")
        .with_example("kubepizza order create -p diavola -s large -t mozzarella,chili --delivery")
        .with_example("kubepizza order create --pizza marinara --toppings garlic --toppings oregano")
}

fn topping_command(catalog: &Arc<Catalog>) -> CommandNode {
    let add_catalog = Arc::clone(catalog);
    let list_catalog = Arc::clone(catalog);

    CommandNode::new("topping")
        .with_alias("t")
        .with_description("Inspect toppings")
        .with_subcommand(
            CommandNode::new("add")
                .with_description("Check a topping against the catalog")
                .with_option(
                    OptionDef::string("--name")
                        .with_alias("-n")
                        .with_description("Topping name")
                        .required()
                        .with_validator(non_blank),
                )
                .with_action(move |inv| actions::add_topping(inv, &add_catalog))
                .with_example("kubepizza topping add --name basil"),
        )
        .with_subcommand(
            CommandNode::new("list")
                .with_description("List toppings and their availability")
                .with_action(move |inv| actions::list_toppings(inv, &list_catalog))
                .with_example("kubepizza topping list"),
        )
}

fn known_pizza(catalog: &Catalog, check: &OptionCheck<'_>, errors: &mut Vec<UsageError>) {
    for value in check.strings() {
        if !catalog.is_known_pizza(value) {
            errors.push(UsageError::ValueNotInAllowedSet {
                option: check.option.name.clone(),
                value: value.to_string(),
                allowed: catalog.pizzas().to_vec(),
            });
        }
    }
}

fn known_toppings(catalog: &Catalog, check: &OptionCheck<'_>, errors: &mut Vec<UsageError>) {
    for value in check.strings() {
        if !catalog.is_known_topping(value) {
            errors.push(UsageError::ValueNotInAllowedSet {
                option: check.option.name.clone(),
                value: value.to_string(),
                allowed: catalog.toppings().to_vec(),
            });
        }
    }
}

fn non_blank(check: &OptionCheck<'_>, errors: &mut Vec<UsageError>) {
    if check.strings().iter().all(|value| value.trim().is_empty()) {
        errors.push(UsageError::rule(format!(
            "option '{}' must not be blank",
            check.option.name
        )));
    }
}

fn small_pizza_topping_limit(check: &CommandCheck<'_>, errors: &mut Vec<UsageError>) {
    let toppings = check.values.get_list("--toppings").len();
    if check.values.get_str("--size") == Some("small") && toppings > SMALL_PIZZA_MAX_TOPPINGS {
        errors.push(UsageError::rule(format!(
            "a small pizza takes at most {SMALL_PIZZA_MAX_TOPPINGS} toppings, got {toppings}"
        )));
    }
}

/// Splits the words after [`SUGGEST_DIRECTIVE`] into the completed words
/// and the partial word being typed.
pub fn split_suggest_args(words: &[String]) -> (&[String], &str) {
    match words.split_last() {
        Some((partial, done)) => (done, partial.as_str()),
        None => (words, ""),
    }
}
