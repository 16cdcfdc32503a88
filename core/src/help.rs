//! Help text for a command node.

use crate::command::{Resolution, path_of};
use crate::tree::visible_options;
use crate::{Arity, CommandNode, OptionDef, ParseResult};

const HELP_LABEL: &str = "-?, -h, --help";
const HELP_DESCRIPTION: &str = "Show help and usage information";

/// Renders help for the last node of `chain` (root first).
///
/// Sections appear in a fixed order and empty ones are skipped:
/// description, usage, options (own, then inherited, then the help
/// option), commands and examples.
///
/// # Examples
///
/// ```
/// use kubepizza_core::*;
///
/// let tree = CommandTree::new(
///     CommandNode::new("kubepizza").with_subcommand(
///         CommandNode::new("create")
///             .with_description("Create an order")
///             .with_option(OptionDef::string("--pizza").with_alias("-p").required())
///             .with_example("kubepizza create --pizza margherita"),
///     ),
/// )
/// .unwrap();
///
/// let help = tree.resolve(&["create"]).help();
/// assert!(help.contains("kubepizza create [options]"));
/// assert!(help.contains("-p, --pizza <pizza> (REQUIRED)"));
/// assert!(help.contains("  kubepizza create --pizza margherita"));
/// ```
pub fn render_help(chain: &[&CommandNode]) -> String {
    let node = chain[chain.len() - 1];
    let mut out = String::new();

    if let Some(ref desc) = node.description {
        out.push_str(&format!("Description:\n  {desc}\n\n"));
    }

    out.push_str("Usage:\n");
    out.push_str(&format!("  {}", path_of(chain)));
    if !node.subcommands().is_empty() {
        out.push_str(" [command]");
    }
    out.push_str(" [options]\n");

    let mut rows: Vec<(String, String)> = visible_options(chain)
        .into_iter()
        .map(|option| (option_label(option), option_description(option)))
        .collect();
    rows.push((HELP_LABEL.to_string(), HELP_DESCRIPTION.to_string()));
    out.push_str("\nOptions:\n");
    push_rows(&mut out, &rows);

    if !node.subcommands().is_empty() {
        let rows: Vec<(String, String)> = node
            .subcommands()
            .iter()
            .map(|sub| {
                let desc = sub.description.clone().unwrap_or_default();
                (sub.names().collect::<Vec<_>>().join(", "), desc)
            })
            .collect();
        out.push_str("\nCommands:\n");
        push_rows(&mut out, &rows);
    }

    if !node.examples().is_empty() {
        out.push_str("\nExamples:\n");
        for example in node.examples() {
            out.push_str(&format!("  {example}\n"));
        }
    }

    out
}

impl Resolution<'_> {
    /// Help for the resolved node.
    pub fn help(&self) -> String {
        render_help(&self.chain)
    }
}

impl ParseResult<'_> {
    /// Help for the resolved node.
    pub fn help(&self) -> String {
        render_help(self.chain())
    }
}

fn push_rows(out: &mut String, rows: &[(String, String)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(4);
    for (label, desc) in rows {
        if desc.is_empty() {
            out.push_str(&format!("  {label}\n"));
        } else {
            out.push_str(&format!("  {:<width$}  {desc}\n", label, width = width));
        }
    }
}

/// e.g. `-t, --toppings <toppings>...`
fn option_label(option: &OptionDef) -> String {
    let (short, long): (Vec<&str>, Vec<&str>) = option.names().partition(|n| !n.starts_with("--"));
    let mut label = short.into_iter().chain(long).collect::<Vec<_>>().join(", ");

    if option.takes_value() {
        let value = option.value_label();
        match option.arity {
            Arity::ExactlyOne => label.push_str(&format!(" <{value}>")),
            Arity::ZeroOrOne => label.push_str(&format!(" [<{value}>]")),
            Arity::ZeroOrMore => label.push_str(&format!(" <{value}>...")),
        }
    } else if option.arity == Arity::ZeroOrOne {
        label.push_str(" [<true|false>]");
    }
    if option.required {
        label.push_str(" (REQUIRED)");
    }
    label
}

fn option_description(option: &OptionDef) -> String {
    let mut desc = option.description.clone().unwrap_or_default();
    if let Some(default) = option.default_value() {
        if !desc.is_empty() {
            desc.push(' ');
        }
        desc.push_str(&format!("[default: {default}]"));
    }
    desc
}

#[cfg(test)]
mod tests {
    use crate::{CommandNode, CommandTree, OptionDef};

    fn tree() -> CommandTree {
        CommandTree::new(
            CommandNode::new("kubepizza")
                .with_description("Order pizza from the command line")
                .with_option(
                    OptionDef::string("--output")
                        .with_alias("-o")
                        .with_description("Output format")
                        .with_allowed_values(["table", "json", "yaml"])
                        .with_default("table"),
                )
                .with_subcommand(
                    CommandNode::new("order")
                        .with_alias("o")
                        .with_description("Manage orders")
                        .with_subcommand(
                            CommandNode::new("create")
                                .with_description("Create an order")
                                .with_option(
                                    OptionDef::string("--pizza")
                                        .with_alias("-p")
                                        .with_description("Pizza to order")
                                        .required(),
                                )
                                .with_option(OptionDef::list("--toppings").with_alias("-t"))
                                .with_option(
                                    OptionDef::flag("--delivery").with_default(false),
                                )
                                .with_example("kubepizza order create --pizza margherita")
                                .with_example("kubepizza order create -p diavola -t chili,salami"),
                        ),
                ),
        )
        .unwrap()
    }

    #[test]
    fn test_leaf_help_lists_examples_and_markers() {
        let tree = tree();
        let help = tree.resolve(&["order", "create"]).help();

        assert!(help.starts_with("Description:\n  Create an order\n"));
        assert!(help.contains("Usage:\n  kubepizza order create [options]\n"));
        assert!(help.contains("-p, --pizza <pizza> (REQUIRED)"));
        assert!(help.contains("-t, --toppings <toppings>..."));
        assert!(help.contains("--delivery [<true|false>]"));
        assert!(help.contains("[default: false]"));
        assert!(help.contains("Output format [default: table]"));
        assert!(help.contains("-?, -h, --help"));
        assert!(help.contains("Examples:\n  kubepizza order create --pizza margherita\n"));
        assert!(help.contains("  kubepizza order create -p diavola -t chili,salami\n"));
        assert!(!help.contains("Commands:"));
    }

    #[test]
    fn test_router_help_lists_commands() {
        let tree = tree();
        let help = tree.resolve(&["o"]).help();

        assert!(help.contains("kubepizza order [command] [options]"));
        assert!(help.contains("Commands:\n  create  Create an order\n"));
        assert!(!help.contains("Examples:"));
    }

    #[test]
    fn test_own_options_come_before_inherited() {
        let tree = tree();
        let help = tree.resolve(&["order", "create"]).help();
        let pizza = help.find("--pizza").unwrap();
        let output = help.find("--output").unwrap();
        let help_line = help.find("--help").unwrap();
        assert!(pizza < output);
        assert!(output < help_line);
    }

    #[test]
    fn test_root_help_shows_aliases() {
        let help = tree().resolve(&[] as &[&str]).help();
        assert!(help.contains("  order, o  Manage orders\n"));
    }
}
