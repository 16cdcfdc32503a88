//! Command tree assembly and definition checks.
//!
//! [`CommandTree::new`] freezes a root [`CommandNode`] after checking the
//! structural invariants every later phase relies on: well-formed names,
//! no colliding sibling names or aliases, no two options sharing a
//! spelling anywhere they are visible together, and coherent option
//! declarations. A tree that fails these checks is a programming error and
//! should stop the program at startup.
//!
//! # Examples
//!
//! ```
//! use kubepizza_core::*;
//!
//! let root = CommandNode::new("kubepizza")
//!     .with_option(OptionDef::string("--output").with_alias("-o"))
//!     .with_subcommand(CommandNode::new("order").with_alias("o"));
//! assert!(CommandTree::new(root).is_ok());
//!
//! // Sibling alias collides with another sibling's name
//! let root = CommandNode::new("kubepizza")
//!     .with_subcommand(CommandNode::new("order").with_alias("topping"))
//!     .with_subcommand(CommandNode::new("topping"));
//! assert!(matches!(
//!     CommandTree::new(root),
//!     Err(DefinitionError::DuplicateSubcommand { .. })
//! ));
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::command::{Resolution, path_of};
use crate::{CommandNode, DefinitionError, OptionDef};

/// Spellings that always request help.
pub const HELP_OPTIONS: [&str; 3] = ["--help", "-h", "-?"];

static COMMAND_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("valid regex"));
static LONG_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--[a-z][a-z0-9-]*$").expect("valid regex"));
static SHORT_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-[a-zA-Z]$").expect("valid regex"));

/// A checked, immutable command tree.
#[derive(Debug, Clone)]
pub struct CommandTree {
    root: CommandNode,
}

impl CommandTree {
    /// Checks and freezes a tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`DefinitionError`] found, walking the tree
    /// depth-first in declaration order.
    pub fn new(root: CommandNode) -> Result<Self, DefinitionError> {
        validate_tree(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    /// Program name (the root node's name).
    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// Walks `tokens` (program name excluded) down from the root.
    pub fn resolve<S: AsRef<str>>(&self, tokens: &[S]) -> Resolution<'_> {
        self.root.resolve(tokens)
    }
}

/// Collects the options visible at the last node of `chain`.
///
/// The node's own options come first, then each ancestor's, nearest
/// first. A shared definition reached twice is kept once.
pub(crate) fn visible_options<'a>(chain: &[&'a CommandNode]) -> Vec<&'a OptionDef> {
    let mut visible: Vec<&'a OptionDef> = Vec::new();
    for &node in chain.iter().rev() {
        for option in node.options() {
            let option: &'a OptionDef = option;
            if !visible.iter().any(|seen| std::ptr::eq(*seen, option)) {
                visible.push(option);
            }
        }
    }
    visible
}

fn validate_tree(root: &CommandNode) -> Result<(), DefinitionError> {
    validate_command_name(&root.name)?;
    for alias in &root.aliases {
        validate_command_name(alias)?;
    }
    let mut chain = vec![root];
    validate_node(&mut chain)
}

fn validate_node<'a>(chain: &mut Vec<&'a CommandNode>) -> Result<(), DefinitionError> {
    let node = chain[chain.len() - 1];

    validate_options(chain)?;

    let mut seen: HashSet<&str> = HashSet::new();
    for sub in node.subcommands() {
        validate_command_name(&sub.name)?;
        for alias in &sub.aliases {
            validate_command_name(alias)?;
        }
        for name in sub.names() {
            if !seen.insert(name) {
                return Err(DefinitionError::DuplicateSubcommand {
                    path: path_of(chain),
                    name: name.to_string(),
                });
            }
        }
    }

    for sub in node.subcommands() {
        chain.push(sub);
        validate_node(chain)?;
        chain.pop();
    }

    Ok(())
}

fn validate_command_name(name: &str) -> Result<(), DefinitionError> {
    if name.trim().is_empty() {
        return Err(DefinitionError::EmptyCommandName);
    }
    if !COMMAND_NAME.is_match(name) {
        return Err(DefinitionError::InvalidCommandName(name.to_string()));
    }
    Ok(())
}

fn validate_options(chain: &[&CommandNode]) -> Result<(), DefinitionError> {
    let node = chain[chain.len() - 1];

    for option in node.options() {
        for name in option.names() {
            if HELP_OPTIONS.contains(&name) {
                return Err(DefinitionError::ReservedOptionName(name.to_string()));
            }
            if !LONG_OPTION.is_match(name) && !SHORT_OPTION.is_match(name) {
                return Err(DefinitionError::InvalidOptionName(name.to_string()));
            }
        }
        if option.required && option.has_default() {
            return Err(DefinitionError::RequiredWithDefault(option.name.clone()));
        }
        if option.allowed_values.as_ref().is_some_and(Vec::is_empty) {
            return Err(DefinitionError::EmptyAllowedValues(option.name.clone()));
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for option in visible_options(chain) {
        for name in option.names() {
            if !seen.insert(name) {
                return Err(DefinitionError::DuplicateOption {
                    path: path_of(chain),
                    name: name.to_string(),
                });
            }
        }
    }

    Ok(())
}
