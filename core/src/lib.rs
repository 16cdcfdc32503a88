//! Command tree engine: resolution, option binding, validation, completion
//! and help.
//!
//! This crate models a CLI as a tree of named commands:
//!
//! - [`CommandNode`]: a command with aliases, options, child commands,
//!   command-level validators, an optional action and help examples.
//! - [`OptionDef`]: an option with a value type, arity, default supplier,
//!   allowed values, tokenizer, validators and completion sources.
//! - [`CommandTree`]: a checked, immutable root. Construction fails with a
//!   [`DefinitionError`] when names collide or definitions are incoherent.
//!
//! A command line flows through [`CommandTree::parse`] (resolution and
//! binding), [`ParseResult::validate`] (per-option, then command-level
//! checks) and [`CommandNode::invoke`]; [`CommandTree::run`] chains all of
//! them. [`CommandTree::complete`] answers completion queries from the same
//! parse without validating.
//!
//! # Example
//!
//! ```
//! use kubepizza_core::*;
//!
//! let tree = CommandTree::new(
//!     CommandNode::new("kubepizza")
//!         .with_option(
//!             OptionDef::string("--output")
//!                 .with_allowed_values(["table", "json", "yaml"])
//!                 .with_default("table"),
//!         )
//!         .with_subcommand(
//!             CommandNode::new("order").with_subcommand(
//!                 CommandNode::new("create")
//!                     .with_option(OptionDef::string("--pizza").required())
//!                     .with_option(
//!                         OptionDef::list("--toppings").with_tokenizer(split_delimited(',')),
//!                     ),
//!             ),
//!         ),
//! )
//! .unwrap();
//!
//! let mut result = tree.parse(&[
//!     "order", "create", "--pizza", "diavola", "--toppings", "mozzarella,chili", "--output", "JSON",
//! ]);
//! result.validate();
//!
//! assert!(result.is_ok());
//! assert_eq!(result.values.get_list("--toppings"), ["mozzarella", "chili"]);
//! assert_eq!(result.values.get_str("--output"), Some("json"));
//! ```

mod cancel;
mod command;
mod complete;
mod error;
mod help;
mod invoke;
mod option;
mod parse;
mod tree;
mod types;
mod validate;

pub use cancel::CancelToken;
pub use command::{Action, CommandNode, CommandValidator, Resolution};
pub use complete::{CompletionContext, CompletionSource, SuggestFn};
pub use error::{ActionError, DefinitionError, UsageError};
pub use help::render_help;
pub use invoke::{Invocation, Outcome};
pub use option::{DefaultValue, OptionDef, OptionValidator, Tokenizer, split_delimited};
pub use parse::ParseResult;
pub use tree::{CommandTree, HELP_OPTIONS};
pub use types::*;
pub use validate::{CommandCheck, OptionCheck};
