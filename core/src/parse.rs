//! Token parsing and option binding.
//!
//! [`CommandTree::parse`] resolves the deepest command named by the
//! leading tokens, routes the remaining tokens to the options visible at
//! that command, and binds every option. It never runs validators or
//! actions; problems are collected in [`ParseResult::errors`] in the order
//! they were found.

use tracing::debug;

use crate::command::path_of;
use crate::option::{RawTokens, parse_bool};
use crate::tree::{HELP_OPTIONS, visible_options};
use crate::{Arity, CommandNode, CommandTree, OptionDef, ParsedValues, UsageError};

/// Outcome of parsing one command line.
///
/// # Examples
///
/// ```
/// use kubepizza_core::*;
///
/// let tree = CommandTree::new(
///     CommandNode::new("kubepizza")
///         .with_option(OptionDef::string("--output").with_default("table"))
///         .with_subcommand(
///             CommandNode::new("order").with_subcommand(
///                 CommandNode::new("create")
///                     .with_option(OptionDef::string("--pizza").required()),
///             ),
///         ),
/// )
/// .unwrap();
///
/// let result = tree.parse(&["order", "create", "--pizza", "diavola"]);
/// assert!(result.is_ok());
/// assert_eq!(result.path(), "kubepizza order create");
/// assert_eq!(result.values.get_str("--pizza"), Some("diavola"));
/// assert_eq!(result.values.get_str("--output"), Some("table"));
/// ```
#[derive(Debug, Clone)]
pub struct ParseResult<'t> {
    pub(crate) chain: Vec<&'t CommandNode>,
    pub(crate) options: Vec<&'t OptionDef>,
    /// Option that would take the next bare token, if any.
    pending: Option<&'t OptionDef>,
    pub values: ParsedValues,
    pub errors: Vec<UsageError>,
    /// A help option appeared anywhere after the command path.
    pub help_requested: bool,
}

impl<'t> ParseResult<'t> {
    /// The resolved command.
    pub fn node(&self) -> &'t CommandNode {
        self.chain[self.chain.len() - 1]
    }

    /// Resolved command and its ancestors, root first.
    pub fn chain(&self) -> &[&'t CommandNode] {
        &self.chain
    }

    /// Full path of the resolved command.
    pub fn path(&self) -> String {
        path_of(&self.chain)
    }

    /// Options visible at the resolved command, own options first.
    pub fn options(&self) -> &[&'t OptionDef] {
        &self.options
    }

    pub(crate) fn pending_option(&self) -> Option<&'t OptionDef> {
        self.pending
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl CommandTree {
    /// Parses `tokens` (program name excluded) without validating or
    /// invoking anything.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> ParseResult<'_> {
        let resolution = self.resolve(tokens);
        let chain = resolution.chain;
        let node = chain[chain.len() - 1];
        let path = path_of(&chain);
        let options = visible_options(&chain);

        let mut errors = Vec::new();
        let mut help_requested = false;
        let mut raw = vec![RawTokens::default(); options.len()];
        let mut accepting: Option<usize> = None;

        let rest = &tokens[resolution.consumed..];
        let mut i = 0;

        if let Some(first) = rest.first().map(|t| t.as_ref()) {
            if !node.subcommands().is_empty() && !looks_like_option(first) {
                errors.push(UsageError::UnrecognizedSubcommand {
                    token: first.to_string(),
                    path: path.clone(),
                });
                i = 1;
            }
        }

        while i < rest.len() {
            let token = rest[i].as_ref();
            i += 1;

            if HELP_OPTIONS.contains(&token) {
                help_requested = true;
                accepting = None;
                continue;
            }

            let (name, inline) = split_inline_value(token);
            let Some(idx) = options.iter().position(|o| o.matches(name)) else {
                match accepting {
                    Some(idx) if !looks_like_option(token) => {
                        // Value for a multi-valued option after `--name=value`.
                        raw[idx].tokens.push(token.to_string());
                    }
                    _ => {
                        errors.push(UsageError::UnrecognizedArgument {
                            token: token.to_string(),
                            path: path.clone(),
                        });
                        accepting = None;
                    }
                }
                continue;
            };

            let option = options[idx];
            let slot = &mut raw[idx];
            slot.present = true;
            accepting = None;

            if let Some(value) = inline {
                slot.tokens.push(value.to_string());
                if option.arity.is_multi() {
                    accepting = Some(idx);
                }
                continue;
            }

            let next = rest.get(i).map(|t| t.as_ref());
            match option.arity {
                Arity::ExactlyOne => match next {
                    Some(value) if !looks_like_option(value) => {
                        slot.tokens.push(value.to_string());
                        i += 1;
                    }
                    _ => accepting = Some(idx),
                },
                Arity::ZeroOrOne => match next {
                    Some(value) if accepts_optional_value(option, value) => {
                        slot.tokens.push(value.to_string());
                        i += 1;
                    }
                    _ => {
                        if option.takes_value() {
                            accepting = Some(idx);
                        } else {
                            // A bare flag is an explicit `true` for last-write-wins.
                            slot.tokens.push("true".to_string());
                        }
                    }
                },
                Arity::ZeroOrMore => {
                    while let Some(value) = rest.get(i).map(|t| t.as_ref()) {
                        if looks_like_option(value) || HELP_OPTIONS.contains(&value) {
                            break;
                        }
                        slot.tokens.push(value.to_string());
                        i += 1;
                    }
                    accepting = Some(idx);
                }
            }
        }

        let mut values = ParsedValues::default();
        for (option, slot) in options.iter().zip(&raw) {
            option.bind(slot, &mut values, &mut errors);
        }

        debug!(
            path = %path,
            bound = values.len(),
            errors = errors.len(),
            help = help_requested,
            "parsed command line"
        );

        ParseResult {
            pending: accepting.map(|idx| options[idx]),
            chain,
            options,
            values,
            errors,
            help_requested,
        }
    }
}

/// Returns `true` for tokens spelled like an option name.
pub(crate) fn looks_like_option(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Splits `--name=value` into its name and inline value.
fn split_inline_value(token: &str) -> (&str, Option<&str>) {
    if token.starts_with("--") {
        if let Some((name, value)) = token.split_once('=') {
            return (name, Some(value));
        }
    }
    (token, None)
}

fn accepts_optional_value(option: &OptionDef, token: &str) -> bool {
    if option.takes_value() {
        !looks_like_option(token)
    } else {
        parse_bool(token).is_some()
    }
}
