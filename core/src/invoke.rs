//! Running a command line end to end.
//!
//! [`CommandTree::run`] is the whole pipeline: parse, show help if asked,
//! validate, then either report every error or run the resolved node's
//! action. Output produced by help and actions goes to the caller's
//! writer; usage errors are handed back untouched so the caller decides
//! where they go.

use std::io::Write;

use tracing::{debug, info};

use crate::{ActionError, CancelToken, CommandNode, CommandTree, ParseResult, ParsedValues, UsageError};

/// What an action receives.
pub struct Invocation<'a> {
    /// Full path of the running command.
    pub path: String,
    pub node: &'a CommandNode,
    pub values: &'a ParsedValues,
    pub cancel: &'a CancelToken,
    pub out: &'a mut dyn Write,
}

/// How a command line ended, short of an action failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action ran to completion.
    Completed,
    /// Help was requested and written.
    Help,
    /// The line resolved to a node without an action; its help was written.
    Routed,
    /// Parsing or validation failed; nothing ran.
    Rejected(Vec<UsageError>),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

impl CommandNode {
    /// Runs this node's action against a parse resolved to it.
    ///
    /// The action runs only when `result` carries no errors; otherwise the
    /// errors come back as [`Outcome::Rejected`]. A node without an action
    /// does nothing and reports [`Outcome::Routed`].
    ///
    /// # Errors
    ///
    /// Whatever the action returns.
    pub fn invoke(
        &self,
        result: &ParseResult<'_>,
        cancel: &CancelToken,
        out: &mut dyn Write,
    ) -> Result<Outcome, ActionError> {
        if !result.is_ok() {
            return Ok(Outcome::Rejected(result.errors.clone()));
        }
        let Some(action) = self.action() else {
            return Ok(Outcome::Routed);
        };

        let mut invocation = Invocation {
            path: result.path(),
            node: self,
            values: &result.values,
            cancel,
            out,
        };
        info!(path = %invocation.path, "running command");
        action(&mut invocation)?;
        debug!(path = %invocation.path, "command finished");
        Ok(Outcome::Completed)
    }
}

impl CommandTree {
    /// Parses, validates and runs `tokens` (program name excluded).
    ///
    /// Help wins over everything else: a help option anywhere after the
    /// command path prints the resolved node's help, even when other
    /// tokens are wrong.
    ///
    /// # Errors
    ///
    /// Returns the action's error, or [`ActionError::Io`] when writing help
    /// fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Write;
    ///
    /// use kubepizza_core::*;
    ///
    /// let tree = CommandTree::new(
    ///     CommandNode::new("kubepizza").with_subcommand(
    ///         CommandNode::new("greet")
    ///             .with_option(OptionDef::string("--name").required())
    ///             .with_action(|inv| {
    ///                 let name = inv.values.get_str("--name").unwrap_or_default();
    ///                 writeln!(inv.out, "hello {name}")?;
    ///                 Ok(())
    ///             }),
    ///     ),
    /// )
    /// .unwrap();
    ///
    /// let mut out = Vec::new();
    /// let outcome = tree.run(&["greet", "--name", "world"], &CancelToken::new(), &mut out).unwrap();
    /// assert_eq!(outcome, Outcome::Completed);
    /// assert_eq!(String::from_utf8(out).unwrap(), "hello world\n");
    ///
    /// let outcome = tree.run(&["greet"], &CancelToken::new(), &mut Vec::new()).unwrap();
    /// assert!(matches!(outcome, Outcome::Rejected(errors) if errors.len() == 1));
    /// ```
    pub fn run<S: AsRef<str>>(
        &self,
        tokens: &[S],
        cancel: &CancelToken,
        out: &mut dyn Write,
    ) -> Result<Outcome, ActionError> {
        let mut result = self.parse(tokens);
        let node = result.node();

        if result.help_requested {
            out.write_all(result.help().as_bytes())?;
            return Ok(Outcome::Help);
        }

        result.validate();
        if !result.is_ok() {
            debug!(path = %result.path(), errors = result.errors.len(), "command line rejected");
            return Ok(Outcome::Rejected(result.errors));
        }

        if node.action().is_none() {
            out.write_all(result.help().as_bytes())?;
            return Ok(Outcome::Routed);
        }

        node.invoke(&result, cancel, out)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::OptionDef;

    fn tree(calls: Arc<AtomicUsize>) -> CommandTree {
        CommandTree::new(
            CommandNode::new("kubepizza").with_subcommand(
                CommandNode::new("order").with_subcommand(
                    CommandNode::new("create")
                        .with_option(OptionDef::string("--pizza").required())
                        .with_option(OptionDef::string("--size").with_default("medium"))
                        .with_action(move |inv| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            inv.cancel.check()?;
                            writeln!(
                                inv.out,
                                "{} {}",
                                inv.values.get_str("--pizza").unwrap_or_default(),
                                inv.values.get_str("--size").unwrap_or_default()
                            )?;
                            Ok(())
                        }),
                ),
            ),
        )
        .unwrap()
    }

    fn run(tree: &CommandTree, tokens: &[&str]) -> (Result<Outcome, ActionError>, String) {
        let mut out = Vec::new();
        let outcome = tree.run(tokens, &CancelToken::new(), &mut out);
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_action_runs_with_bound_values() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tree = tree(Arc::clone(&calls));
        let (outcome, out) = run(&tree, &["order", "create", "--pizza", "diavola"]);
        assert_eq!(outcome.unwrap(), Outcome::Completed);
        assert_eq!(out, "diavola medium\n");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_errors_prevent_action() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tree = tree(Arc::clone(&calls));
        let (outcome, out) = run(&tree, &["order", "create", "--colour", "red"]);
        match outcome.unwrap() {
            Outcome::Rejected(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(out.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_help_wins_over_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tree = tree(Arc::clone(&calls));
        let (outcome, out) = run(&tree, &["order", "create", "--bogus", "-h"]);
        assert_eq!(outcome.unwrap(), Outcome::Help);
        assert!(out.contains("kubepizza order create [options]"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_router_prints_its_help() {
        let tree = tree(Arc::new(AtomicUsize::new(0)));
        let (outcome, out) = run(&tree, &["order"]);
        assert_eq!(outcome.unwrap(), Outcome::Routed);
        assert!(out.contains("Commands:"));
    }

    #[test]
    fn test_cancelled_action_reports_cancel() {
        let tree = tree(Arc::new(AtomicUsize::new(0)));
        let cancel = CancelToken::new();
        cancel.cancel();
        let outcome = tree.run(&["order", "create", "--pizza", "x"], &cancel, &mut Vec::new());
        assert!(matches!(outcome, Err(ActionError::Cancelled)));
    }

    #[test]
    fn test_invoke_on_router_does_nothing() {
        let tree = tree(Arc::new(AtomicUsize::new(0)));
        let result = tree.parse(&["order"]);
        let outcome = result
            .node()
            .invoke(&result, &CancelToken::new(), &mut Vec::new())
            .unwrap();
        assert_eq!(outcome, Outcome::Routed);
    }
}
