//! Completion of partially typed command lines.
//!
//! Completion is a read-only query: it parses the words typed so far, works
//! out whether the cursor sits in an option value or a name position, and
//! returns filtered, deduplicated, ranked candidates. It never validates
//! and never fails; an empty list is a normal answer.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::parse::looks_like_option;
use crate::{CommandNode, CommandTree, OptionDef, ParsedValues};

/// Computes candidates from the command line typed so far.
pub type SuggestFn = Arc<dyn Fn(&CompletionContext<'_>) -> Vec<String> + Send + Sync>;

/// Where an option's completion candidates come from.
#[derive(Clone)]
pub enum CompletionSource {
    /// Fixed candidates.
    Static(Vec<String>),
    /// Candidates derived from the context. Values already supplied for the
    /// same option are dropped from its output.
    Contextual(SuggestFn),
}

impl CompletionSource {
    /// Creates a static source.
    pub fn values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Static(values.into_iter().map(Into::into).collect())
    }

    fn candidates(&self, ctx: &CompletionContext<'_>) -> Vec<String> {
        match self {
            Self::Static(values) => values.clone(),
            Self::Contextual(provider) => provider(ctx),
        }
    }
}

impl fmt::Debug for CompletionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(values) => f.debug_tuple("Static").field(values).finish(),
            Self::Contextual(_) => f.write_str("Contextual(..)"),
        }
    }
}

/// What a completion source can see.
#[derive(Debug, Clone, Copy)]
pub struct CompletionContext<'a> {
    /// Text typed so far for the current word.
    pub partial: &'a str,
    /// Command the line resolved to.
    pub node: &'a CommandNode,
    /// Option whose value is being completed.
    pub option: &'a OptionDef,
    /// Values bound from the words before the cursor.
    pub values: &'a ParsedValues,
}

impl OptionDef {
    /// Suggests values for this option.
    ///
    /// The allowed set (if any) comes first, then each source in
    /// declaration order.
    pub fn suggest(&self, ctx: &CompletionContext<'_>) -> Vec<String> {
        let already_bound: Vec<&str> = if ctx.values.is_explicit(&self.name) {
            ctx.values
                .get(&self.name)
                .map(|value| value.strings())
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        let mut candidates: Vec<String> = self.allowed_values.clone().unwrap_or_default();
        for source in &self.completions {
            let mut found = source.candidates(ctx);
            if matches!(source, CompletionSource::Contextual(_)) {
                found.retain(|c| !already_bound.iter().any(|b| b.eq_ignore_ascii_case(c)));
            }
            candidates.extend(found);
        }

        rank(candidates, ctx.partial)
    }
}

impl CommandTree {
    /// Completes the word after `words` (program name excluded).
    ///
    /// # Examples
    ///
    /// ```
    /// use kubepizza_core::*;
    ///
    /// let tree = CommandTree::new(
    ///     CommandNode::new("kubepizza").with_subcommand(
    ///         CommandNode::new("create").with_option(
    ///             OptionDef::string("--size").with_allowed_values(["small", "medium", "large"]),
    ///         ),
    ///     ),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(tree.complete(&["create", "--size"], "la"), vec!["large"]);
    /// assert_eq!(tree.complete(&["create", "--size"], "m"), vec!["medium", "small"]);
    /// assert_eq!(tree.complete::<&str>(&[], "cr"), vec!["create"]);
    /// ```
    pub fn complete<S: AsRef<str>>(&self, words: &[S], partial: &str) -> Vec<String> {
        let result = self.parse(words);
        let node = result.node();

        if let Some(option) = result.pending_option() {
            if !partial.starts_with('-') {
                let ctx = CompletionContext {
                    partial,
                    node,
                    option,
                    values: &result.values,
                };
                let suggestions = option.suggest(&ctx);
                debug!(
                    path = %result.path(),
                    option = %option.name,
                    count = suggestions.len(),
                    "completed option value"
                );
                return suggestions;
            }
        }

        let mut names: Vec<String> = Vec::new();
        let at_command_position = self.resolve(words).consumed == words.len();
        if at_command_position && !looks_like_option(partial) {
            names.extend(node.subcommands().iter().map(|sub| sub.name.clone()));
        }
        for option in result.options() {
            if option.arity.is_multi() || !result.values.is_explicit(&option.name) {
                names.push(option.name.clone());
            }
        }

        let mut suggestions = rank(names, partial);
        suggestions.sort();
        debug!(path = %result.path(), count = suggestions.len(), "completed names");
        suggestions
    }
}

/// Keeps case-insensitive substring matches of `partial`, drops repeats
/// (first spelling wins) and moves prefix matches ahead of the rest.
fn rank(candidates: Vec<String>, partial: &str) -> Vec<String> {
    let needle = partial.to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let (mut prefixed, rest): (Vec<String>, Vec<String>) = candidates
        .into_iter()
        .filter(|c| c.to_lowercase().contains(&needle))
        .filter(|c| seen.insert(c.to_lowercase()))
        .partition(|c| c.to_lowercase().starts_with(&needle));
    prefixed.extend(rest);
    prefixed
}
