//! Command nodes and tree resolution.
//!
//! A [`CommandNode`] is one addressable point in a command tree (e.g.
//! `kubepizza order create`). It owns its options, command-level
//! validators, child nodes, an optional terminal action and the help
//! examples curated for its path. Nodes are assembled bottom-up with
//! builder methods and frozen by [`CommandTree::new`](crate::CommandTree::new).

use std::fmt;
use std::sync::Arc;

use crate::invoke::Invocation;
use crate::validate::CommandCheck;
use crate::{ActionError, OptionDef, UsageError};

/// Command-level check over the fully bound option set.
pub type CommandValidator = Arc<dyn Fn(&CommandCheck<'_>, &mut Vec<UsageError>) + Send + Sync>;

/// Terminal action of a command.
pub type Action = Arc<dyn Fn(&mut Invocation<'_>) -> Result<(), ActionError> + Send + Sync>;

/// One node of a command tree.
///
/// # Examples
///
/// ```
/// use kubepizza_core::{CommandNode, OptionDef};
///
/// let order = CommandNode::new("order")
///     .with_alias("o")
///     .with_description("Manage orders")
///     .with_subcommand(
///         CommandNode::new("create")
///             .with_option(OptionDef::string("--pizza").required()),
///     );
///
/// assert!(order.matches("o"));
/// assert!(order.is_router());
/// assert_eq!(order.find_subcommand("create").unwrap().name, "create");
/// assert!(order.find_subcommand("delete").is_none());
/// ```
#[derive(Clone)]
pub struct CommandNode {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: Option<String>,
    options: Vec<Arc<OptionDef>>,
    subcommands: Vec<CommandNode>,
    action: Option<Action>,
    validators: Vec<CommandValidator>,
    examples: Vec<String>,
}

impl CommandNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            description: None,
            options: Vec::new(),
            subcommands: Vec::new(),
            action: None,
            validators: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Declares an option owned by this node.
    pub fn with_option(mut self, option: OptionDef) -> Self {
        self.options.push(Arc::new(option));
        self
    }

    /// Declares an option definition shared with other nodes.
    ///
    /// The same definition seen again along a node's ancestry is bound
    /// once.
    pub fn with_shared_option(mut self, option: &Arc<OptionDef>) -> Self {
        self.options.push(Arc::clone(option));
        self
    }

    pub fn with_subcommand(mut self, sub: CommandNode) -> Self {
        self.subcommands.push(sub);
        self
    }

    /// Adds a command-level validator. Validators run in the order added.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&CommandCheck<'_>, &mut Vec<UsageError>) + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Invocation<'_>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Registers an example command line shown in this node's help.
    pub fn with_example(mut self, example: &str) -> Self {
        self.examples.push(example.to_string());
        self
    }

    /// Checks whether `token` is this node's name or one of its aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }

    /// Name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Finds a child by name or alias; the first declared match wins.
    pub fn find_subcommand(&self, token: &str) -> Option<&CommandNode> {
        self.subcommands.iter().find(|s| s.matches(token))
    }

    pub fn subcommands(&self) -> &[CommandNode] {
        &self.subcommands
    }

    /// Options declared directly on this node.
    pub fn options(&self) -> &[Arc<OptionDef>] {
        &self.options
    }

    pub fn validators(&self) -> &[CommandValidator] {
        &self.validators
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// A node with children and no action of its own.
    pub fn is_router(&self) -> bool {
        self.action.is_none() && !self.subcommands.is_empty()
    }

    /// Walks `tokens` down from this node.
    ///
    /// `tokens` start after this node's own name. Each token naming a
    /// child of the current node is consumed; resolution stops at the
    /// first token that does not.
    ///
    /// # Examples
    ///
    /// ```
    /// use kubepizza_core::CommandNode;
    ///
    /// let root = CommandNode::new("kubepizza").with_subcommand(
    ///     CommandNode::new("order")
    ///         .with_alias("o")
    ///         .with_subcommand(CommandNode::new("create")),
    /// );
    ///
    /// let resolution = root.resolve(&["o", "create", "--pizza", "margherita"]);
    /// assert_eq!(resolution.path(), "kubepizza order create");
    /// assert_eq!(resolution.consumed, 2);
    /// ```
    pub fn resolve<'a, S: AsRef<str>>(&'a self, tokens: &[S]) -> Resolution<'a> {
        let mut chain = vec![self];
        let mut current = self;
        let mut consumed = 0;

        for token in tokens {
            match current.find_subcommand(token.as_ref()) {
                Some(child) => {
                    chain.push(child);
                    current = child;
                    consumed += 1;
                }
                None => break,
            }
        }

        Resolution { chain, consumed }
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("options", &self.options)
            .field("subcommands", &self.subcommands)
            .field("has_action", &self.action.is_some())
            .field("validators", &self.validators.len())
            .field("examples", &self.examples)
            .finish()
    }
}

/// Outcome of walking tokens down a command tree.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// Matched nodes from the starting node to the deepest match.
    pub chain: Vec<&'a CommandNode>,
    /// Number of tokens consumed as subcommand names.
    pub consumed: usize,
}

impl<'a> Resolution<'a> {
    /// The deepest matched node.
    pub fn node(&self) -> &'a CommandNode {
        self.chain[self.chain.len() - 1]
    }

    /// Full path of the deepest matched node.
    pub fn path(&self) -> String {
        path_of(&self.chain)
    }
}

/// Joins node names with single spaces.
pub(crate) fn path_of(chain: &[&CommandNode]) -> String {
    chain
        .iter()
        .map(|node| node.name.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
