//! The `kubepizza` command line: command tree, actions, output and
//! settings.
//!
//! The binary is a thin shell over [`build_tree`]; everything it does can
//! be driven from tests through [`kubepizza_core::CommandTree::run`] and
//! [`kubepizza_core::CommandTree::complete`].

pub mod actions;
pub mod commands;
pub mod config;
pub mod output;

pub use commands::{SUGGEST_DIRECTIVE, build_tree, split_suggest_args};
pub use config::Settings;
pub use output::OutputFormat;
