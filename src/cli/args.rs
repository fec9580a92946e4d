//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Build complete binary trees from a root value and two child rules
#[derive(Parser, Debug)]
#[command(name = "bintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a tree and print it
    Build {
        #[command(flatten)]
        tree: TreeArgs,
        /// Render the associative (value/left/right mapping) form
        #[arg(long)]
        assoc: bool,
    },

    /// Print node values in level order
    Flatten {
        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Print the number of levels
    Height {
        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Print the number of nodes
    Count {
        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Print leaf values in level order
    Leaves {
        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Tree parameters; unset values come from the loaded settings.
#[derive(Args, Debug, Clone, Default)]
pub struct TreeArgs {
    /// Number of levels, root counts as level 1
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<i64>,

    /// Root value
    #[arg(long, allow_negative_numbers = true)]
    pub root: Option<i128>,

    /// Left child rule, e.g. cube, mul:2, affine:2:-1
    #[arg(long)]
    pub left: Option<String>,

    /// Right child rule, e.g. double-minus-one, add:3
    #[arg(long)]
    pub right: Option<String>,

    /// Cache rule results for repeated parent values
    #[arg(long)]
    pub memoize: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Print the global config file location
    Path,
}
