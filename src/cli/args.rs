//! Defines the command-line arguments and subcommands for the Arbor CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "arbor",
    version,
    about = "Materialize tagged-array syntax trees into a typed AST and walk them."
)]
pub struct ArborArgs {
    /// Number of worker threads used to process units (default: one per core).
    #[arg(long, global = true)]
    pub jobs: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the materialized AST of each input.
    Ast {
        /// Tagged-tree files, or directories to search for `*.json` files.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// How to render each tree.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Print the node kinds of each input in traversal order.
    Kinds {
        /// Tagged-tree files, or directories to search for `*.json` files.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Materialize every input and report the ones that fail.
    Check {
        /// Tagged-tree files, or directories to search for `*.json` files.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

/// Rendering used by the `ast` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single-line s-expressions.
    Pretty,
    /// Pretty-printed JSON with a `kind` field on every node.
    Json,
}
