//! The Arbor command-line interface.
//!
//! A thin driver: discover inputs, run them through the pipeline in
//! parallel, and print each unit's result in input order.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::warn;

use crate::ast::NodeKind;
use crate::cli::args::{ArborArgs, Command, OutputFormat};
use crate::diagnostics::ArborError;
use crate::discovery::{discover_inputs, load_unit};
use crate::logging;
use crate::pipeline::{process_units, SourceUnit, UnitOutcome};
use crate::syntax::JsonTreeParser;
use crate::visit::{Accept, Visitor};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    logging::init_tracing();
    let args = ArborArgs::parse();

    if let Some(jobs) = args.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            warn!(error = %e, "could not size the worker pool");
        }
    }

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Ast { paths, format } => handle_ast(&paths, format),
        Command::Kinds { paths } => handle_kinds(&paths),
        Command::Check { paths } => handle_check(&paths),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            output::print_error(e);
            process::exit(1);
        }
    }
}

// ============================================================================
// SUBCOMMANDS
// ============================================================================

/// Handles the `ast` subcommand. Returns whether every unit succeeded.
fn handle_ast(paths: &[PathBuf], format: OutputFormat) -> Result<bool, ArborError> {
    let outcomes = run_pipeline(paths)?;
    let mut all_ok = true;
    for UnitOutcome { name, result } in outcomes {
        output::print_header(&name);
        match result {
            Ok(node) => match format {
                OutputFormat::Pretty => println!("{}", node.pretty()),
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&node)
                        .unwrap_or_else(|e| format!("<unserializable tree: {e}>"));
                    println!("{json}");
                }
            },
            Err(e) => {
                all_ok = false;
                output::print_error(e);
            }
        }
    }
    Ok(all_ok)
}

/// Handles the `kinds` subcommand.
fn handle_kinds(paths: &[PathBuf]) -> Result<bool, ArborError> {
    let outcomes = run_pipeline(paths)?;
    let mut all_ok = true;
    for UnitOutcome { name, result } in outcomes {
        output::print_header(&name);
        match result {
            Ok(node) => {
                let mut trace = KindTrace::default();
                node.accept(&mut trace);
                let kinds: Vec<_> = trace.kinds.iter().map(NodeKind::as_str).collect();
                println!("{}", kinds.join(" "));
            }
            Err(e) => {
                all_ok = false;
                output::print_error(e);
            }
        }
    }
    Ok(all_ok)
}

/// Handles the `check` subcommand.
fn handle_check(paths: &[PathBuf]) -> Result<bool, ArborError> {
    let outcomes = run_pipeline(paths)?;
    let total = outcomes.len();
    let mut failed = 0;
    for UnitOutcome { name, result } in outcomes {
        match result {
            Ok(node) => {
                let mut trace = KindTrace::default();
                node.accept(&mut trace);
                output::print_ok(&name, trace.kinds.len());
            }
            Err(e) => {
                failed += 1;
                output::print_failed(&name);
                output::print_error(e);
            }
        }
    }
    output::print_summary(total, failed);
    Ok(failed == 0)
}

// ============================================================================
// HELPERS
// ============================================================================

/// Discovers and loads every input, then processes them in parallel.
///
/// Unreadable inputs abort the run; per-unit parse and materialization
/// failures are reported in the outcomes.
fn run_pipeline(paths: &[PathBuf]) -> Result<Vec<UnitOutcome>, ArborError> {
    let units = discover_inputs(paths)?
        .iter()
        .map(|path| load_unit(path))
        .collect::<Result<Vec<SourceUnit>, _>>()?;
    Ok(process_units(&JsonTreeParser, &units))
}

/// Records the kind of every node in pre-order.
#[derive(Debug, Default)]
struct KindTrace {
    kinds: Vec<NodeKind>,
}

impl Visitor for KindTrace {
    fn before_visit(&mut self, kind: NodeKind) {
        self.kinds.push(kind);
    }
}
