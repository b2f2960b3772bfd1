//! Handles all user-facing output for the CLI.
//!
//! Headers and status lines are colorized with `termcolor`; errors are
//! rendered as full `miette` reports on stderr.

use std::io::Write;

use miette::Report;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::diagnostics::ArborError;

/// Prints the `== name ==` header that precedes each unit's output.
pub fn print_header(name: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
    let _ = writeln!(stdout, "== {name} ==");
    let _ = stdout.reset();
}

/// Prints a success line for the `check` command.
pub fn print_ok(name: &str, node_count: usize) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = write!(stdout, "ok");
    let _ = stdout.reset();
    let _ = writeln!(stdout, "     {name} ({node_count} nodes)");
}

/// Prints a failure line for the `check` command.
pub fn print_failed(name: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = write!(stdout, "FAILED");
    let _ = stdout.reset();
    let _ = writeln!(stdout, " {name}");
}

/// Prints the closing line of the `check` command.
pub fn print_summary(total: usize, failed: usize) {
    println!();
    println!("checked {total} units: {} ok, {failed} failed", total - failed);
}

/// Prints an ArborError with full miette diagnostics.
pub fn print_error(error: ArborError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}
