//! Arbor: typed ASTs from tagged-array syntax trees.
//!
//! An upstream parser turns JavaScript source into nested tagged arrays
//! (`["call", ["name", "print"], [["string", "hi"]]]`). Arbor
//! [materializes](ast::materialize) those arrays into a strongly-typed
//! [`ast::Node`] tree and lets passes walk it through the
//! [`visit::Visitor`] protocol.

pub use crate::diagnostics::{ArborError, ErrorContext, ErrorType};

pub mod ast;
pub mod cli;
pub mod diagnostics;
pub mod discovery;
pub mod logging;
pub mod pipeline;
pub mod syntax;
pub mod visit;
