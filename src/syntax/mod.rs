//! Syntax boundary for Arbor.
//!
//! Arbor does not tokenize or parse JavaScript itself. An upstream parser
//! produces a [`TaggedTree`]: nested arrays whose first element names the
//! construct. This module defines that type, the [`TreeParser`] seam the
//! upstream collaborator plugs into, and a JSON-backed implementation.

use crate::diagnostics::ArborError;

pub mod parser;

pub use parser::JsonTreeParser;

/// The untyped, nested tagged-array tree emitted by the upstream parser.
pub type TaggedTree = serde_json::Value;

/// The contract Arbor consumes from an upstream grammar parser.
///
/// Implementations either return a well-formed tagged tree or fail before
/// materialization begins; malformed syntax is their failure domain.
pub trait TreeParser {
    fn parse(&self, source_text: &str) -> Result<TaggedTree, ArborError>;
}

impl<F> TreeParser for F
where
    F: Fn(&str) -> Result<TaggedTree, ArborError>,
{
    fn parse(&self, source_text: &str) -> Result<TaggedTree, ArborError> {
        self(source_text)
    }
}
