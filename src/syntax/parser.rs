//! JSON-backed tree parser.
//!
//! Reads a tagged tree that an external tool serialized as JSON (for example
//! the array output of a parse-js style parser) and reports syntax failures
//! with a byte span into the source text. The caller attaches the named
//! source; see [`crate::pipeline::process_unit`].
//!
//! Nesting depth is unbounded: serde_json's recursion limit is disabled and
//! the deserializer grows its stack on demand, since operator chains nest
//! one array per operand.

use serde::Deserialize;

use crate::diagnostics::{ArborError, ErrorContext, Span};
use crate::syntax::{TaggedTree, TreeParser};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses tagged trees serialized as JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTreeParser;

impl TreeParser for JsonTreeParser {
    fn parse(&self, source_text: &str) -> Result<TaggedTree, ArborError> {
        let to_error = |e: serde_json::Error| {
            let offset = line_col_to_offset(source_text, e.line(), e.column());
            ArborError::Parse {
                message: format!("invalid tagged tree: {e}"),
                ctx: ErrorContext::with_span(Span::new(offset, offset)),
                source: Some(Box::new(e)),
            }
        };

        let mut deserializer = serde_json::Deserializer::from_str(source_text);
        deserializer.disable_recursion_limit();
        let tree = TaggedTree::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
            .map_err(to_error)?;
        // Reject trailing characters after the tree, as `from_str` does.
        deserializer.end().map_err(to_error)?;
        Ok(tree)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Converts serde_json's 1-based line and column into a byte offset.
///
/// A column of 0 (reported for errors at the very start of a line) maps to the
/// line start; positions past the end clamp to the source length.
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let within = column.saturating_sub(1).min(text.len());
            return offset + within;
        }
        offset += text.len();
    }
    source.len()
}
