//! Per-unit pipeline: source text → tagged tree → typed AST.
//!
//! Each source unit is an independent piece of work. Nothing is shared
//! between units, so [`process_units`] runs them on the rayon pool with no
//! locking and returns results in input order.

use rayon::prelude::*;
use tracing::{debug, info_span};

use crate::ast::{materialize_node, Node};
use crate::diagnostics::{to_error_source, ArborError};
use crate::syntax::TreeParser;

/// One named source text, e.g. the contents of one file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub name: String,
    pub text: String,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// The result of running one unit through the pipeline.
#[derive(Debug)]
pub struct UnitOutcome {
    pub name: String,
    pub result: Result<Node, ArborError>,
}

/// Parses and materializes a single unit.
///
/// The root must be present: a source whose tree is `null` is reported as a
/// malformed shape. Errors get the unit's text attached so reports name the
/// file and can point into it.
pub fn process_unit<P>(parser: &P, unit: &SourceUnit) -> Result<Node, ArborError>
where
    P: TreeParser + ?Sized,
{
    let attach = |e: ArborError| e.with_source(&to_error_source(&unit.name, &unit.text));
    let tree = parser.parse(&unit.text).map_err(attach)?;
    let node = materialize_node(&tree).map_err(attach)?;
    debug!(unit = %unit.name, kind = %node.kind(), "materialized");
    Ok(node)
}

/// Runs every unit through the pipeline in parallel, preserving input order.
pub fn process_units<P>(parser: &P, units: &[SourceUnit]) -> Vec<UnitOutcome>
where
    P: TreeParser + Sync + ?Sized,
{
    let _span = info_span!("process_units", units = units.len()).entered();
    units
        .par_iter()
        .map(|unit| UnitOutcome {
            name: unit.name.clone(),
            result: process_unit(parser, unit),
        })
        .collect()
}
