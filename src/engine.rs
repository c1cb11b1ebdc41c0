// ABOUTME: Public facade exposing compile/evaluate/interpret/dispose over the parser and evaluator

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::ParseError;
use crate::eval::evaluate_node;
use crate::node::Node;
use crate::parser;

/// A successfully compiled expression. Any variables it was compiled with
/// stay live inside the tree as shared `Rc<Cell<f64>>` cells — mutate the
/// same `Rc` you passed to `compile` and the next `evaluate` call sees it.
pub struct CompiledExpr {
    root: Node,
}

/// Compile `source` against a set of named, host-owned variable bindings.
/// A variable named in `variables` shadows a same-named catalog constant or
/// function. On failure, the `ParseError` carries the 1-based position of
/// the first offending character.
pub fn compile(
    source: &str,
    variables: &[(&str, Rc<Cell<f64>>)],
) -> Result<CompiledExpr, ParseError> {
    let table: HashMap<String, Rc<Cell<f64>>> = variables
        .iter()
        .map(|(name, cell)| (name.to_string(), Rc::clone(cell)))
        .collect();
    let root = parser::parse(source, &table)?;
    Ok(CompiledExpr { root })
}

/// Evaluate an already-compiled expression. Total: NaN/±infinity surface as
/// ordinary `f64` values rather than an error.
pub fn evaluate(expr: &CompiledExpr) -> f64 {
    evaluate_node(&expr.root)
}

/// Compile and evaluate `source` in one step, with no variable bindings.
/// Returns `(value, None)` on success or `(NaN, Some(position))` on a parse
/// failure, mirroring the two-outcome shape of the engine's C-style origin
/// without forcing callers who don't need `Result` to match on one.
pub fn interpret(source: &str) -> (f64, Option<usize>) {
    match compile(source, &[]) {
        Ok(expr) => (evaluate(&expr), None),
        Err(e) => (f64::NAN, Some(e.position)),
    }
}

/// Release a compiled expression. Rust's ownership already frees the tree
/// (and drops the `Rc` variable bindings) the moment it goes out of scope;
/// this function exists only so callers used to an explicit free step have
/// one to call. Passing `None` is a harmless no-op.
pub fn dispose(expr: Option<CompiledExpr>) {
    drop(expr);
}
