// ABOUTME: Post-order tree walk that turns a compiled Node into a single f64

use crate::node::{self, Node};

/// Evaluate a compiled tree. Total over all `f64` inputs: division by zero,
/// domain violations (e.g. `asin 2`), and similar anomalies surface as NaN or
/// ±infinity rather than as an error, matching the engine's external
/// interface (`evaluate` never returns a `Result`).
pub fn evaluate_node(tree: &Node) -> f64 {
    match tree {
        Node::Constant(d) => *d,
        Node::Variable(cell) => cell.get(),
        Node::Apply(op, children) => {
            let args: Vec<f64> = children.iter().map(evaluate_node).collect();
            node::apply(*op, &args)
        }
    }
}
