// ABOUTME: Crate root — re-exports the public expression-engine API

pub mod catalog;
pub mod engine;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod node;
pub mod parser;

pub use engine::{compile, dispose, evaluate, interpret, CompiledExpr};
pub use error::ParseError;
