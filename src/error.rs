// ABOUTME: Error type for compilation failures in the expression engine

use thiserror::Error;

/// A parse/compile failure, carrying the 1-based character position of the
/// offending token within the original source string.
///
/// Runtime numeric anomalies (division by zero, domain violations, ...) are
/// never represented here — they surface as NaN/±infinity from `evaluate`,
/// per the engine's total evaluation model.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("parse error at position {position}")]
pub struct ParseError {
    pub position: usize,
}

impl ParseError {
    pub fn at(position: usize) -> Self {
        ParseError { position }
    }
}
