//! Coordinate and severity mapping
//!
//! Both coordinate systems are zero-based, so the conversions are pure field
//! renames with no arithmetic. They still go through named fields instead of
//! tuple order so the two encodings can diverge without corrupting positions.

use thiserror::Error;
use tower_lsp::lsp_types::{DiagnosticSeverity, Position, Range};

use crate::analyzer::types::{EnginePosition, EngineRange, Severity};

/// An engine severity outside the known taxonomy.
///
/// Never coerced to a default: a diagnostic published under a made-up
/// severity misrepresents the engine, which is worse than failing the pass.
#[derive(Debug, PartialEq, Eq, Error)]
#[error("Engine reported a severity outside the known taxonomy: {0}")]
pub struct TaxonomyError(pub String);

/// Protocol position to engine position (character becomes column).
pub fn engine_position(position: Position) -> EnginePosition {
    EnginePosition {
        line: position.line,
        column: position.character,
    }
}

/// Engine position to protocol position (column becomes character).
pub fn lsp_position(position: EnginePosition) -> Position {
    Position {
        line: position.line,
        character: position.column,
    }
}

/// Engine range to protocol range; start and end convert independently.
pub fn lsp_range(range: EngineRange) -> Range {
    Range {
        start: lsp_position(range.start),
        end: lsp_position(range.end),
    }
}

/// Engine severity to protocol severity. Total over the three known
/// severities; anything else is a taxonomy violation.
pub fn lsp_severity(severity: &Severity) -> Result<DiagnosticSeverity, TaxonomyError> {
    match severity {
        Severity::Error => Ok(DiagnosticSeverity::ERROR),
        Severity::Warning => Ok(DiagnosticSeverity::WARNING),
        Severity::Info => Ok(DiagnosticSeverity::INFORMATION),
        Severity::Unknown(raw) => Err(TaxonomyError(raw.clone())),
    }
}
