//! Warning-to-diagnostic projection

use tower_lsp::lsp_types::{Diagnostic, NumberOrString};

use crate::analyzer::types::Warning;
use crate::lsp::convert::{self, TaxonomyError};

/// Source tag the editor shows next to each diagnostic.
pub const SOURCE: &str = "element-analyzer";

/// Projects engine warnings onto protocol diagnostics, one-to-one and
/// order-preserving.
///
/// A severity outside the known taxonomy fails the whole pass so the caller
/// publishes nothing for this document rather than a misleading subset.
pub fn from_warnings(warnings: Vec<Warning>) -> Result<Vec<Diagnostic>, TaxonomyError> {
    warnings.into_iter().map(from_warning).collect()
}

fn from_warning(warning: Warning) -> Result<Diagnostic, TaxonomyError> {
    let severity = convert::lsp_severity(&warning.severity)?;

    Ok(Diagnostic {
        range: convert::lsp_range(warning.source_range),
        severity: Some(severity),
        code: Some(NumberOrString::String(warning.code)),
        source: Some(SOURCE.to_string()),
        message: warning.message,
        ..Default::default()
    })
}
