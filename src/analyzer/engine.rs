//! Engine capability trait

use std::path::Path;

use async_trait::async_trait;

use crate::analyzer::error::EngineError;
use crate::analyzer::types::{CompletionResult, DefinitionLocation, EnginePosition, Warning};

/// The capability surface a conforming analysis engine exposes.
///
/// The dispatcher never talks to an engine except through this trait, so any
/// engine implementing these five operations can sit behind the bridge.
/// Files are identified by workspace-relative paths throughout.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    /// Replaces the engine's view of `path` with `text`.
    ///
    /// Must complete before queries against `path` can be trusted to see the
    /// new content; callers serialize this per path.
    async fn file_changed(&self, path: &Path, text: &str) -> Result<(), EngineError>;

    /// All warnings the engine currently reports for `path`.
    async fn warnings_for_file(&self, path: &Path) -> Result<Vec<Warning>, EngineError>;

    /// Documentation for the feature at `position`. `None` means "nothing to
    /// show here", not a failure.
    async fn documentation_at(
        &self,
        path: &Path,
        position: EnginePosition,
    ) -> Result<Option<String>, EngineError>;

    /// Where the feature at `position` is defined, if the engine knows.
    async fn definition_at(
        &self,
        path: &Path,
        position: EnginePosition,
    ) -> Result<Option<DefinitionLocation>, EngineError>;

    /// Typeahead completions at `position`, if the engine has any to offer.
    async fn completions_at(
        &self,
        path: &Path,
        position: EnginePosition,
    ) -> Result<Option<CompletionResult>, EngineError>;
}
