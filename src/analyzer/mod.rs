//! Analysis engine bridge
//! - engine.rs: the engine capability trait
//! - types.rs: engine wire types (positions, warnings, completions)
//! - session.rs: workspace-bound session lifecycle and per-path ordering
//! - ipc.rs: child-process NDJSON engine transport
//! - error.rs: engine error types

pub mod engine;
pub mod error;
pub mod ipc;
pub mod session;
pub mod types;

pub use engine::AnalysisEngine;
pub use error::EngineError;
pub use session::{AnalyzerBridge, AnalyzerSession};
