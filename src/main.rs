use std::sync::Arc;

use clap::Parser;

use element_lsp::analyzer::ipc::IpcEngine;
use element_lsp::lsp::server::run_server;

/// LSP bridge for a web-components markup analyzer.
///
/// Talks LSP to the editor on stdio and drives the analysis engine as a
/// child process speaking newline-delimited JSON.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Analysis engine executable to spawn.
    #[arg(long)]
    engine: String,

    /// Arguments passed through to the engine process.
    #[arg(trailing_var_arg = true)]
    engine_args: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let engine = Arc::new(IpcEngine::spawn(&args.engine, &args.engine_args)?);
    run_server(engine).await
}
