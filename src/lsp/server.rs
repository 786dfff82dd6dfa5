use std::sync::Arc;

use tower_lsp::{LspService, Server};
use tracing::info;

use crate::analyzer::engine::AnalysisEngine;
use crate::log::init;
use crate::lsp::backend::Backend;

pub async fn run_server(engine: Arc<dyn AnalysisEngine>) -> anyhow::Result<()> {
    init()?;

    info!("Starting element-lsp server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(move |client| Backend::new(client, Arc::clone(&engine)));
    Server::new(stdin, stdout, socket).serve(service).await;

    info!("element-lsp server stopped");
    Ok(())
}
