use std::sync::Arc;

use catrag_cli::{init_tracing, load_settings};
use catrag_rag::{Clients, QueryService};
use catrag_web::WebServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = load_settings()?;
    let clients = Clients::from_settings(&settings)?;
    let service = Arc::new(QueryService::new(&settings, &clients)?);

    WebServer::new(&settings.server.host, settings.server.port, service).serve().await?;
    Ok(())
}
