use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use catrag_rag::QueryService;

use crate::error::WebError;
use crate::router::build_router;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QueryService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: Arc<QueryService>) -> Self {
        Self { service, started_at: Instant::now() }
    }
}

pub struct WebServer {
    addr: SocketAddr,
    service: Arc<QueryService>,
}

impl WebServer {
    #[must_use]
    pub fn new(host: &str, port: u16, service: Arc<QueryService>) -> Self {
        let addr: SocketAddr = format!("{host}:{port}").parse().unwrap_or_else(|e| {
            tracing::warn!("invalid host '{host}': {e}, falling back to 127.0.0.1:{port}");
            SocketAddr::from(([127, 0, 0, 1], port))
        });
        if host == "0.0.0.0" {
            tracing::warn!("binding to 0.0.0.0, the UI has no authentication");
        }
        Self { addr, service }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails.
    pub async fn serve(self) -> Result<(), WebError> {
        let router = build_router(AppState::new(self.service));
        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| WebError::Bind(self.addr.to_string(), e))?;
        tracing::info!("🌐 listening on http://{}", self.addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                if tokio::signal::ctrl_c().await.is_err() {
                    std::future::pending::<()>().await;
                }
                tracing::info!("shutting down");
            })
            .await
            .map_err(|e| WebError::Server(format!("{e}")))?;
        Ok(())
    }
}
