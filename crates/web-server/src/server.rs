//! HTTP server lifecycle
use crate::routes::{create_router, AppState};
use anyhow::Result;
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Now-playing HTTP server
pub struct WebServer {
    addr: SocketAddr,
    state: AppState,
    local_addr: Option<SocketAddr>,
    server_handle: Option<JoinHandle<()>>,
}

impl WebServer {
    /// Create a new server
    ///
    /// # Arguments
    /// * `addr` - Address to bind to (e.g., "0.0.0.0:5000")
    /// * `state` - Resolver and static directory shared by the handlers
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self {
            addr,
            state,
            local_addr: None,
            server_handle: None,
        }
    }

    /// Bind the listener and start serving in a background task
    pub async fn start(&mut self) -> Result<()> {
        info!("Starting now-playing server on {}", self.addr);

        let app = create_router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        self.local_addr = Some(local_addr);
        info!("Listening on http://{}", local_addr);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("HTTP server error: {}", e);
            }
        });

        self.server_handle = Some(handle);

        Ok(())
    }

    /// Stop the server
    pub async fn stop(&mut self) {
        if let Some(handle) = self.server_handle.take() {
            info!("Stopping now-playing server");
            handle.abort();
        }
    }

    /// Address actually bound, once started (resolves port 0)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

impl Drop for WebServer {
    fn drop(&mut self) {
        if let Some(handle) = self.server_handle.take() {
            handle.abort();
        }
    }
}
