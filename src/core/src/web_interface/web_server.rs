use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;
use warp::Filter;

use super::routes::routes;
use crate::error_handling::types::WebError;
use crate::storage::TimeStorage;

/// HTTP server for the times page and its JSON endpoints
pub struct WebServer {
    storage: Arc<dyn TimeStorage>,
}

impl WebServer {
    pub fn new(storage: Arc<dyn TimeStorage>) -> Self {
        Self { storage }
    }

    /// Binds `addr` and serves until the process is stopped.
    pub async fn start(&self, addr: SocketAddr) -> Result<(), WebError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            error!("Unable to bind {}: {}", addr, e);
            WebError::BindFailed(e)
        })?;
        self.serve(listener).await
    }

    /// Serves on an already bound listener.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), WebError> {
        let routes = routes(self.storage.clone()).with(warp::log("spacetimer::http"));
        match listener.local_addr() {
            Ok(local) => info!("Listening on http://{}", local),
            Err(_) => info!("Listening"),
        }
        warp::serve(routes).incoming(listener).run().await;
        Ok(())
    }
}
