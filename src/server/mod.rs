// src/server/mod.rs
mod content;
mod handler;

pub use content::{Asset, ContentError, ContentResolver};
pub use handler::ContentHandler;

use anyhow::Result;
use hyper::server::conn::Http;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Loopback HTTP origin the embedded surface loads the front-end from.
pub struct ContentServer {
    addr: SocketAddr,
    handler: ContentHandler,
}

impl ContentServer {
    pub fn new(addr: SocketAddr, resolver: ContentResolver) -> Self {
        Self {
            addr,
            handler: ContentHandler::new(Arc::new(resolver)),
        }
    }

    /// Bind and start the accept loop. Returns the bound address (port 0
    /// resolves here) and the loop's task.
    pub async fn spawn(self) -> Result<(SocketAddr, JoinHandle<()>)> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        info!("Content server listening on http://{}", local_addr);

        let handler = self.handler;
        let task = tokio::spawn(async move {
            loop {
                let (stream, peer) = match listener.accept().await {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!("Content server accept failed: {}", e);
                        continue;
                    }
                };

                let svc = handler.clone();
                tokio::spawn(async move {
                    if let Err(err) = Http::new().serve_connection(stream, svc).await {
                        warn!(%peer, %err, "content connection error");
                    }
                });
            }
        });

        Ok((local_addr, task))
    }
}
