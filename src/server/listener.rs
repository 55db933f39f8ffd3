use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::info;

use crate::http::connection::{Connection, Services};

/// Owns the listening socket and accepts connections until told to stop.
///
/// Each accepted connection runs as its own task; the acceptor never waits
/// on one. Shutdown is cooperative: it stops the accept loop, while
/// already-accepted connections drain on their own through keep-alive
/// negotiation, idle timeout, or peer closure.
pub struct Server {
    listener: TcpListener,
    addr: SocketAddr,
    services: Arc<Services>,
    shutdown: Arc<Notify>,
}

impl Server {
    /// Binds the listening socket. Port 0 requests an ephemeral port; the
    /// assigned one is available via `port()` immediately after.
    pub async fn bind(addr: &str, services: Services) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("Listening on {}", addr);

        Ok(Self {
            listener,
            addr,
            services: Arc::new(services),
            shutdown: Arc::new(Notify::new()),
        })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Handle for requesting shutdown from another task. Idempotent; a
    /// request made before `serve()` starts is not lost.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(self.shutdown.clone())
    }

    /// Accept loop. Runs until shutdown is requested; the shutdown signal is
    /// the sole clean termination and is not an error. Any other accept
    /// failure is logged and the loop continues.
    pub async fn serve(self) -> anyhow::Result<()> {
        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown requested, no longer accepting");
                    return Ok(());
                }

                accepted = self.listener.accept() => match accepted {
                    Ok((socket, peer)) => {
                        tracing::debug!("Accepted connection from {}", peer);

                        let services = self.services.clone();
                        tokio::spawn(async move {
                            let mut conn = Connection::new(socket, peer, services);
                            if let Err(e) = conn.run().await {
                                tracing::warn!("Connection error from {}: {}", peer, e);
                            }
                        });
                    }
                    Err(e) => {
                        tracing::error!("Accept failed: {}", e);
                    }
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct ShutdownHandle(Arc<Notify>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.0.notify_one();
    }
}
