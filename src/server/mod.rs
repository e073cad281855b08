// Server module entry point
// Owns the listening socket and runs the accept loop

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::create_reusable_listener;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::logger;
use connection::accept_connection;

/// Long-lived service object: bound once at startup, never reconfigured.
pub struct DevServer {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl DevServer {
    /// Bind the configured address and build the shared state
    pub fn bind(config: Config) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let addr = config.get_socket_addr()?;
        let listener = create_reusable_listener(addr)?;
        let state = Arc::new(AppState::new(config));
        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Serve until SIGINT or SIGTERM
    pub async fn run(self) -> std::io::Result<()> {
        self.run_until(signal::shutdown_signal()).await
    }

    /// Accept connections until `shutdown` resolves.
    ///
    /// Connections already open keep running on their own tasks.
    pub async fn run_until(self, shutdown: impl Future<Output = ()>) -> std::io::Result<()> {
        let addr = self.listener.local_addr()?;
        logger::log_server_start(&addr, &self.state.config);
        logger::log_config(&self.state.config);

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &self.state),
                        Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                    }
                }
                () = &mut shutdown => break,
            }
        }

        drop(self.listener);
        logger::log_shutdown(self.state.active_connections.load(Ordering::SeqCst));
        Ok(())
    }
}
