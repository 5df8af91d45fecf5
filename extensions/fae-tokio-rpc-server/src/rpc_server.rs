//! Note: This `RpcServer` performs no authentication. It is meant for
//! trusted, internal networks, and for exercising clients in tests.

use crate::{
    MethodRegistry, NoopMode, ServerStats, read_frame_async, write_frame_async,
};
use fae_rpc::frame::FrameReadError;
use fae_rpc::rpc::{Noop, Ping, RpcMessage, RpcMessageType, Stat};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::time::timeout;

/// The maximum time to wait for the next frame from a client before
/// considering the connection idle and closing it.
const CLIENT_IDLE_TIMEOUT: u64 = 60;

/// A TCP server answering calls strictly in order, one task per connection.
pub struct RpcServer {
    registry: Arc<MethodRegistry>,
    stats: Arc<ServerStats>,
    idle_timeout: Duration,
}

impl Default for RpcServer {
    fn default() -> Self {
        Self::new(NoopMode::default())
    }
}

impl RpcServer {
    /// A server exposing `noop` with the given contract, plus the admin
    /// `ping` and `stat` methods.
    pub fn new(mode: NoopMode) -> Self {
        let stats = Arc::new(ServerStats::new());

        let mut registry = MethodRegistry::new();
        registry.register::<Noop, _>(move |value| Ok(mode.apply(value)));
        registry.register::<Ping, _>(|()| Ok(Ping::STATUS_OK.to_string()));

        let stat_source = stats.clone();
        registry.register::<Stat, _>(move |()| Ok(stat_source.snapshot().to_string()));

        Self::from_parts(registry, stats)
    }

    /// A server exposing exactly the methods in `registry`.
    pub fn with_registry(registry: MethodRegistry) -> Self {
        Self::from_parts(registry, Arc::new(ServerStats::new()))
    }

    fn from_parts(registry: MethodRegistry, stats: Arc<ServerStats>) -> Self {
        RpcServer {
            registry: Arc::new(registry),
            stats,
            idle_timeout: Duration::from_secs(CLIENT_IDLE_TIMEOUT),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Returns a handle to the live counters.
    pub fn stats(&self) -> Arc<ServerStats> {
        self.stats.clone()
    }

    /// Binds to an address and serves until the task is dropped.
    pub async fn serve<A: ToSocketAddrs>(self, addr: A) -> io::Result<SocketAddr> {
        let listener = TcpListener::bind(addr).await?;
        Arc::new(self).serve_with_listener(listener).await
    }

    /// Convenience wrapper around `serve` for a host and port pair.
    pub async fn serve_on(self, host: &str, port: u16) -> io::Result<SocketAddr> {
        self.serve(format!("{host}:{port}")).await
    }

    /// Serves on a pre-bound listener, e.g. one bound to port 0.
    pub async fn serve_with_listener(self: Arc<Self>, listener: TcpListener) -> io::Result<SocketAddr> {
        self.serve_with_listener_until(listener, std::future::pending())
            .await
    }

    /// Serves until `shutdown` resolves, then stops accepting and returns
    /// the bound address. Connections already accepted run to completion.
    pub async fn serve_with_listener_until<F>(
        self: Arc<Self>,
        listener: TcpListener,
        shutdown: F,
    ) -> io::Result<SocketAddr>
    where
        F: Future<Output = ()>,
    {
        let address = listener.local_addr()?;
        tracing::info!(
            "Server running on {} (methods: {:?})",
            address,
            self.registry.method_names()
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested; no longer accepting on {}", address);
                    break;
                }
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            tokio::spawn(self.clone().handle_connection(stream, peer));
                        }
                        Err(e) => {
                            // Transient; keep accepting.
                            tracing::error!("Accept failed on {}: {}", address, e);
                        }
                    }
                }
            }
        }

        Ok(address)
    }

    async fn handle_connection(self: Arc<Self>, mut stream: TcpStream, peer: SocketAddr) {
        tracing::info!("Client connected: {}", peer);
        self.stats.session_opened();

        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!("Could not set TCP_NODELAY for {}: {}", peer, e);
        }

        loop {
            let call = match timeout(self.idle_timeout, read_frame_async(&mut stream)).await {
                Err(_) => {
                    tracing::warn!("Client {} idle for {:?}. Closing connection.", peer, self.idle_timeout);
                    break;
                }
                Ok(Ok(None)) => {
                    tracing::info!("Client {} disconnected.", peer);
                    break;
                }
                Ok(Ok(Some(message))) => message,
                Ok(Err(FrameReadError::Decode(e))) => {
                    // The stream is out of sync; there is no frame to answer.
                    tracing::warn!("Malformed frame from {}: {}. Closing connection.", peer, e);
                    break;
                }
                Ok(Err(FrameReadError::Io(e))) => {
                    tracing::error!("Read from {} failed: {}", peer, e);
                    break;
                }
            };

            let response = self.respond(&call);
            let failed = response.msg_type == RpcMessageType::Exception;
            self.stats.record_call(peer.ip(), failed);

            tracing::debug!(
                "{} `{}` seq {} -> {:?}",
                peer,
                call.method,
                call.seq_id,
                response.msg_type
            );

            if let Err(e) = write_frame_async(&mut stream, &response).await {
                tracing::error!("Write to {} failed: {}", peer, e);
                break;
            }
        }

        self.stats.session_closed();
        let snapshot = self.stats.snapshot();
        tracing::info!(
            "Terminated connection for {}. sessions={} active={} calls={} failed={}",
            peer,
            snapshot.total_sessions,
            snapshot.active_sessions,
            snapshot.total_calls,
            snapshot.total_failed_calls
        );
    }

    fn respond(&self, message: &RpcMessage) -> RpcMessage {
        match message.msg_type {
            RpcMessageType::Call => self.registry.dispatch(message),
            other => RpcMessage::exception_to(
                message,
                format!("expected a call frame, got {other:?}"),
            ),
        }
    }
}
