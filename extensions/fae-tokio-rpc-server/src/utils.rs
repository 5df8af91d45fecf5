//! Helpers for tests and tools that start a server on an ephemeral port.

use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Binds a loopback listener on an OS-assigned port.
///
/// Returns the listener together with the address clients should dial.
pub async fn bind_tcp_listener_on_random_port() -> io::Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    Ok((listener, addr))
}

/// Splits a bound listener's address into the `(host, port)` pair a client
/// configuration takes.
pub fn tcp_listener_to_host_port(listener: &TcpListener) -> io::Result<(String, u16)> {
    let addr = listener.local_addr()?;
    Ok((addr.ip().to_string(), addr.port()))
}
