use crate::deadline_reader::{DeadlineReader, is_timeout};
use crate::{ClientConfig, ProtocolViolation, RpcError};
use fae_rpc::frame::{FrameCodec, FrameReadError, read_frame};
use fae_rpc::rpc::{Noop, Ping, RpcMessage, RpcMessageType, RpcMethod, RpcValue, Stat};
use fae_rpc::utils::SequenceId;
use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Instant;

/// A blocking, exclusively owned connection to an RPC server.
///
/// Exactly one request is in flight at a time; `&mut self` on every call
/// enforces that. Callers that want concurrency open one connection each.
///
/// The socket is released by [`Connection::close`], by any I/O, timeout or
/// protocol failure during a call, and finally on drop.
#[derive(Debug)]
pub struct Connection {
    config: ClientConfig,
    stream: Option<TcpStream>,
    peer_addr: SocketAddr,
    seq: SequenceId,
}

impl Connection {
    /// Resolves the configured address and connects to the first resolved
    /// address that accepts within the connect timeout.
    pub fn open(config: &ClientConfig) -> Result<Connection, RpcError> {
        config.validate()?;

        let addr = config.address();
        let connection_error = |source: io::Error| RpcError::Connection {
            addr: addr.clone(),
            source,
        };

        let socket_addrs = addr.to_socket_addrs().map_err(connection_error)?;

        let mut last_err = None;
        for socket_addr in socket_addrs {
            match TcpStream::connect_timeout(&socket_addr, config.connect_timeout) {
                Ok(stream) => {
                    stream.set_nodelay(true).map_err(connection_error)?;
                    stream
                        .set_read_timeout(Some(config.read_timeout))
                        .map_err(connection_error)?;
                    stream
                        .set_write_timeout(Some(config.write_timeout))
                        .map_err(connection_error)?;

                    tracing::info!("Connected to {} ({})", addr, socket_addr);

                    return Ok(Connection {
                        config: config.clone(),
                        stream: Some(stream),
                        peer_addr: socket_addr,
                        seq: SequenceId::new(),
                    });
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", socket_addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(connection_error(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "address resolved to nothing",
            )
        })))
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shuts the socket down and releases it. Calling this on a closed
    /// connection does nothing.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            // The peer may already be gone; the socket is dropped either way.
            let _ = stream.shutdown(Shutdown::Both);
            tracing::info!("Closed connection to {}", self.peer_addr);
        }
    }

    /// Calls the identity procedure. An echo server returns `value`.
    pub fn call_noop(&mut self, value: i64) -> Result<i64, RpcError> {
        self.call::<Noop>(value)
    }

    /// Asks the server for its status text.
    pub fn ping(&mut self) -> Result<String, RpcError> {
        self.call::<Ping>(())
    }

    /// Fetches the server's one-line statistics report.
    pub fn stat(&mut self) -> Result<String, RpcError> {
        self.call::<Stat>(())
    }

    /// Performs one request/response exchange for method `M`.
    pub fn call<M: RpcMethod>(&mut self, input: M::Input) -> Result<M::Output, RpcError> {
        if self.stream.is_none() {
            return Err(RpcError::NotConnected);
        }

        let request = RpcMessage::call(
            self.seq.next_id(),
            M::METHOD_NAME,
            M::encode_request(input),
        );
        let response = self.exchange(&request)?;

        match response.msg_type {
            RpcMessageType::Reply => M::decode_response(&response.value)
                .map_err(|e| self.fail(ProtocolViolation::InvalidResult(e).into())),
            RpcMessageType::Exception => {
                let message = match response.value {
                    RpcValue::Text(text) => text,
                    other => other.to_string(),
                };
                tracing::debug!("Call {} raised: {}", request.seq_id, message);
                Err(RpcError::Remote(message))
            }
            RpcMessageType::Call => Err(self.fail(ProtocolViolation::UnexpectedCall.into())),
        }
    }

    /// Writes `request` and reads the frame answering it. Any failure past
    /// encoding closes the connection.
    fn exchange(&mut self, request: &RpcMessage) -> Result<RpcMessage, RpcError> {
        let bytes = FrameCodec::encode(request)?;

        let Some(stream) = self.stream.as_mut() else {
            return Err(RpcError::NotConnected);
        };

        let write_result = match stream.write_all(&bytes) {
            Ok(()) => stream.flush(),
            Err(e) => Err(e),
        };
        if let Err(e) = write_result {
            tracing::error!("Write to {} failed: {}", self.peer_addr, e);
            return Err(self.fail(RpcError::Write(e)));
        }
        tracing::debug!(
            "Sent {:?} `{}` (seq {}, {} bytes)",
            request.msg_type,
            request.method,
            request.seq_id,
            bytes.len()
        );

        let deadline = Instant::now() + self.config.read_timeout;
        let read_result = {
            let stream: &TcpStream = stream;
            read_frame(&mut DeadlineReader::new(stream, deadline))
        };

        let response = match read_result {
            Ok(response) => response,
            Err(FrameReadError::Io(e)) if is_timeout(&e) => {
                tracing::warn!(
                    "No response from {} within {:?}; closing",
                    self.peer_addr,
                    self.config.read_timeout
                );
                return Err(self.fail(RpcError::Timeout(self.config.read_timeout)));
            }
            Err(FrameReadError::Io(e)) => {
                tracing::error!("Read from {} failed: {}", self.peer_addr, e);
                return Err(self.fail(RpcError::Read(e)));
            }
            Err(FrameReadError::Decode(e)) => {
                return Err(self.fail(ProtocolViolation::Malformed(e).into()));
            }
        };

        if response.seq_id != request.seq_id {
            return Err(self.fail(
                ProtocolViolation::SequenceMismatch {
                    expected: request.seq_id,
                    actual: response.seq_id,
                }
                .into(),
            ));
        }

        if response.method != request.method {
            return Err(self.fail(
                ProtocolViolation::MethodMismatch {
                    expected: request.method.clone(),
                    actual: response.method,
                }
                .into(),
            ));
        }

        tracing::debug!("Received response to seq {}", response.seq_id);

        Ok(response)
    }

    /// Closes the connection and hands `err` back for returning.
    fn fail(&mut self, err: RpcError) -> RpcError {
        if let RpcError::Protocol(violation) = &err {
            tracing::warn!("Protocol violation from {}: {}", self.peer_addr, violation);
        }
        self.close();
        err
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
