use fae_rpc::frame::{FrameDecodeError, FrameEncodeError};
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong between opening a connection and reading a
/// result. None of these are retried.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The transport could not be established.
    #[error("cannot connect to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// A call was attempted on a closed connection.
    #[error("connection is not open")]
    NotConnected,

    #[error("failed to write request: {0}")]
    Write(#[source] io::Error),

    #[error("failed to read response: {0}")]
    Read(#[source] io::Error),

    /// No complete response arrived before the read deadline.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolViolation),

    /// The server understood the call but answered with an exception.
    #[error("remote error: {0}")]
    Remote(String),

    #[error("failed to encode request: {0}")]
    Encode(#[from] FrameEncodeError),
}

/// Ways a response frame can fail to match the request it answers.
#[derive(Debug, Error)]
pub enum ProtocolViolation {
    #[error("malformed frame: {0}")]
    Malformed(#[from] FrameDecodeError),

    #[error("sequence id mismatch: expected {expected}, got {actual}")]
    SequenceMismatch { expected: u32, actual: u32 },

    #[error("method mismatch: expected {expected:?}, got {actual:?}")]
    MethodMismatch { expected: String, actual: String },

    /// The peer sent a call where a reply was expected.
    #[error("unexpected call frame in response position")]
    UnexpectedCall,

    #[error("invalid result: {0}")]
    InvalidResult(#[source] io::Error),
}
