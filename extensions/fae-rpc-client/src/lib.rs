mod client_config;
mod connection;
mod deadline_reader;
mod error;

pub use client_config::{ClientConfig, DEFAULT_HOST, DEFAULT_TIMEOUT};
pub use connection::Connection;
pub use error::{ProtocolViolation, RpcError};
