use crate::RpcError;
use fae_rpc::constants::DEFAULT_PORT;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";

/// Default bound on connect, read and write.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where to connect and how long to wait at each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,

    /// Bound on establishing the TCP connection.
    pub connect_timeout: Duration,

    /// Deadline for a complete response frame, measured from the end of the
    /// request write. Elapsing closes the connection.
    pub read_timeout: Duration,

    pub write_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// `host:port`, as handed to the resolver.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(crate) fn validate(&self) -> Result<(), RpcError> {
        if self.host.trim().is_empty() {
            return Err(RpcError::InvalidConfig("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(RpcError::InvalidConfig(
                "port must be in 1..=65535".into(),
            ));
        }
        for (name, timeout) in [
            ("connect timeout", self.connect_timeout),
            ("read timeout", self.read_timeout),
            ("write timeout", self.write_timeout),
        ] {
            if timeout.is_zero() {
                return Err(RpcError::InvalidConfig(format!("{name} must be non-zero")));
            }
        }
        Ok(())
    }
}
