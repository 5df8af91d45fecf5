mod cli;

pub use cli::{AdminCommand, ClientArgs, ServerArgs};
use fae_rpc_client::{ClientConfig, Connection, RpcError};
use fae_tokio_rpc_server::NoopMode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to `default_filter` when the variable is unset or invalid.
///
/// Logs stay on stderr so stdout carries only program output.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

impl ClientArgs {
    pub fn to_config(&self) -> ClientConfig {
        ClientConfig::new(self.host.clone(), self.port)
            .with_connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .with_read_timeout(Duration::from_millis(self.timeout_ms))
            .with_write_timeout(Duration::from_millis(self.timeout_ms))
    }
}

impl ServerArgs {
    pub fn noop_mode(&self) -> NoopMode {
        match self.constant {
            Some(value) => NoopMode::Constant(value),
            None => NoopMode::Echo,
        }
    }
}

/// Opens a connection, performs one call and closes the connection.
///
/// The call is `noop` with `args.value` unless an admin method was
/// selected. Returns the result as it should be printed.
pub fn run_client(args: &ClientArgs) -> Result<String, RpcError> {
    let mut connection = Connection::open(&args.to_config())?;
    let result = match args.admin {
        None => connection.call_noop(args.value).map(|v| v.to_string()),
        Some(AdminCommand::Ping) => connection.ping(),
        Some(AdminCommand::Stat) => connection.stat(),
    };
    connection.close();
    result
}
