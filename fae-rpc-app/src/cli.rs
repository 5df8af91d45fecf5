use clap::{Parser, ValueEnum};
use fae_rpc::constants::DEFAULT_PORT;

/// Calls `noop` (or an admin method) once on a fae RPC server and prints the result.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "fae-client", version, about, long_about = None)]
pub struct ClientArgs {
    /// Server host name or IP address
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Server port
    #[arg(long, default_value_t = DEFAULT_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Integer sent as the `noop` argument
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub value: i64,

    /// Call an admin method instead of `noop`
    #[arg(long, value_enum)]
    pub admin: Option<AdminCommand>,

    /// Give up connecting after this many milliseconds
    #[arg(long, default_value_t = 5_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub connect_timeout_ms: u64,

    /// Give up waiting for the response after this many milliseconds
    #[arg(long, default_value_t = 5_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,
}

/// Admin methods reachable from `fae-client --admin`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    /// Server status
    Ping,
    /// Server statistics
    Stat,
}

/// Serves the `noop` procedure over TCP.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "fae-server", version, about, long_about = None)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind (0 picks a free port)
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Answer every `noop` with this value instead of echoing the argument
    #[arg(long, allow_negative_numbers = true)]
    pub constant: Option<i64>,
}
