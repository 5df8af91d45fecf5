mod error;
mod frame_io;
mod method_registry;
mod noop_mode;
mod rpc_server;
mod server_stats;
pub mod utils;

pub use error::RpcHandlerError;
pub use frame_io::{read_frame_async, write_frame_async};
pub use method_registry::MethodRegistry;
pub use noop_mode::NoopMode;
pub use rpc_server::RpcServer;
pub use server_stats::{ServerStats, StatsSnapshot};
