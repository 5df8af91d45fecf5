mod methods;
mod rpc_message;
mod rpc_message_type;
mod rpc_method;
mod rpc_value;

pub use methods::{Noop, Ping, Stat};
pub use rpc_message::RpcMessage;
pub use rpc_message_type::RpcMessageType;
pub use rpc_method::{RpcMethod, method_id_hash};
pub use rpc_value::{RpcValue, RpcValueTag};
