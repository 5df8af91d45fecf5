//! Wire protocol for a minimal request/response RPC.
//!
//! Each message travels as one length-prefixed frame carrying a protocol
//! version, a message type, a sequence id, the method name and a single
//! tagged value. Transports live in the extension crates; this crate only
//! knows how to turn [`rpc::RpcMessage`]s into bytes and back.

pub mod constants;
pub mod frame;
pub mod rpc;
pub mod utils;
