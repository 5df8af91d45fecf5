use crate::rpc::{RpcMessageType, RpcValue};

/// One decoded frame: either a call, its reply, or an exception raised
/// while handling the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcMessage {
    /// Whether this is a call, a reply, or an exception.
    pub msg_type: RpcMessageType,

    /// Correlates a reply (or exception) with the call that caused it.
    ///
    /// The caller allocates it; the responder copies it back unchanged.
    pub seq_id: u32,

    /// Name of the remote procedure, e.g. `"noop"`.
    pub method: String,

    /// The call argument, the reply result, or the exception text.
    pub value: RpcValue,
}

impl RpcMessage {
    pub fn call(seq_id: u32, method: impl Into<String>, value: RpcValue) -> Self {
        Self {
            msg_type: RpcMessageType::Call,
            seq_id,
            method: method.into(),
            value,
        }
    }

    /// Builds the reply to `call`, keeping its sequence id and method name.
    pub fn reply_to(call: &RpcMessage, value: RpcValue) -> Self {
        Self {
            msg_type: RpcMessageType::Reply,
            seq_id: call.seq_id,
            method: call.method.clone(),
            value,
        }
    }

    pub fn exception_to(call: &RpcMessage, message: impl Into<String>) -> Self {
        Self {
            msg_type: RpcMessageType::Exception,
            seq_id: call.seq_id,
            method: call.method.clone(),
            value: RpcValue::Text(message.into()),
        }
    }
}
