use crate::RpcHandlerError;
use fae_rpc::rpc::{RpcMessage, RpcMethod, RpcValue, method_id_hash};
use std::collections::HashMap;

type RpcMethodHandler =
    Box<dyn Fn(&RpcValue) -> Result<RpcValue, RpcHandlerError> + Send + Sync + 'static>;

struct RegisteredMethod {
    name: &'static str,
    handler: RpcMethodHandler,
}

/// Routes calls to handlers by method id.
///
/// The id is the xxh3 hash of the method name on the wire; the stored name
/// is compared as well so a hash collision can never reach the wrong
/// handler.
#[derive(Default)]
pub struct MethodRegistry {
    handlers: HashMap<u64, RegisteredMethod>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers a typed handler for `M`, replacing any earlier one.
    pub fn register<M, F>(&mut self, handler: F)
    where
        M: RpcMethod + 'static,
        F: Fn(M::Input) -> Result<M::Output, RpcHandlerError> + Send + Sync + 'static,
    {
        let wrapped = move |value: &RpcValue| {
            let input = M::decode_request(value).map_err(RpcHandlerError::BadRequest)?;
            let output = handler(input)?;
            Ok(M::encode_response(output))
        };

        let previous = self.handlers.insert(
            M::METHOD_ID,
            RegisteredMethod {
                name: M::METHOD_NAME,
                handler: Box::new(wrapped),
            },
        );
        if previous.is_some() {
            tracing::warn!("Replaced handler for `{}`", M::METHOD_NAME);
        }
    }

    pub fn contains(&self, method_name: &str) -> bool {
        self.lookup(method_name).is_some()
    }

    pub fn method_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.values().map(|m| m.name).collect();
        names.sort_unstable();
        names
    }

    fn lookup(&self, method_name: &str) -> Option<&RegisteredMethod> {
        self.handlers
            .get(&method_id_hash(method_name))
            .filter(|m| m.name == method_name)
    }

    /// Runs the handler for `call` and builds the frame to send back: a
    /// reply on success, an exception otherwise.
    pub fn dispatch(&self, call: &RpcMessage) -> RpcMessage {
        let Some(method) = self.lookup(&call.method) else {
            return RpcMessage::exception_to(call, format!("unknown method: {}", call.method));
        };

        match (method.handler)(&call.value) {
            Ok(value) => RpcMessage::reply_to(call, value),
            Err(e) => RpcMessage::exception_to(call, e.to_string()),
        }
    }
}
