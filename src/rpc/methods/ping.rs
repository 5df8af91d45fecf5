use super::{EMPTY_ARGUMENT, expect_text};
use crate::rpc::{RpcMethod, RpcValue};
use std::io;

/// Admin liveness check. A running server answers with its status text.
pub struct Ping;

impl Ping {
    /// Status text of a server that is accepting calls.
    pub const STATUS_OK: &'static str = "ok";
}

impl RpcMethod for Ping {
    const METHOD_NAME: &'static str = "ping";

    type Input = ();
    type Output = String;

    fn encode_request(_input: Self::Input) -> RpcValue {
        EMPTY_ARGUMENT
    }

    // The argument carries nothing; any value is accepted.
    fn decode_request(_value: &RpcValue) -> Result<Self::Input, io::Error> {
        Ok(())
    }

    fn encode_response(output: Self::Output) -> RpcValue {
        RpcValue::Text(output)
    }

    fn decode_response(value: &RpcValue) -> Result<Self::Output, io::Error> {
        expect_text(value)
    }
}
