use super::{EMPTY_ARGUMENT, expect_text};
use crate::rpc::{RpcMethod, RpcValue};
use std::io;

/// Admin statistics query. The server answers with a one-line rendering of
/// its counters, e.g.
///
/// ```text
/// uptime=12.004s sessions=3 active=1 calls=41 failed=2 peers=[127.0.0.1:41]
/// ```
pub struct Stat;

impl RpcMethod for Stat {
    const METHOD_NAME: &'static str = "stat";

    type Input = ();
    type Output = String;

    fn encode_request(_input: Self::Input) -> RpcValue {
        EMPTY_ARGUMENT
    }

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
