use crate::rpc::{RpcMethod, RpcValue};
use std::io;

/// Identity call: the server hands the argument straight back.
///
/// Useful as a connectivity check, since a correct reply proves the whole
/// encode, send, dispatch, reply and decode path works.
pub struct Noop;

impl RpcMethod for Noop {
    const METHOD_NAME: &'static str = "noop";

    type Input = i64;
    type Output = i64;

    fn encode_request(input: Self::Input) -> RpcValue {
        RpcValue::from_i64(input)
    }

    fn decode_request(value: &RpcValue) -> Result<Self::Input, io::Error> {
        expect_integer(value)
    }

    fn encode_response(output: Self::Output) -> RpcValue {
        RpcValue::from_i64(output)
    }

    fn decode_response(value: &RpcValue) -> Result<Self::Output, io::Error> {
        expect_integer(value)
    }
}

fn expect_integer(value: &RpcValue) -> Result<i64, io::Error> {
    value.as_i64().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("expected integer value, got {value}"),
        )
    })
}
