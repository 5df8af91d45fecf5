use crate::rpc::RpcValue;
use std::io;
use xxhash_rust::const_xxh3::xxh3_64 as const_xxh3_64;

pub const fn method_id_hash(name: &str) -> u64 {
    const_xxh3_64(name.as_bytes())
}

/// Compile-time RPC method ID generator using xxHash3.
///
/// Servers route calls by this id rather than by comparing strings. The
/// hash is computed from the same name that travels on the wire, so both
/// sides agree without a shared table.
///
/// ```rust
/// use fae_rpc::rpc_method_id;
/// let noop = rpc_method_id!("noop");
/// assert_eq!(noop, fae_rpc::rpc::method_id_hash("noop"));
/// assert_ne!(noop, rpc_method_id!("ping"));
/// ```
#[macro_export]
macro_rules! rpc_method_id {
    ($name:literal) => {{
        const ID: u64 = $crate::rpc::method_id_hash($name);
        ID
    }};
}

/// A remote procedure with a typed argument and result.
///
/// Each side converts between its typed values and the single [`RpcValue`]
/// a frame carries.
pub trait RpcMethod {
    /// The name sent on the wire.
    const METHOD_NAME: &'static str;

    /// Routing id derived from [`Self::METHOD_NAME`].
    const METHOD_ID: u64 = method_id_hash(Self::METHOD_NAME);

    type Input;

    type Output;

    fn encode_request(input: Self::Input) -> RpcValue;

    fn decode_request(value: &RpcValue) -> Result<Self::Input, io::Error>;

    fn encode_response(output: Self::Output) -> RpcValue;

    fn decode_response(value: &RpcValue) -> Result<Self::Output, io::Error>;
}
