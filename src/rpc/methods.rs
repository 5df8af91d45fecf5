mod noop;
mod ping;
mod stat;

pub use noop::Noop;
pub use ping::Ping;
pub use stat::Stat;

use crate::rpc::RpcValue;
use std::io;

/// Argument sent by methods that take none.
const EMPTY_ARGUMENT: RpcValue = RpcValue::I32(0);

fn expect_text(value: &RpcValue) -> Result<String, io::Error> {
    value.as_text().map(str::to_owned).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("expected text value, got {value}"),
        )
    })
}
