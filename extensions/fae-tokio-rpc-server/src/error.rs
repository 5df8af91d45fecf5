use std::io;
use thiserror::Error;

/// Why a registered handler could not produce a result.
///
/// Either way the caller receives an exception frame carrying this
/// message; the connection stays up.
#[derive(Debug, Error)]
pub enum RpcHandlerError {
    /// The argument did not fit the method's input type.
    #[error("bad request: {0}")]
    BadRequest(#[source] io::Error),

    #[error("{0}")]
    Failed(String),
}
