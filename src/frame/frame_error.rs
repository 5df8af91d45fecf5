use std::io;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameEncodeError {
    #[error("method name is {0} bytes, limit is {limit}", limit = crate::constants::MAX_METHOD_NAME_SIZE)]
    MethodNameTooLong(usize),

    #[error("frame body is {0} bytes, limit is {limit}", limit = crate::constants::MAX_FRAME_BODY_SIZE)]
    FrameTooLarge(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameDecodeError {
    /// The buffer ended before the field being read.
    #[error("frame truncated")]
    Truncated,

    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(u8),

    #[error("unknown message type {0:#04x}")]
    UnknownMessageType(u8),

    #[error("unknown value tag {0:#04x}")]
    UnknownValueTag(u8),

    /// Names the encoder would refuse are refused here too, so every
    /// decoded call can be answered.
    #[error("method name is {0} bytes, limit is {limit}", limit = crate::constants::MAX_METHOD_NAME_SIZE)]
    MethodNameTooLong(usize),

    #[error("string field is not valid UTF-8")]
    InvalidUtf8,

    /// The body held more bytes than its fields account for.
    #[error("{0} trailing bytes after frame body")]
    TrailingBytes(usize),

    #[error("frame body of {0} bytes exceeds limit of {limit}", limit = crate::constants::MAX_FRAME_BODY_SIZE)]
    FrameTooLarge(usize),
}

/// Failure while pulling one frame off a byte stream.
///
/// I/O failures are kept apart from decode failures so callers can tell a
/// dead socket from a peer that speaks the wrong protocol.
#[derive(Debug, Error)]
pub enum FrameReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] FrameDecodeError),
}
