use crate::{
    constants::FRAME_LENGTH_FIELD_SIZE,
    frame::{FrameCodec, FrameEncodeError, FrameReadError},
    rpc::RpcMessage,
};
use std::io::{self, Read, Write};

/// Encodes `message` and writes the whole frame, then flushes.
///
/// Returns the number of bytes written. Encoding failures surface as
/// `InvalidInput` so callers only deal with `io::Error` here.
pub fn write_frame<W: Write>(writer: &mut W, message: &RpcMessage) -> io::Result<usize> {
    let bytes = FrameCodec::encode(message)
        .map_err(|e: FrameEncodeError| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(bytes.len())
}

/// Blocks until one complete frame has been read, then decodes it.
///
/// A stream that ends mid-frame yields `UnexpectedEof` through
/// [`FrameReadError::Io`].
pub fn read_frame<R: Read>(reader: &mut R) -> Result<RpcMessage, FrameReadError> {
    let mut prefix = [0u8; FRAME_LENGTH_FIELD_SIZE];
    reader.read_exact(&mut prefix)?;

    let len = FrameCodec::body_len(&prefix)?;
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;

    Ok(FrameCodec::decode(&body)?)
}
