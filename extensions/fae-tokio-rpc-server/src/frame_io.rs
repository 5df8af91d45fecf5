use fae_rpc::constants::FRAME_LENGTH_FIELD_SIZE;
use fae_rpc::frame::{FrameCodec, FrameReadError};
use fae_rpc::rpc::RpcMessage;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Reads one frame from an async stream.
///
/// Returns `Ok(None)` when the peer closes cleanly between frames. A close
/// in the middle of a frame is an `UnexpectedEof` error.
pub async fn read_frame_async<R>(reader: &mut R) -> Result<Option<RpcMessage>, FrameReadError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; FRAME_LENGTH_FIELD_SIZE];
    let mut filled = 0;
    while filled < prefix.len() {
        let n = reader.read(&mut prefix[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        filled += n;
    }

    let len = FrameCodec::body_len(&prefix)?;
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await?;

    Ok(Some(FrameCodec::decode(&body)?))
}

/// Encodes and writes one frame, then flushes.
pub async fn write_frame_async<W>(writer: &mut W, message: &RpcMessage) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let bytes = FrameCodec::encode(message)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    writer.write_all(&bytes).await?;
    writer.flush().await
}
