use crate::{
    constants::{
        FRAME_FIXED_HEADER_SIZE, FRAME_LENGTH_FIELD_SIZE, MAX_FRAME_BODY_SIZE,
        MAX_METHOD_NAME_SIZE, PROTOCOL_VERSION,
    },
    frame::{FrameDecodeError, FrameEncodeError},
    rpc::{RpcMessage, RpcMessageType, RpcValue, RpcValueTag},
};

/// Provides encoding and decoding functionality for frames.
///
/// A frame on the wire is a little-endian `u32` body length followed by the
/// body:
///
/// ```text
/// [version u8][msg type u8][seq id u32][name len u16][name][tag u8][value]
/// ```
///
/// Integer values are 4 or 8 bytes depending on their tag; text values carry
/// their own `u32` length prefix.
pub struct FrameCodec;

impl FrameCodec {
    /// Encodes a message into a complete frame, length prefix included.
    ///
    /// Fails if the method name or the resulting body exceeds the protocol
    /// limits, so an oversized frame never reaches the socket.
    pub fn encode(message: &RpcMessage) -> Result<Vec<u8>, FrameEncodeError> {
        let name = message.method.as_bytes();
        if name.len() > MAX_METHOD_NAME_SIZE {
            return Err(FrameEncodeError::MethodNameTooLong(name.len()));
        }

        let value_len = match &message.value {
            RpcValue::I32(_) => 4,
            RpcValue::I64(_) => 8,
            RpcValue::Text(s) => 4 + s.len(),
        };
        let body_len = FRAME_FIXED_HEADER_SIZE + name.len() + 1 + value_len;
        if body_len > MAX_FRAME_BODY_SIZE {
            return Err(FrameEncodeError::FrameTooLarge(body_len));
        }

        let mut buf = Vec::with_capacity(FRAME_LENGTH_FIELD_SIZE + body_len);

        buf.extend(&(body_len as u32).to_le_bytes());
        buf.push(PROTOCOL_VERSION);
        buf.push(message.msg_type as u8);
        buf.extend(&message.seq_id.to_le_bytes());
        buf.extend(&(name.len() as u16).to_le_bytes());
        buf.extend(name);
        buf.push(message.value.tag() as u8);

        match &message.value {
            RpcValue::I32(v) => buf.extend(&v.to_le_bytes()),
            RpcValue::I64(v) => buf.extend(&v.to_le_bytes()),
            RpcValue::Text(s) => {
                buf.extend(&(s.len() as u32).to_le_bytes());
                buf.extend(s.as_bytes());
            }
        }

        debug_assert_eq!(buf.len(), FRAME_LENGTH_FIELD_SIZE + body_len);

        Ok(buf)
    }

    /// Reads the body length out of a frame's length prefix, rejecting
    /// anything above [`MAX_FRAME_BODY_SIZE`].
    pub fn body_len(prefix: &[u8; FRAME_LENGTH_FIELD_SIZE]) -> Result<usize, FrameDecodeError> {
        let len = u32::from_le_bytes(*prefix) as usize;
        if len > MAX_FRAME_BODY_SIZE {
            return Err(FrameDecodeError::FrameTooLarge(len));
        }
        Ok(len)
    }

    /// Decodes a frame body (the bytes after the length prefix).
    ///
    /// The body must be consumed exactly; leftover bytes are reported as
    /// [`FrameDecodeError::TrailingBytes`].
    pub fn decode(body: &[u8]) -> Result<RpcMessage, FrameDecodeError> {
        if body.len() > MAX_FRAME_BODY_SIZE {
            return Err(FrameDecodeError::FrameTooLarge(body.len()));
        }

        let mut cursor = BodyCursor::new(body);

        let version = cursor.u8()?;
        if version != PROTOCOL_VERSION {
            return Err(FrameDecodeError::UnsupportedVersion(version));
        }

        let raw_type = cursor.u8()?;
        let msg_type = RpcMessageType::try_from(raw_type)
            .map_err(|_| FrameDecodeError::UnknownMessageType(raw_type))?;

        let seq_id = u32::from_le_bytes(cursor.array()?);

        let name_len = u16::from_le_bytes(cursor.array()?) as usize;
        if name_len > MAX_METHOD_NAME_SIZE {
            return Err(FrameDecodeError::MethodNameTooLong(name_len));
        }
        let method = cursor.utf8(name_len)?;

        let raw_tag = cursor.u8()?;
        let tag =
            RpcValueTag::try_from(raw_tag).map_err(|_| FrameDecodeError::UnknownValueTag(raw_tag))?;

        let value = match tag {
            RpcValueTag::I32 => RpcValue::I32(i32::from_le_bytes(cursor.array()?)),
            RpcValueTag::I64 => RpcValue::I64(i64::from_le_bytes(cursor.array()?)),
            RpcValueTag::Text => {
                let len = u32::from_le_bytes(cursor.array()?) as usize;
                RpcValue::Text(cursor.utf8(len)?)
            }
        };

        if cursor.remaining() > 0 {
            return Err(FrameDecodeError::TrailingBytes(cursor.remaining()));
        }

        Ok(RpcMessage {
            msg_type,
            seq_id,
            method,
            value,
        })
    }
}

/// Bounds-checked forward reader over a frame body.
struct BodyCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BodyCursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FrameDecodeError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.buf.len())
            .ok_or(FrameDecodeError::Truncated)?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, FrameDecodeError> {
        Ok(self.take(1)?[0])
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], FrameDecodeError> {
        self.take(N)?
            .try_into()
            .map_err(|_| FrameDecodeError::Truncated)
    }

    fn utf8(&mut self, n: usize) -> Result<String, FrameDecodeError> {
        let bytes = self.take(n)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| FrameDecodeError::InvalidUtf8)
    }
}
