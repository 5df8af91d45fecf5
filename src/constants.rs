// Frame related constants
pub const FRAME_LENGTH_FIELD_SIZE: usize = 4;

/// Upper bound on a frame body. Length prefixes above this are rejected
/// before any buffer is allocated.
pub const MAX_FRAME_BODY_SIZE: usize = 64 * 1024;

/// Wire protocol revision carried in the first body byte.
pub const PROTOCOL_VERSION: u8 = 1;

pub const FRAME_VERSION_OFFSET: usize = 0;
pub const FRAME_MSG_TYPE_OFFSET: usize = 1;

/// Byte offset where the 4-byte sequence id (u32) begins.
pub const FRAME_SEQ_ID_OFFSET: usize = 2;

/// Byte offset of the 2-byte method name length (u16).
pub const FRAME_METHOD_NAME_LENGTH_OFFSET: usize = 6;

/// Size of the fixed body prefix before the method name bytes.
pub const FRAME_FIXED_HEADER_SIZE: usize = 8; // 1 + 1 + 4 + 2

/// Longest method name accepted by the encoder.
pub const MAX_METHOD_NAME_SIZE: usize = 255;

/// Default service port.
pub const DEFAULT_PORT: u16 = 9001;
