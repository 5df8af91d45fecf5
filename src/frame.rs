mod frame_codec;
mod frame_error;
mod frame_io;

pub use frame_codec::FrameCodec;
pub use frame_error::{FrameDecodeError, FrameEncodeError, FrameReadError};
pub use frame_io::{read_frame, write_frame};
