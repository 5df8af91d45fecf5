use std::io::{self, Read};
use std::net::TcpStream;
use std::time::Instant;

/// Reads from a socket until an absolute deadline.
///
/// A plain socket read timeout restarts on every `read`, so a peer dribbling
/// one byte at a time could hold a call open forever. This shrinks the
/// socket timeout to whatever is left before each read.
pub(crate) struct DeadlineReader<'a> {
    stream: &'a TcpStream,
    deadline: Instant,
}

impl<'a> DeadlineReader<'a> {
    pub(crate) fn new(stream: &'a TcpStream, deadline: Instant) -> Self {
        Self { stream, deadline }
    }
}

impl Read for DeadlineReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "read deadline elapsed"));
        }
        self.stream.set_read_timeout(Some(remaining))?;
        let mut stream = self.stream;
        stream.read(buf)
    }
}

/// Socket read timeouts surface as `WouldBlock` on Unix and `TimedOut` on
/// Windows.
pub(crate) fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
