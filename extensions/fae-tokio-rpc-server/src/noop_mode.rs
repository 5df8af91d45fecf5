use std::fmt;

/// What the server's `noop` procedure returns.
///
/// `Echo` is the identity contract clients rely on for connectivity
/// checks. `Constant` answers every call with the same value, for peers
/// that expect a fixed acknowledgement instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoopMode {
    #[default]
    Echo,
    Constant(i64),
}

impl NoopMode {
    #[inline]
    pub fn apply(self, value: i64) -> i64 {
        match self {
            NoopMode::Echo => value,
            NoopMode::Constant(constant) => constant,
        }
    }
}

impl fmt::Display for NoopMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoopMode::Echo => write!(f, "echo"),
            NoopMode::Constant(v) => write!(f, "constant({v})"),
        }
    }
}
