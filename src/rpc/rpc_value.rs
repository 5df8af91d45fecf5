use std::fmt;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcValueTag {
    I32 = 0x08,
    I64 = 0x0A,
    Text = 0x0B,
}

impl TryFrom<u8> for RpcValueTag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x08 => Ok(RpcValueTag::I32),
            0x0A => Ok(RpcValueTag::I64),
            0x0B => Ok(RpcValueTag::Text),
            _ => Err(()),
        }
    }
}

/// The single argument or result carried by a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcValue {
    I32(i32),
    I64(i64),
    Text(String),
}

impl RpcValue {
    /// Wraps an integer using the narrowest tag that holds it.
    pub fn from_i64(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(narrow) => RpcValue::I32(narrow),
            Err(_) => RpcValue::I64(value),
        }
    }

    pub fn tag(&self) -> RpcValueTag {
        match self {
            RpcValue::I32(_) => RpcValueTag::I32,
            RpcValue::I64(_) => RpcValueTag::I64,
            RpcValue::Text(_) => RpcValueTag::Text,
        }
    }

    /// Widens either integer encoding to `i64`. Text yields `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RpcValue::I32(v) => Some(i64::from(*v)),
            RpcValue::I64(v) => Some(*v),
            RpcValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RpcValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for RpcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcValue::I32(v) => write!(f, "{v}"),
            RpcValue::I64(v) => write!(f, "{v}"),
            RpcValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}
