use std::convert::TryFrom;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMessageType {
    Call = 1,
    Reply = 2,
    Exception = 3,
}

impl TryFrom<u8> for RpcMessageType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RpcMessageType::Call),
            2 => Ok(RpcMessageType::Reply),
            3 => Ok(RpcMessageType::Exception),
            _ => Err(()),
        }
    }
}
