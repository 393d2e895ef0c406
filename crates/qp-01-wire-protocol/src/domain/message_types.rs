//! # Message Type Registry
//!
//! Values of the header `type` byte understood by this client.

/// Frame types used by the pool core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    /// Signed peer-to-peer message (solution broadcasts).
    BroadcastMessage = 1,
    /// Signed transaction.
    BroadcastTransaction = 24,
    /// Contract function invocation.
    RequestContractFunction = 42,
    /// Contract function output (empty when the invocation failed).
    RespondContractFunction = 43,
    /// Header-only request for the node's system info.
    RequestSystemInfo = 46,
    /// System info snapshot.
    RespondSystemInfo = 47,
}

impl MessageType {
    /// Wire value.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Look up a known type.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::BroadcastMessage),
            24 => Some(Self::BroadcastTransaction),
            42 => Some(Self::RequestContractFunction),
            43 => Some(Self::RespondContractFunction),
            46 => Some(Self::RequestSystemInfo),
            47 => Some(Self::RespondSystemInfo),
            _ => None,
        }
    }
}

impl From<MessageType> for u8 {
    fn from(value: MessageType) -> Self {
        value.as_u8()
    }
}
