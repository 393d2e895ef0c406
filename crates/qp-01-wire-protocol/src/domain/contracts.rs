//! # Contract Function Frames
//!
//! Read-only contract function invocations (`type = 42`) and their
//! responses (`type = 43`). A response with an empty output means the
//! invocation failed on the node.

use super::errors::{ProtocolError, Result};
use super::header::{fresh_dejavu, RequestResponseHeader, HEADER_SIZE};
use super::message_types::MessageType;
use shared_types::{ByteReader, ByteWriter, PublicKey};

/// Contract index of the utility contract.
pub const UTIL_CONTRACT_INDEX: u32 = 4;

/// Read-only functions of the utility contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum UtilFunction {
    GetSendToManyV1Fee = 1,
}

/// State-changing procedures of the utility contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum UtilProcedure {
    SendToManyV1 = 1,
    BurnQubic = 2,
}

/// Public key addressing contract `index`: first u64 LE holds the index.
pub fn contract_address(index: u32) -> PublicKey {
    let mut key = [0u8; 32];
    key[..8].copy_from_slice(&u64::from(index).to_le_bytes());
    key
}

/// Invocation of a contract function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractFunctionRequest {
    pub contract_index: u32,
    pub input_type: u16,
    pub input: Vec<u8>,
}

impl ContractFunctionRequest {
    /// Fixed part of the payload before the variable input.
    pub const FIXED_SIZE: usize = 8;

    pub fn new(contract_index: u32, input_type: u16, input: Vec<u8>) -> Self {
        Self {
            contract_index,
            input_type,
            input,
        }
    }

    /// Fee query for SendToManyV1 payments.
    pub fn send_to_many_fee() -> Self {
        Self::new(
            UTIL_CONTRACT_INDEX,
            UtilFunction::GetSendToManyV1Fee as u16,
            Vec::new(),
        )
    }

    /// Full frame with a fresh nonzero dejavu.
    pub fn to_frame(&self) -> Result<Vec<u8>> {
        self.to_frame_with_dejavu(fresh_dejavu())
    }

    pub fn to_frame_with_dejavu(&self, dejavu: u32) -> Result<Vec<u8>> {
        let input_size = u16::try_from(self.input.len()).map_err(|_| {
            ProtocolError::InputTooLarge {
                len: self.input.len(),
            }
        })?;
        let payload_len = Self::FIXED_SIZE + self.input.len();
        let header = RequestResponseHeader::for_payload(
            MessageType::RequestContractFunction,
            payload_len,
            dejavu,
        )?;

        let mut writer = ByteWriter::with_capacity(HEADER_SIZE + payload_len);
        header.encode_into(&mut writer);
        writer
            .put_u32(self.contract_index)
            .put_u16(self.input_type)
            .put_u16(input_size)
            .put_bytes(&self.input);
        Ok(writer.into_inner())
    }
}

/// Output of a contract function invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractFunctionResponse {
    pub dejavu: u32,
    pub output: Vec<u8>,
}

impl ContractFunctionResponse {
    /// Parse a complete response frame.
    pub fn from_frame(frame: &[u8]) -> Result<Self> {
        let header = RequestResponseHeader::decode(frame)?;
        if header.message_type() != MessageType::RespondContractFunction.as_u8() {
            return Err(ProtocolError::UnexpectedType {
                expected: MessageType::RespondContractFunction.as_u8(),
                actual: header.message_type(),
            });
        }
        let output = frame
            .get(HEADER_SIZE..header.size())
            .ok_or(ProtocolError::FrameOverrun {
                offset: 0,
                declared: header.size() as u32,
                available: frame.len(),
            })?
            .to_vec();
        Ok(Self {
            dejavu: header.dejavu(),
            output,
        })
    }

    /// The node signals failure with an empty output.
    pub fn is_failure(&self) -> bool {
        self.output.is_empty()
    }

    /// Decode the SendToManyV1 fee output (one i64).
    pub fn send_to_many_fee(&self) -> Result<i64> {
        if self.output.len() < 8 {
            return Err(ProtocolError::PayloadSize {
                expected: 8,
                actual: self.output.len(),
            });
        }
        Ok(ByteReader::new(&self.output).i64()?)
    }
}

/// Input of the burn procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnQubicInput {
    pub amount: i64,
}

impl BurnQubicInput {
    pub const SIZE: usize = 8;

    pub fn encode(&self) -> [u8; Self::SIZE] {
        self.amount.to_le_bytes()
    }
}
