use thiserror::Error;

use crate::message::MessageKind;

/// Errors produced while turning bytes into a position fix.
///
/// Every variant is recoverable: a failed decode leaves nothing behind and
/// another buffer can be decoded straight away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The buffer ends before the length its header declares.
    #[error("buffer truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// The trailing checksum does not match the message contents.
    #[error("checksum mismatch: computed {computed:02X?}, received {received:02X?}")]
    ChecksumInvalid { computed: [u8; 2], received: [u8; 2] },

    /// The payload is shorter than the message layout requires.
    #[error("{kind} payload too short: need {needed} bytes, have {actual}")]
    PayloadTooShort {
        kind: MessageKind,
        needed: usize,
        actual: usize,
    },

    /// The class/id pair is not a supported position message.
    #[error("unsupported message: class 0x{class:02X} id 0x{id:02X}")]
    UnsupportedMessage { class: u8, id: u8 },

    /// A token of a hex line is not a single byte in hexadecimal.
    #[error("invalid hex byte token {0:?}")]
    InvalidHex(String),
}

/// A payload that does not fit the 16-bit length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("payload of {0} bytes exceeds the 16-bit length field")]
pub struct PayloadTooLarge(pub usize);
