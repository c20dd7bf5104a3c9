//! Frame layout detection and bounds-checked splitting.

use crate::checksum::checksum;
use crate::constants::{CHECKSUM_LEN, HEADER_LEN, MIN_BUFFER_LEN, SYNC, SYNC_LEN};
use crate::error::{DecodeError, PayloadTooLarge};

/// How a message sits in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Sync marker, header, payload, checksum.
    Framed,
    /// Header and payload, optionally followed by a checksum.
    Unframed,
}

/// A message split into its parts. Every slice borrows from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub layout: Layout,
    pub class: u8,
    pub id: u8,
    pub payload: &'a [u8],
    /// Class, id, length and payload; the bytes the checksum covers.
    checked: &'a [u8],
    /// Checksum bytes as received, if the buffer carries them.
    pub checksum: Option<[u8; 2]>,
}

impl<'a> Frame<'a> {
    /// Splits `buffer` into a frame.
    ///
    /// Never reads past `buffer.len()`; a length field that promises more
    /// bytes than the buffer holds is reported as [`DecodeError::Truncated`].
    pub fn parse(buffer: &'a [u8]) -> Result<Self, DecodeError> {
        if buffer.len() < MIN_BUFFER_LEN {
            return Err(DecodeError::Truncated {
                needed: MIN_BUFFER_LEN,
                available: buffer.len(),
            });
        }

        let (layout, body) = match buffer.strip_prefix(&SYNC[..]) {
            Some(rest) => (Layout::Framed, rest),
            None => (Layout::Unframed, buffer),
        };
        let prefix_len = buffer.len() - body.len();

        let (header, rest) = body.split_at_checked(HEADER_LEN).ok_or(DecodeError::Truncated {
            needed: prefix_len + HEADER_LEN,
            available: buffer.len(),
        })?;
        let (class, id) = (header[0], header[1]);
        let payload_len = u16::from_le_bytes([header[2], header[3]]) as usize;

        let checksum_present = match layout {
            Layout::Framed => true,
            Layout::Unframed => rest.len() >= payload_len + CHECKSUM_LEN,
        };
        let trailer_len = if checksum_present { CHECKSUM_LEN } else { 0 };
        let needed = prefix_len + HEADER_LEN + payload_len + trailer_len;
        if buffer.len() < needed {
            return Err(DecodeError::Truncated {
                needed,
                available: buffer.len(),
            });
        }

        let (payload, trailer) = rest.split_at(payload_len);
        let checksum = match trailer {
            [ck_a, ck_b, ..] if checksum_present => Some([*ck_a, *ck_b]),
            _ => None,
        };
        let checked = &body[..HEADER_LEN + payload_len];

        Ok(Frame {
            layout,
            class,
            id,
            payload,
            checked,
            checksum,
        })
    }

    /// Compares the received checksum against one computed over the frame.
    ///
    /// A frame without checksum bytes passes unchecked.
    pub fn verify_checksum(&self) -> Result<(), DecodeError> {
        let Some(received) = self.checksum else {
            return Ok(());
        };
        let computed = checksum(self.checked);
        if computed == received {
            Ok(())
        } else {
            Err(DecodeError::ChecksumInvalid { computed, received })
        }
    }

    /// Total bytes of the buffer this frame spans.
    pub fn wire_len(&self) -> usize {
        let prefix = match self.layout {
            Layout::Framed => SYNC_LEN,
            Layout::Unframed => 0,
        };
        let trailer = if self.checksum.is_some() { CHECKSUM_LEN } else { 0 };
        prefix + self.checked.len() + trailer
    }
}

/// Builds a framed message around `payload` with a valid checksum.
pub fn encode_frame(class: u8, id: u8, payload: &[u8]) -> Result<Vec<u8>, PayloadTooLarge> {
    let len = u16::try_from(payload.len()).map_err(|_| PayloadTooLarge(payload.len()))?;

    let mut frame = Vec::with_capacity(SYNC_LEN + HEADER_LEN + payload.len() + CHECKSUM_LEN);
    frame.extend_from_slice(&SYNC);
    frame.push(class);
    frame.push(id);
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(payload);
    let ck = checksum(&frame[SYNC_LEN..]);
    frame.extend_from_slice(&ck);
    Ok(frame)
}
