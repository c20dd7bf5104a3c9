//! Payload layouts of the supported position messages.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{CLASS_NAV, ID_NAV_POSLLH, ID_NAV_PVT, NAV_POSLLH_PAYLOAD_LEN, NAV_PVT_MIN_PAYLOAD_LEN};
use crate::error::DecodeError;
use crate::fix::RawFixFields;

/// The message layouts the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageKind {
    /// NAV-POSLLH, class 0x01 id 0x02.
    PositionOnly,
    /// NAV-PVT, class 0x01 id 0x07.
    NavigationSolution,
}

/// Byte offsets of each field inside a payload. All fields are 4 bytes, little-endian.
struct FieldOffsets {
    time_of_week: usize,
    lon: usize,
    lat: usize,
    height: usize,
    height_msl: usize,
    horizontal_accuracy: usize,
    vertical_accuracy: usize,
}

const POSITION_ONLY_OFFSETS: FieldOffsets = FieldOffsets {
    time_of_week: 0,
    lon: 4,
    lat: 8,
    height: 12,
    height_msl: 16,
    horizontal_accuracy: 20,
    vertical_accuracy: 24,
};

const NAVIGATION_SOLUTION_OFFSETS: FieldOffsets = FieldOffsets {
    time_of_week: 0,
    lon: 24,
    lat: 28,
    height: 32,
    height_msl: 36,
    horizontal_accuracy: 40,
    vertical_accuracy: 44,
};

impl MessageKind {
    /// Looks up the layout for a class/id pair.
    pub fn from_ids(class: u8, id: u8) -> Option<Self> {
        match (class, id) {
            (CLASS_NAV, ID_NAV_POSLLH) => Some(MessageKind::PositionOnly),
            (CLASS_NAV, ID_NAV_PVT) => Some(MessageKind::NavigationSolution),
            _ => None,
        }
    }

    /// The class/id pair that identifies this layout on the wire.
    pub fn ids(&self) -> (u8, u8) {
        match self {
            MessageKind::PositionOnly => (CLASS_NAV, ID_NAV_POSLLH),
            MessageKind::NavigationSolution => (CLASS_NAV, ID_NAV_PVT),
        }
    }

    /// Fewest payload bytes that hold every field this layout reads.
    pub fn min_payload_len(&self) -> usize {
        match self {
            MessageKind::PositionOnly => NAV_POSLLH_PAYLOAD_LEN,
            MessageKind::NavigationSolution => NAV_PVT_MIN_PAYLOAD_LEN,
        }
    }

    fn offsets(&self) -> &'static FieldOffsets {
        match self {
            MessageKind::PositionOnly => &POSITION_ONLY_OFFSETS,
            MessageKind::NavigationSolution => &NAVIGATION_SOLUTION_OFFSETS,
        }
    }

    /// Reads the position fields out of `payload`.
    ///
    /// Bytes past the last field are ignored.
    pub fn parse_payload(&self, payload: &[u8]) -> Result<RawFixFields, DecodeError> {
        let needed = self.min_payload_len();
        if payload.len() < needed {
            return Err(DecodeError::PayloadTooShort {
                kind: *self,
                needed,
                actual: payload.len(),
            });
        }

        let field = |offset: usize| -> Result<[u8; 4], DecodeError> {
            payload
                .get(offset..offset + 4)
                .and_then(|bytes| bytes.try_into().ok())
                .ok_or(DecodeError::PayloadTooShort {
                    kind: *self,
                    needed: offset + 4,
                    actual: payload.len(),
                })
        };

        let at = self.offsets();
        Ok(RawFixFields {
            time_of_week_ms: u32::from_le_bytes(field(at.time_of_week)?),
            lon_scaled: i32::from_le_bytes(field(at.lon)?),
            lat_scaled: i32::from_le_bytes(field(at.lat)?),
            height_mm: i32::from_le_bytes(field(at.height)?),
            height_msl_mm: i32::from_le_bytes(field(at.height_msl)?),
            horizontal_accuracy_mm: u32::from_le_bytes(field(at.horizontal_accuracy)?),
            vertical_accuracy_mm: u32::from_le_bytes(field(at.vertical_accuracy)?),
        })
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::PositionOnly => write!(f, "NAV-POSLLH"),
            MessageKind::NavigationSolution => write!(f, "NAV-PVT"),
        }
    }
}
