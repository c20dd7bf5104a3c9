//! Protocol constants shared by the framing, checksum and payload code.

/// First sync byte of a framed message.
pub const SYNC_CHAR_1: u8 = 0xb5;
/// Second sync byte of a framed message.
pub const SYNC_CHAR_2: u8 = 0x62;
/// Sync marker as it appears on the wire.
pub const SYNC: [u8; 2] = [SYNC_CHAR_1, SYNC_CHAR_2];
pub(crate) const SYNC_LEN: usize = 2;

pub(crate) const CLASS_LEN: usize = 1;
pub(crate) const ID_LEN: usize = 1;
pub(crate) const PAYLOAD_SIZE_LEN: usize = 2;
/// Class, id and payload length; the part of the header every layout carries.
pub(crate) const HEADER_LEN: usize = CLASS_LEN + ID_LEN + PAYLOAD_SIZE_LEN;
pub(crate) const CHECKSUM_LEN: usize = 2;

/// Shortest buffer the decoder will look at.
pub const MIN_BUFFER_LEN: usize = 6;

/// Navigation message class.
pub const CLASS_NAV: u8 = 0x01;
/// Geodetic position solution (NAV-POSLLH).
pub const ID_NAV_POSLLH: u8 = 0x02;
/// Navigation position velocity time solution (NAV-PVT).
pub const ID_NAV_PVT: u8 = 0x07;

/// NAV-POSLLH carries exactly seven 4-byte fields.
pub const NAV_POSLLH_PAYLOAD_LEN: usize = 28;
/// NAV-PVT must reach at least the vertical accuracy field.
pub const NAV_PVT_MIN_PAYLOAD_LEN: usize = 48;

/// Degrees per unit of a scaled latitude or longitude.
pub const DEGREES_PER_UNIT: f64 = 1e-7;
/// Millimeters per meter.
pub const MM_PER_METER: f64 = 1000.0;
