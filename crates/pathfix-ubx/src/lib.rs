//! Decoder for the two u-blox UBX position messages a receiver reports:
//! NAV-POSLLH (geodetic position) and NAV-PVT (navigation solution).
//!
//! Buffers may be framed (sync marker, header, payload, checksum) or
//! unframed (starting at the class byte, checksum optional). Every read is a
//! checked slice of the input, so a malformed length field yields
//! [`DecodeError::Truncated`] instead of an out-of-bounds access.

pub mod checksum;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod fix;
pub mod frame;
pub mod hex;
pub mod message;

pub use checksum::checksum;
pub use decoder::{ChecksumPolicy, Decoder, decode, decode_raw};
pub use error::{DecodeError, PayloadTooLarge};
pub use fix::{DecodedFix, GeodeticFix, RawFixFields};
pub use frame::{Frame, Layout, encode_frame};
pub use hex::{format_hex_line, parse_hex_line};
pub use message::MessageKind;
