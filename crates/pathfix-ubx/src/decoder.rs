use tracing::{debug, trace};

use crate::error::DecodeError;
use crate::fix::{DecodedFix, GeodeticFix};
use crate::frame::Frame;
use crate::message::MessageKind;

/// Whether received checksum bytes are compared against the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChecksumPolicy {
    /// Reject a message whose checksum bytes do not match.
    #[default]
    Enforce,
    /// Parse the frame the same way but never compare checksum bytes.
    Skip,
}

/// Position message decoder.
///
/// Holds no state between calls; one decoder may be reused for any number
/// of buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoder {
    checksum: ChecksumPolicy,
}

impl Decoder {
    pub fn new(checksum: ChecksumPolicy) -> Self {
        Self { checksum }
    }

    pub fn checksum_policy(&self) -> ChecksumPolicy {
        self.checksum
    }

    /// Decodes a buffer into raw fields and the layout they came from.
    pub fn decode_raw(&self, buffer: &[u8]) -> Result<DecodedFix, DecodeError> {
        let frame = Frame::parse(buffer)?;
        trace!(
            layout = ?frame.layout,
            class = frame.class,
            id = frame.id,
            payload_len = frame.payload.len(),
            has_checksum = frame.checksum.is_some(),
            "split frame"
        );

        if self.checksum == ChecksumPolicy::Enforce {
            frame.verify_checksum()?;
        }

        let kind = MessageKind::from_ids(frame.class, frame.id).ok_or(DecodeError::UnsupportedMessage {
            class: frame.class,
            id: frame.id,
        })?;
        let raw = kind.parse_payload(frame.payload)?;
        debug!(
            %kind,
            time_of_week_ms = raw.time_of_week_ms,
            h_acc_m = raw.horizontal_accuracy_m(),
            v_acc_m = raw.vertical_accuracy_m(),
            "decoded position message"
        );
        Ok(DecodedFix { kind, raw })
    }

    /// Decodes a buffer into a geodetic fix.
    pub fn decode(&self, buffer: &[u8]) -> Result<GeodeticFix, DecodeError> {
        self.decode_raw(buffer).map(|decoded| decoded.fix())
    }
}

/// Decodes a framed or unframed position message, enforcing the checksum
/// when one is present.
///
/// # Example
/// ```
/// use pathfix_ubx::{decode, encode_frame};
///
/// let mut payload = [0u8; 28];
/// payload[4..8].copy_from_slice(&139_398_792i32.to_le_bytes());
/// payload[8..12].copy_from_slice(&453_456_789i32.to_le_bytes());
/// let frame = encode_frame(0x01, 0x02, &payload).unwrap();
///
/// let fix = decode(&frame).unwrap();
/// assert!((fix.longitude_deg - 13.9398792).abs() < 1e-9);
/// ```
pub fn decode(buffer: &[u8]) -> Result<GeodeticFix, DecodeError> {
    Decoder::default().decode(buffer)
}

/// Like [`decode`], but returns the unscaled fields.
pub fn decode_raw(buffer: &[u8]) -> Result<DecodedFix, DecodeError> {
    Decoder::default().decode_raw(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::checksum;
    use crate::frame::encode_frame;

    fn posllh_payload(lon: i32, lat: i32, height_mm: i32) -> Vec<u8> {
        let mut payload = Vec::with_capacity(28);
        payload.extend_from_slice(&345_600_000u32.to_le_bytes());
        payload.extend_from_slice(&lon.to_le_bytes());
        payload.extend_from_slice(&lat.to_le_bytes());
        payload.extend_from_slice(&height_mm.to_le_bytes());
        payload.extend_from_slice(&(height_mm - 50_000).to_le_bytes());
        payload.extend_from_slice(&1_200u32.to_le_bytes());
        payload.extend_from_slice(&2_400u32.to_le_bytes());
        payload
    }

    fn pvt_payload(lon: i32, lat: i32, len: usize) -> Vec<u8> {
        let mut payload = vec![0xeeu8; len];
        payload[0..4].copy_from_slice(&7_000u32.to_le_bytes());
        payload[24..28].copy_from_slice(&lon.to_le_bytes());
        payload[28..32].copy_from_slice(&lat.to_le_bytes());
        payload[32..36].copy_from_slice(&100_000i32.to_le_bytes());
        payload[36..40].copy_from_slice(&60_000i32.to_le_bytes());
        payload[40..44].copy_from_slice(&900u32.to_le_bytes());
        payload[44..48].copy_from_slice(&1_800u32.to_le_bytes());
        payload
    }

    /// Rewrites the trailing checksum of a framed message.
    fn refresh_checksum(frame: &mut [u8]) {
        let end = frame.len() - 2;
        let ck = checksum(&frame[2..end]);
        frame[end..].copy_from_slice(&ck);
    }

    #[test]
    fn test_position_only() {
        let frame = encode_frame(0x01, 0x02, &posllh_payload(139_398_792, 453_456_789, 512_000)).unwrap();
        let fix = decode(&frame).unwrap();
        assert!((fix.longitude_deg - 13.9398792).abs() < 1e-9);
        assert!((fix.latitude_deg - 45.3456789).abs() < 1e-9);
        assert!((fix.height_m - 512.0).abs() < 1e-9);
        assert!(!fix.is_sentinel());

        let decoded = decode_raw(&frame).unwrap();
        assert_eq!(decoded.kind, MessageKind::PositionOnly);
        assert_eq!(decoded.raw.time_of_week_ms, 345_600_000);
        assert_eq!(decoded.raw.height_msl_mm, 462_000);
        assert_eq!(decoded.raw.horizontal_accuracy_mm, 1_200);
        assert_eq!(decoded.raw.vertical_accuracy_mm, 2_400);
    }

    #[test]
    fn test_navigation_solution() {
        // Full-size NAV-PVT payload; only the first 48 bytes are read
        let frame = encode_frame(0x01, 0x07, &pvt_payload(-1_225_000_000, 377_500_000, 92)).unwrap();
        let decoded = decode_raw(&frame).unwrap();
        assert_eq!(decoded.kind, MessageKind::NavigationSolution);
        assert_eq!(decoded.raw.time_of_week_ms, 7_000);
        assert_eq!(decoded.raw.height_mm, 100_000);
        assert_eq!(decoded.raw.height_msl_mm, 60_000);
        assert_eq!(decoded.raw.horizontal_accuracy_mm, 900);
        assert_eq!(decoded.raw.vertical_accuracy_mm, 1_800);

        let fix = decoded.fix();
        assert!((fix.longitude_deg - (-122.5)).abs() < 1e-9);
        assert!((fix.latitude_deg - 37.75).abs() < 1e-9);
        assert!((fix.height_m - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_unframed_with_and_without_checksum() {
        let frame = encode_frame(0x01, 0x02, &posllh_payload(139_398_792, 453_456_789, 0)).unwrap();
        let expected = decode(&frame).unwrap();

        assert_eq!(decode(&frame[2..]).unwrap(), expected);
        assert_eq!(decode(&frame[2..frame.len() - 2]).unwrap(), expected);

        // An unframed checksum is still enforced
        let mut corrupted = frame[2..].to_vec();
        let last = corrupted.len() - 1;
        corrupted[last] ^= 0xff;
        assert!(matches!(decode(&corrupted), Err(DecodeError::ChecksumInvalid { .. })));
    }

    #[test]
    fn test_checksum_round_trip() {
        let frame = encode_frame(0x01, 0x02, &posllh_payload(10, 20, 30)).unwrap();
        for index in 6..frame.len() - 2 {
            let mut corrupted = frame.clone();
            corrupted[index] = corrupted[index].wrapping_add(1);
            assert!(
                matches!(decode(&corrupted), Err(DecodeError::ChecksumInvalid { .. })),
                "payload byte {index}"
            );
            refresh_checksum(&mut corrupted);
            assert!(decode(&corrupted).is_ok(), "payload byte {index}");
        }
    }

    #[test]
    fn test_every_prefix_is_truncated() {
        let frame = encode_frame(0x01, 0x02, &posllh_payload(10, 20, 30)).unwrap();
        for end in 0..frame.len() {
            assert!(
                matches!(decode(&frame[..end]), Err(DecodeError::Truncated { .. })),
                "prefix of {end} bytes"
            );
        }
    }

    #[test]
    fn test_oversized_length_field() {
        let mut frame = encode_frame(0x01, 0x02, &posllh_payload(10, 20, 30)).unwrap();
        frame[4] = 0xff;
        frame[5] = 0xff;
        assert_eq!(
            decode(&frame),
            Err(DecodeError::Truncated {
                needed: 2 + 4 + 0xffff + 2,
                available: frame.len(),
            })
        );
    }

    #[test]
    fn test_short_payloads() {
        let frame = encode_frame(0x01, 0x02, &[0u8; 20]).unwrap();
        assert_eq!(
            decode(&frame),
            Err(DecodeError::PayloadTooShort {
                kind: MessageKind::PositionOnly,
                needed: 28,
                actual: 20,
            })
        );

        let frame = encode_frame(0x01, 0x07, &pvt_payload(1, 1, 48)[..47]).unwrap();
        assert!(matches!(
            decode(&frame),
            Err(DecodeError::PayloadTooShort {
                kind: MessageKind::NavigationSolution,
                ..
            })
        ));
    }

    #[test]
    fn test_unsupported_message() {
        let frame = encode_frame(0x01, 0x03, &[0u8; 16]).unwrap();
        assert_eq!(
            decode(&frame),
            Err(DecodeError::UnsupportedMessage { class: 0x01, id: 0x03 })
        );
    }

    #[test]
    fn test_skip_policy() {
        let mut frame = encode_frame(0x01, 0x02, &posllh_payload(139_398_792, 453_456_789, 0)).unwrap();
        let last = frame.len() - 1;
        frame[last] ^= 0x5a;
        assert!(matches!(decode(&frame), Err(DecodeError::ChecksumInvalid { .. })));

        let lenient = Decoder::new(ChecksumPolicy::Skip);
        assert_eq!(lenient.checksum_policy(), ChecksumPolicy::Skip);
        let fix = lenient.decode(&frame).unwrap();
        assert!((fix.latitude_deg - 45.3456789).abs() < 1e-9);

        // Skipping the comparison does not relax the framing checks
        assert!(matches!(
            lenient.decode(&frame[..frame.len() - 3]),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn test_decoder_is_reusable_after_errors() {
        let decoder = Decoder::default();
        let good = encode_frame(0x01, 0x02, &posllh_payload(1, 2, 3)).unwrap();
        assert!(decoder.decode(&good[..5]).is_err());
        assert!(decoder.decode(&good).is_ok());
    }
}
