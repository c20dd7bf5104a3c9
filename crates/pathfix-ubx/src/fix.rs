use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{DEGREES_PER_UNIT, MM_PER_METER};
use crate::message::MessageKind;

/// Position fields as they appear in the message payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawFixFields {
    /// GPS time of week (ms).
    pub time_of_week_ms: u32,
    /// Longitude (degrees × 1e7).
    pub lon_scaled: i32,
    /// Latitude (degrees × 1e7).
    pub lat_scaled: i32,
    /// Height above the ellipsoid (mm).
    pub height_mm: i32,
    /// Height above mean sea level (mm).
    pub height_msl_mm: i32,
    /// Horizontal accuracy estimate (mm).
    pub horizontal_accuracy_mm: u32,
    /// Vertical accuracy estimate (mm).
    pub vertical_accuracy_mm: u32,
}

impl RawFixFields {
    /// Height above mean sea level in meters.
    pub fn height_msl_m(&self) -> f64 {
        self.height_msl_mm as f64 / MM_PER_METER
    }

    /// Horizontal accuracy estimate in meters.
    pub fn horizontal_accuracy_m(&self) -> f64 {
        self.horizontal_accuracy_mm as f64 / MM_PER_METER
    }

    /// Vertical accuracy estimate in meters.
    pub fn vertical_accuracy_m(&self) -> f64 {
        self.vertical_accuracy_mm as f64 / MM_PER_METER
    }
}

/// A geodetic position in degrees and meters.
///
/// `(0, 0)` latitude/longitude is the "absent" sentinel. Callers must check
/// [`GeodeticFix::is_sentinel`] before using a fix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodeticFix {
    /// Latitude (degrees).
    pub latitude_deg: f64,
    /// Longitude (degrees).
    pub longitude_deg: f64,
    /// Height above the ellipsoid (m).
    pub height_m: f64,
}

impl GeodeticFix {
    /// The absent fix.
    pub const SENTINEL: GeodeticFix = GeodeticFix::new(0.0, 0.0, 0.0);

    pub const fn new(latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            height_m,
        }
    }

    /// True when latitude and longitude are both zero.
    pub fn is_sentinel(&self) -> bool {
        self.latitude_deg == 0.0 && self.longitude_deg == 0.0
    }
}

impl From<&RawFixFields> for GeodeticFix {
    fn from(raw: &RawFixFields) -> Self {
        Self {
            latitude_deg: raw.lat_scaled as f64 * DEGREES_PER_UNIT,
            longitude_deg: raw.lon_scaled as f64 * DEGREES_PER_UNIT,
            height_m: raw.height_mm as f64 / MM_PER_METER,
        }
    }
}

impl fmt::Display for GeodeticFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(lat: {:.7}, lon: {:.7}, h: {:.3} m)",
            self.latitude_deg, self.longitude_deg, self.height_m
        )
    }
}

/// Raw fields together with the layout they were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodedFix {
    pub kind: MessageKind,
    pub raw: RawFixFields,
}

impl DecodedFix {
    /// Scales the raw fields into degrees and meters.
    pub fn fix(&self) -> GeodeticFix {
        GeodeticFix::from(&self.raw)
    }
}
