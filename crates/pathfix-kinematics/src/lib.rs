#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library that reduces a grid path to wheel-driven motion commands."]
#![doc = ""]
#![doc = "This crate provides the wheel model, the fixed step distance table and the"]
#![doc = "heading accumulation policies used to summarize a planned path."]

use core::f64::consts::PI;
use core::fmt;
use libm::{atan2, fabs};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::KinematicsError;

/// Distance travelled by a step that changes exactly one coordinate (cells).
pub const ORTHOGONAL_STEP_DISTANCE: f64 = 1.0;

/// Distance travelled by a step that changes both coordinates (cells).
pub const DIAGONAL_STEP_DISTANCE: f64 = 1.4142136;

/// A single point of a grid path, addressed by row and column.
///
/// Implemented for plain integer tuples so paths can be summarized without
/// depending on a particular grid representation.
pub trait Waypoint {
    /// Row index of the point.
    fn row(&self) -> i64;
    /// Column index of the point.
    fn col(&self) -> i64;
}

impl Waypoint for (i32, i32) {
    fn row(&self) -> i64 {
        self.0 as i64
    }

    fn col(&self) -> i64 {
        self.1 as i64
    }
}

impl Waypoint for (i64, i64) {
    fn row(&self) -> i64 {
        self.0
    }

    fn col(&self) -> i64 {
        self.1
    }
}

impl Waypoint for (usize, usize) {
    fn row(&self) -> i64 {
        self.0 as i64
    }

    fn col(&self) -> i64 {
        self.1 as i64
    }
}

/// Normalize an angle in degrees to be within `[-180, 180)`.
///
/// Angles at `180` will be normalized to `-180`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a >= 180.0 {
        a - 360.0
    } else if a < -180.0 {
        a + 360.0
    } else {
        a
    }
}

/// Bearing of the segment `from -> to` in degrees, `atan2(Δrow, Δcol)`.
pub fn bearing_degrees<W: Waypoint>(from: &W, to: &W) -> f64 {
    let d_row = (to.row() - from.row()) as f64;
    let d_col = (to.col() - from.col()) as f64;
    atan2(d_row, d_col) * 180.0 / PI
}

/// Distance charged for the step `from -> to`.
///
/// The table only distinguishes diagonal steps (both coordinates change) from
/// everything else.
pub fn step_distance<W: Waypoint>(from: &W, to: &W) -> f64 {
    if to.row() != from.row() && to.col() != from.col() {
        DIAGONAL_STEP_DISTANCE
    } else {
        ORTHOGONAL_STEP_DISTANCE
    }
}

/// Drive wheel parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wheel {
    /// Wheel radius (m).
    radius: f64,
    /// Wheel speed (revolutions per minute).
    rpm: f64,
}

impl Wheel {
    /// Construct a new wheel model.
    ///
    /// # Arguments
    ///
    /// * `radius`: The radius of the drive wheel in meters.
    /// * `rpm`: The wheel speed in revolutions per minute.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidWheelRadius)` if `radius` is not positive.
    /// Returns `Err(KinematicsError::InvalidWheelSpeed)` if `rpm` is not positive.
    pub const fn new(radius: f64, rpm: f64) -> Result<Self, KinematicsError> {
        if !(radius > 0.0) {
            return Err(KinematicsError::InvalidWheelRadius("must be positive"));
        }
        if !(rpm > 0.0) {
            return Err(KinematicsError::InvalidWheelSpeed("must be positive"));
        }
        Ok(Wheel { radius, rpm })
    }

    /// Returns the wheel radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the wheel speed in RPM.
    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    /// Linear ground speed in m/s: circumference times revolutions per second.
    pub fn linear_velocity(&self) -> f64 {
        2.0 * PI * self.radius * (self.rpm / 60.0)
    }
}

impl fmt::Display for Wheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wheel (r: {:.3} m, {:.1} rpm)", self.radius, self.rpm)
    }
}

/// How the heading change of a path is accumulated.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingPolicy {
    /// Sum of the magnitudes of every segment's absolute bearing.
    #[default]
    AbsoluteBearing,
    /// Sum of the magnitudes of the turns between consecutive segments.
    TurnDelta,
}

impl HeadingPolicy {
    /// Accumulates the heading total of `path` in degrees.
    ///
    /// Paths with fewer than two points have no segments and yield `0.0`.
    pub fn accumulate<W: Waypoint>(&self, path: &[W]) -> f64 {
        let bearings = path.windows(2).map(|seg| bearing_degrees(&seg[0], &seg[1]));
        match self {
            HeadingPolicy::AbsoluteBearing => bearings.map(fabs).sum(),
            HeadingPolicy::TurnDelta => {
                let mut total = 0.0;
                let mut previous: Option<f64> = None;
                for bearing in bearings {
                    if let Some(prev) = previous {
                        total += fabs(normalize_degrees(bearing - prev));
                    }
                    previous = Some(bearing);
                }
                total
            }
        }
    }
}

impl fmt::Display for HeadingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadingPolicy::AbsoluteBearing => write!(f, "absolute-bearing"),
            HeadingPolicy::TurnDelta => write!(f, "turn-delta"),
        }
    }
}

/// Aggregate motion needed to drive a path.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionCommand {
    /// Time needed to travel the path at the wheel's linear velocity (s).
    pub elapsed_seconds: f64,
    /// Accumulated heading change (degrees).
    pub heading_change_degrees: f64,
}

impl MotionCommand {
    /// Construct a new motion command.
    pub const fn new(elapsed_seconds: f64, heading_change_degrees: f64) -> Self {
        MotionCommand {
            elapsed_seconds,
            heading_change_degrees,
        }
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(t: {:.4} s, Δθ: {:.2} deg)",
            self.elapsed_seconds, self.heading_change_degrees
        )
    }
}

/// Reduces planned paths to motion commands for a given wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Odometry {
    wheel: Wheel,
    policy: HeadingPolicy,
}

impl Odometry {
    /// Construct a new odometry helper.
    ///
    /// # Arguments
    ///
    /// * `wheel`: The drive wheel model.
    /// * `policy`: How heading changes are accumulated along the path.
    pub const fn new(wheel: Wheel, policy: HeadingPolicy) -> Self {
        Odometry { wheel, policy }
    }

    /// Returns the wheel model.
    pub fn wheel(&self) -> Wheel {
        self.wheel
    }

    /// Returns the heading accumulation policy.
    pub fn policy(&self) -> HeadingPolicy {
        self.policy
    }

    /// Summarizes `path` into travel time and heading change.
    ///
    /// Distances come from the fixed step table rather than the Euclidean
    /// length of each step. Paths with fewer than two points yield a zero
    /// command.
    pub fn summarize<W: Waypoint>(&self, path: &[W]) -> MotionCommand {
        if path.len() < 2 {
            return MotionCommand::default();
        }

        let distance: f64 = path
            .windows(2)
            .map(|seg| step_distance(&seg[0], &seg[1]))
            .sum();

        MotionCommand::new(
            distance / self.wheel.linear_velocity(),
            self.policy.accumulate(path),
        )
    }
}
