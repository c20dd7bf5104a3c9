//! Error types for the kinematics library.
//!
//! This module defines the errors returned when a wheel model is built from
//! physically meaningless parameters.

#![warn(missing_docs)]

use core::fmt;

/// Errors that can occur when configuring the wheel model.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Error for invalid wheel radius.
    /// This variant is returned when a wheel radius is provided that is not positive.
    InvalidWheelRadius(&'static str),
    /// Error for invalid wheel speed.
    /// This variant is returned when a wheel speed in RPM is provided that is not positive.
    InvalidWheelSpeed(&'static str),
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::InvalidWheelRadius(msg) => write!(f, "Invalid wheel radius: {}", msg),
            KinematicsError::InvalidWheelSpeed(msg) => write!(f, "Invalid wheel speed: {}", msg),
        }
    }
}

impl core::error::Error for KinematicsError {}
