//! # Velocity Command
//!
//! The three-axis velocity the teleop node commands.

use std::fmt;

/// One independent component of a velocity command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Forward/back speed (m/s).
    Linear,
    /// Rotation about the vertical axis (rad/s).
    Angular,
    /// Strafe speed (m/s).
    Lateral,
}

/// Commanded velocity.
///
/// All axes start at zero.
///
/// # Examples
///
/// ```
/// use keyboard_teleop::teleop::velocity::{Axis, Velocity};
///
/// let mut velocity = Velocity::default();
/// assert!(velocity.is_stopped());
///
/// velocity.set(Axis::Linear, 0.5);
/// assert_eq!(velocity.get(Axis::Linear), 0.5);
/// assert_eq!(velocity.angular, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub linear: f64,
    pub angular: f64,
    pub lateral: f64,
}

impl Velocity {
    /// All axes zero.
    pub const STOP: Velocity = Velocity {
        linear: 0.0,
        angular: 0.0,
        lateral: 0.0,
    };

    #[must_use]
    pub fn new(linear: f64, angular: f64, lateral: f64) -> Self {
        Self {
            linear,
            angular,
            lateral,
        }
    }

    #[must_use]
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Linear => self.linear,
            Axis::Angular => self.angular,
            Axis::Lateral => self.lateral,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Linear => self.linear = value,
            Axis::Angular => self.angular = value,
            Axis::Lateral => self.lateral = value,
        }
    }

    /// True when every axis is zero.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        *self == Self::STOP
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "linear={:+.2} angular={:+.2} lateral={:+.2}",
            self.linear, self.angular, self.lateral
        )
    }
}
