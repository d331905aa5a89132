//! # Output Module
//!
//! Delivers velocity commands to the robot side.
//!
//! This module handles:
//! - The [`VelocitySink`] abstraction (fire-and-forget, no acknowledgement)
//! - Twist-shaped JSON encoding of commands
//! - JSON lines on stdout and UDP datagram transports
//!
//! ## Wire format
//!
//! ```json
//! {"topic":"cmd_vel","stamp":"2024-01-01T00:00:00Z",
//!  "linear":{"x":0.5,"y":0.0,"z":0.0},"angular":{"x":0.0,"y":0.0,"z":1.0}}
//! ```
//!
//! `linear.x` carries the linear axis, `linear.y` the lateral axis and
//! `angular.z` the angular axis.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{OutputConfig, SinkKind};
use crate::error::Result;
use crate::teleop::velocity::Velocity;

pub mod stdout;
pub mod udp;

pub use stdout::JsonLinesSink;
pub use udp::UdpSink;

/// Destination for velocity commands
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VelocitySink: Send {
    /// Send one command
    async fn publish(&mut self, velocity: &Velocity) -> Result<()>;
}

#[async_trait]
impl VelocitySink for Box<dyn VelocitySink> {
    async fn publish(&mut self, velocity: &Velocity) -> Result<()> {
        (**self).publish(velocity).await
    }
}

/// Three-component vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A velocity command as it goes on the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwistMessage<'a> {
    pub topic: &'a str,
    pub stamp: DateTime<Utc>,
    pub linear: Vector3,
    pub angular: Vector3,
}

impl<'a> TwistMessage<'a> {
    /// Builds the message for `velocity` on `topic`, stamped now
    #[must_use]
    pub fn new(topic: &'a str, velocity: &Velocity) -> Self {
        Self::with_stamp(topic, velocity, Utc::now())
    }

    #[must_use]
    pub fn with_stamp(topic: &'a str, velocity: &Velocity, stamp: DateTime<Utc>) -> Self {
        Self {
            topic,
            stamp,
            linear: Vector3 {
                x: velocity.linear,
                y: velocity.lateral,
                z: 0.0,
            },
            angular: Vector3 {
                x: 0.0,
                y: 0.0,
                z: velocity.angular,
            },
        }
    }
}

/// Encode a command as compact JSON
pub fn encode(topic: &str, velocity: &Velocity) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&TwistMessage::new(topic, velocity))?)
}

/// Build the sink selected by the output configuration
///
/// # Errors
///
/// Returns error if the UDP socket cannot be created.
pub async fn build_sink(config: &OutputConfig) -> Result<Box<dyn VelocitySink>> {
    match config.sink {
        SinkKind::Stdout => Ok(Box::new(JsonLinesSink::stdout(&config.topic))),
        SinkKind::Udp => {
            let sink = UdpSink::connect(&config.topic, &config.udp_address).await?;
            Ok(Box::new(sink))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_twist_axis_layout() {
        let velocity = Velocity::new(0.5, -1.0, 0.25);
        let message = TwistMessage::new("cmd_vel", &velocity);

        assert_eq!(message.linear, Vector3 { x: 0.5, y: 0.25, z: 0.0 });
        assert_eq!(message.angular, Vector3 { x: 0.0, y: 0.0, z: -1.0 });
    }

    #[test]
    fn test_json_encoding() {
        let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let message = TwistMessage::with_stamp("robot/cmd_vel", &Velocity::new(0.5, 1.0, 0.0), stamp);
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["topic"], "robot/cmd_vel");
        assert_eq!(json["stamp"], "2024-01-01T00:00:00Z");
        assert_eq!(json["linear"]["x"], 0.5);
        assert_eq!(json["linear"]["y"], 0.0);
        assert_eq!(json["angular"]["z"], 1.0);
    }

    #[test]
    fn test_encode_is_single_line() {
        let bytes = encode("cmd_vel", &Velocity::STOP).unwrap();
        assert!(!bytes.contains(&b'\n'));
    }

    #[tokio::test]
    async fn test_build_stdout_sink() {
        let config = OutputConfig::default();
        assert!(build_sink(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_build_udp_sink() {
        let config = OutputConfig {
            sink: SinkKind::Udp,
            udp_address: "127.0.0.1:9".to_string(),
            ..OutputConfig::default()
        };
        assert!(build_sink(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_boxed_sink_forwards() {
        let mut mock = MockVelocitySink::new();
        mock.expect_publish()
            .withf(|v| v.linear == 0.5)
            .times(1)
            .returning(|_| Ok(()));

        let mut sink: Box<dyn VelocitySink> = Box::new(mock);
        tokio_test::assert_ok!(sink.publish(&Velocity::new(0.5, 0.0, 0.0)).await);
    }
}
