//! # Teleop Runner
//!
//! The publish loop: feeds key events through the controller and pushes the
//! resulting commands into a [`VelocitySink`].
//!
//! ## Control Flow
//!
//! 1. Publish an initial stop command
//! 2. Loop until shutdown:
//!    - Key event: update the controller, publish if it produced a command
//!    - Republish tick: publish the current command again, so the robot
//!      keeps moving while a key is held
//! 3. On shutdown or when the key source closes, publish a final stop
//!
//! Sink errors are logged and skipped; the next command supersedes a lost one.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::controller::TeleopController;
use crate::input::KeyEvent;
use crate::output::VelocitySink;

/// Number of published commands between status log messages
const LOG_INTERVAL_COMMANDS: u64 = 500;

/// Drives a [`TeleopController`] from a key event channel
pub struct Runner<S> {
    controller: TeleopController,
    sink: S,
    republish_period: Duration,
    published: u64,
    failed: u64,
}

impl<S: VelocitySink> Runner<S> {
    /// Creates a runner republishing at `publish_rate_hz` (at least 1 Hz)
    pub fn new(controller: TeleopController, sink: S, publish_rate_hz: u32) -> Self {
        let rate = u64::from(publish_rate_hz.max(1));
        Self {
            controller,
            sink,
            republish_period: Duration::from_micros(1_000_000 / rate),
            published: 0,
            failed: 0,
        }
    }

    pub fn controller(&self) -> &TeleopController {
        &self.controller
    }

    /// Number of commands successfully handed to the sink
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Runs until `shutdown` completes or the event channel closes
    ///
    /// Returns the number of commands published.
    pub async fn run<F>(&mut self, mut events: mpsc::Receiver<KeyEvent>, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut republish = interval(self.republish_period);
        republish.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; the initial stop below covers it.
        republish.tick().await;

        info!(
            "Publishing commands, republishing every {}ms",
            self.republish_period.as_millis()
        );
        self.publish().await;

        loop {
            tokio::select! {
                maybe_event = events.recv() => match maybe_event {
                    Some(event) => {
                        if self.controller.handle(&event).is_some() {
                            self.publish().await;
                        } else {
                            debug!("No action for {:?}", event);
                        }
                    }
                    None => {
                        warn!("Key source closed, stopping");
                        break;
                    }
                },

                _ = republish.tick() => {
                    self.publish().await;
                }

                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping robot");
                    break;
                }
            }
        }

        self.controller.reset();
        self.publish().await;

        info!(
            "Published {} commands ({} failed)",
            self.published, self.failed
        );
        self.published
    }

    async fn publish(&mut self) {
        let velocity = self.controller.velocity();
        match self.sink.publish(&velocity).await {
            Ok(()) => {
                self.published += 1;
                if self.published % LOG_INTERVAL_COMMANDS == 0 {
                    info!("Published {} commands, current: {}", self.published, velocity);
                }
            }
            Err(e) => {
                self.failed += 1;
                warn!("Failed to publish command: {}", e);
            }
        }
    }
}
