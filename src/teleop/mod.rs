//! # Teleop Module
//!
//! Hold-mode keyboard teleoperation.
//!
//! This module handles:
//! - The three-axis velocity command
//! - Key binding tables built from the speed limits
//! - Press/release handling in [`controller::TeleopController`]
//! - The publish loop in [`runner::Runner`]

pub mod bindings;
pub mod controller;
pub mod runner;
pub mod velocity;
