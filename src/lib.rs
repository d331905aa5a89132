//! # Keyboard Teleop Library
//!
//! Drive a mobile robot from the keyboard in hold mode.
//!
//! This library provides the core functionality for turning key presses and
//! releases into velocity commands (linear, angular, lateral) and publishing
//! them while keys are held.

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod teleop;
