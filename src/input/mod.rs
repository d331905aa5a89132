//! # Input Module
//!
//! Keyboard event capture.
//!
//! This module handles:
//! - Key identifiers split into character and special keys
//! - The [`KeySource`] abstraction over the capture mechanism
//! - Linux evdev keyboard capture (global, independent of window focus)
//!
//! Capture runs on its own OS thread because evdev reads block. Events reach
//! the async runtime through a bounded `mpsc` channel, one at a time and in
//! delivery order.

use std::thread;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::error::{Result, TeleopError};

pub mod keyboard;
pub mod keymap;

/// Buffered key events between the capture thread and the runtime.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Non-printable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Up,
    Down,
    Left,
    Right,
    /// Any other non-printable key, by raw key code.
    Other(u16),
}

/// Identifies a physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Printable key, lowercase.
    Char(char),
    Special(SpecialKey),
}

impl KeyCode {
    #[must_use]
    pub fn is_special(&self) -> bool {
        matches!(self, KeyCode::Special(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

/// A single press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub action: KeyAction,
}

impl KeyEvent {
    #[must_use]
    pub fn press(key: KeyCode) -> Self {
        Self {
            key,
            action: KeyAction::Press,
        }
    }

    #[must_use]
    pub fn release(key: KeyCode) -> Self {
        Self {
            key,
            action: KeyAction::Release,
        }
    }
}

/// Source of key events.
///
/// `run` blocks, forwarding every event to `events` in delivery order. It
/// returns `Ok(())` once the receiver is dropped and an error if capture
/// fails.
pub trait KeySource: Send + 'static {
    fn run(self, events: mpsc::Sender<KeyEvent>) -> Result<()>;
}

/// Starts `source` on a dedicated thread and returns the receiving end.
///
/// The thread is detached: a blocked read cannot hold up process exit.
///
/// # Errors
///
/// Returns `Io` if the thread cannot be spawned.
pub fn spawn_source<S: KeySource>(source: S) -> Result<mpsc::Receiver<KeyEvent>> {
    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

    thread::Builder::new()
        .name("key-source".to_string())
        .spawn(move || match source.run(tx) {
            Ok(()) => info!("Key source stopped"),
            Err(e) => error!("Key source failed: {}", e),
        })
        .map_err(TeleopError::Io)?;

    Ok(rx)
}

#[cfg(test)]
pub mod mocks {
    use super::*;

    /// Replays a fixed list of events, then returns.
    pub struct ScriptedKeys(pub Vec<KeyEvent>);

    impl KeySource for ScriptedKeys {
        fn run(self, events: mpsc::Sender<KeyEvent>) -> Result<()> {
            for event in self.0 {
                events
                    .blocking_send(event)
                    .map_err(|e| TeleopError::Input(format!("Receiver closed: {}", e)))?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::ScriptedKeys;
    use super::*;

    #[test]
    fn test_key_classification() {
        assert!(KeyCode::Special(SpecialKey::Up).is_special());
        assert!(KeyCode::Special(SpecialKey::Other(1)).is_special());
        assert!(!KeyCode::Char('w').is_special());
    }

    #[test]
    fn test_event_constructors() {
        let event = KeyEvent::press(KeyCode::Char('w'));
        assert_eq!(event.action, KeyAction::Press);
        let event = KeyEvent::release(KeyCode::Char('w'));
        assert_eq!(event.action, KeyAction::Release);
    }

    #[tokio::test]
    async fn test_spawn_source_delivers_in_order() {
        let script = vec![
            KeyEvent::press(KeyCode::Char('w')),
            KeyEvent::press(KeyCode::Special(SpecialKey::Left)),
            KeyEvent::release(KeyCode::Char('w')),
        ];
        let mut rx = spawn_source(ScriptedKeys(script.clone())).unwrap();

        let mut received = Vec::new();
        while let Some(event) = rx.recv().await {
            received.push(event);
        }
        assert_eq!(received, script);
    }
}
