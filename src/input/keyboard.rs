//! # evdev Keyboard Module
//!
//! Keyboard detection, connection, and event reading using the Linux evdev
//! interface.
//!
//! ## Keyboard Detection
//!
//! A device qualifies as a teleop keyboard when it reports both the `W` key
//! and all four arrow keys. This skips mice, power buttons and game
//! controllers that also expose `EV_KEY`.
//!
//! Reading `/dev/input/event*` usually needs membership of the `input` group.

use evdev::{Device, InputEventKind, Key};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use super::keymap::{key_action, key_code};
use super::{KeyEvent, KeySource};
use crate::error::{Result, TeleopError};

/// Directory scanned during auto-detection
const INPUT_DIR: &str = "/dev/input";

/// Keys a device must report to be used for teleop
const REQUIRED_KEYS: [Key; 5] = [
    Key::KEY_W,
    Key::KEY_UP,
    Key::KEY_DOWN,
    Key::KEY_LEFT,
    Key::KEY_RIGHT,
];

/// Keyboard handle
///
/// Represents an open evdev keyboard. Capture is global: events are read
/// regardless of which window has focus.
pub struct EvdevKeyboard {
    device: Device,
    device_path: String,
}

impl std::fmt::Debug for EvdevKeyboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevKeyboard")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl EvdevKeyboard {
    /// Open the configured keyboard, or detect one when `device_path` is empty
    ///
    /// # Errors
    ///
    /// - `Input`: the configured device cannot be opened or is not a keyboard
    /// - `InputDeviceNotFound`: auto-detection found nothing usable
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use keyboard_teleop::input::keyboard::EvdevKeyboard;
    ///
    /// let keyboard = EvdevKeyboard::open("")?;
    /// println!("Reading keys from: {}", keyboard.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(device_path: &str) -> Result<Self> {
        if device_path.is_empty() {
            Self::detect()
        } else {
            Self::open_path(device_path)
        }
    }

    /// Open a specific `/dev/input/eventX` device
    pub fn open_path(path: &str) -> Result<Self> {
        let device = Device::open(path)
            .map_err(|e| TeleopError::Input(format!("Failed to open {}: {}", path, e)))?;

        if !is_keyboard(&device) {
            return Err(TeleopError::Input(format!(
                "{} does not report the W and arrow keys",
                path
            )));
        }

        info!("Using keyboard at {}", path);
        Ok(Self {
            device,
            device_path: path.to_string(),
        })
    }

    /// Scan `/dev/input` for the first keyboard
    ///
    /// Entries are visited in sorted order so the choice is deterministic
    /// when several keyboards are connected.
    pub fn detect() -> Result<Self> {
        Self::detect_in(Path::new(INPUT_DIR))
    }

    fn detect_in(input_dir: &Path) -> Result<Self> {
        if !input_dir.exists() {
            return Err(TeleopError::Input(format!(
                "{} directory not found",
                input_dir.display()
            )));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| {
                TeleopError::Input(format!("Failed to read {}: {}", input_dir.display(), e))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TeleopError::Input(format!("Failed to read directory entry: {}", e)))?;

        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();

            let is_event_node = path
                .file_name()
                .map(|name| name.to_string_lossy().starts_with("event"))
                .unwrap_or(false);
            if !is_event_node {
                continue;
            }

            match Device::open(&path) {
                Ok(device) => {
                    debug!(
                        "Found input device: {} ({})",
                        path.display(),
                        device.name().unwrap_or("unnamed")
                    );

                    if is_keyboard(&device) {
                        let device_path = path.to_string_lossy().to_string();
                        info!(
                            "Found keyboard '{}' at: {}",
                            device.name().unwrap_or("unnamed"),
                            device_path
                        );
                        return Ok(Self {
                            device,
                            device_path,
                        });
                    }
                }
                Err(e) => {
                    // Permission denied or other errors - skip device
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(TeleopError::InputDeviceNotFound)
    }

    /// Get the device path of this keyboard
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Human-readable device name reported by the kernel
    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }

    /// Read the next batch of key events. Blocks until one is available.
    fn fetch_key_events(&mut self) -> Result<Vec<KeyEvent>> {
        let events = self
            .device
            .fetch_events()
            .map_err(|e| TeleopError::Input(format!("Failed to fetch events: {}", e)))?;

        Ok(events
            .filter_map(|event| match event.kind() {
                InputEventKind::Key(key) => {
                    let action = key_action(event.value())?;
                    trace!("evdev key {:?} value {}", key, event.value());
                    Some(KeyEvent {
                        key: key_code(key),
                        action,
                    })
                }
                _ => None,
            })
            .collect())
    }
}

impl KeySource for EvdevKeyboard {
    fn run(mut self, events: mpsc::Sender<KeyEvent>) -> Result<()> {
        loop {
            for event in self.fetch_key_events()? {
                if events.blocking_send(event).is_err() {
                    debug!("Key event receiver dropped, stopping capture");
                    return Ok(());
                }
            }
        }
    }
}

fn is_keyboard(device: &Device) -> bool {
    device
        .supported_keys()
        .map(|keys| REQUIRED_KEYS.iter().all(|&key| keys.contains(key)))
        .unwrap_or(false)
}
