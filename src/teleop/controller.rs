//! # Teleop Controller
//!
//! Turns key presses and releases into the velocity command to publish.
//!
//! ## Hold mode
//!
//! - Pressing a bound key sets the axes of its binding to full speed.
//! - Releasing a bound key zeros those axes only.
//! - Pressing any other key stops the robot.
//! - Releasing any other key does nothing.
//!
//! ## Usage
//!
//! ```
//! use keyboard_teleop::input::KeyCode;
//! use keyboard_teleop::teleop::controller::TeleopController;
//!
//! let mut controller = TeleopController::new(0.5, 1.0);
//!
//! let velocity = controller.on_key_press(KeyCode::Char('w'));
//! assert_eq!(velocity.linear, 0.5);
//!
//! let velocity = controller.on_key_release(KeyCode::Char('w')).unwrap();
//! assert_eq!(velocity.linear, 0.0);
//! ```

use tracing::debug;

use super::bindings::BindingTable;
use super::velocity::Velocity;
use crate::input::{KeyAction, KeyCode, KeyEvent};

/// Maintains the commanded velocity as a function of the held keys.
///
/// # Thread Safety
///
/// Not synchronised. Feed events from a single task so they are handled in
/// delivery order.
#[derive(Debug, Clone)]
pub struct TeleopController {
    bindings: BindingTable,
    velocity: Velocity,
    max_linear: f64,
    max_angular: f64,
}

impl TeleopController {
    /// Creates a controller at rest with bindings scaled to the speed limits.
    #[must_use]
    pub fn new(max_linear: f64, max_angular: f64) -> Self {
        Self {
            bindings: BindingTable::new(max_linear, max_angular),
            velocity: Velocity::default(),
            max_linear,
            max_angular,
        }
    }

    /// Current commanded velocity.
    #[must_use]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Dispatches an event to the press or release handler.
    ///
    /// Returns the velocity to emit, or `None` when the event produced no
    /// action.
    pub fn handle(&mut self, event: &KeyEvent) -> Option<Velocity> {
        match event.action {
            KeyAction::Press => Some(self.on_key_press(event.key)),
            KeyAction::Release => self.on_key_release(event.key),
        }
    }

    /// Applies a key press and returns the velocity to emit.
    ///
    /// Unbound keys stop every axis.
    pub fn on_key_press(&mut self, key: KeyCode) -> Velocity {
        match self.bindings.lookup(&key) {
            Some(binding) => binding.apply(&mut self.velocity),
            None => {
                debug!("Unbound key {:?} pressed, stopping", key);
                self.velocity = Velocity::STOP;
            }
        }
        debug!("Pressed {:?}: {}", key, self.velocity);
        self.velocity
    }

    /// Applies a key release.
    ///
    /// Returns `None` for keys with no binding.
    pub fn on_key_release(&mut self, key: KeyCode) -> Option<Velocity> {
        let binding = self.bindings.lookup(&key)?;
        binding.release(&mut self.velocity);
        debug!("Released {:?}: {}", key, self.velocity);
        Some(self.velocity)
    }

    /// Stops every axis.
    pub fn reset(&mut self) {
        self.velocity = Velocity::STOP;
    }

    /// Startup banner listing the controls and configured speed limits.
    #[must_use]
    pub fn controls_help(&self) -> String {
        format!(
            "
This node takes keypresses from the keyboard and publishes them
as velocity commands. This is the holding mode: a keypress sets the
maximum configured speed, and releasing the key resets that axis.

WARNING: keys are captured even if your terminal is not in focus!

Controls:

WASD
    W/S -> +/- linear (X)
    A/D -> +/- lateral (Y)
    Q/E -> +/- angular (RZ)
or Arrows
    UP/DOWN -> +/- linear (X)
    LEFT/RIGHT -> +/- angular (RZ)
Any other key to stop
CTRL-C to quit

Configuration:

Max Linear Speed: +/-{} m/s
Max Angular Speed: +/-{} rad/s
",
            self.max_linear, self.max_angular
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SpecialKey;

    const MAX_LINEAR: f64 = 0.5;
    const MAX_ANGULAR: f64 = 1.0;

    fn controller() -> TeleopController {
        TeleopController::new(MAX_LINEAR, MAX_ANGULAR)
    }

    fn press(controller: &mut TeleopController, c: char) -> Velocity {
        controller.on_key_press(KeyCode::Char(c))
    }

    fn release(controller: &mut TeleopController, c: char) -> Option<Velocity> {
        controller.on_key_release(KeyCode::Char(c))
    }

    #[test]
    fn test_starts_stopped() {
        assert!(controller().velocity().is_stopped());
    }

    #[test]
    fn test_press_and_release_w() {
        let mut controller = controller();
        controller.velocity = Velocity::new(0.0, 0.0, 0.3);

        let velocity = press(&mut controller, 'w');
        assert_eq!(velocity.linear, MAX_LINEAR);
        assert_eq!(velocity.angular, 0.0);
        assert_eq!(velocity.lateral, 0.3, "lateral untouched by w");

        let velocity = release(&mut controller, 'w').unwrap();
        assert_eq!(velocity, Velocity::new(0.0, 0.0, 0.3));
    }

    #[test]
    fn test_later_lateral_press_overrides() {
        let mut controller = controller();
        press(&mut controller, 'd');
        let velocity = press(&mut controller, 'a');
        assert_eq!(velocity.lateral, MAX_LINEAR);

        // 'd' is still physically held, but releasing 'a' zeros lateral.
        let velocity = release(&mut controller, 'a').unwrap();
        assert_eq!(velocity.lateral, 0.0);
    }

    #[test]
    fn test_unbound_press_stops() {
        let mut controller = controller();
        press(&mut controller, 'w');
        press(&mut controller, 'q');
        press(&mut controller, 'a');

        let velocity = press(&mut controller, 'z');
        assert_eq!(velocity.linear, 0.0);
        assert_eq!(velocity.angular, 0.0);
        assert!(velocity.is_stopped());
    }

    #[test]
    fn test_unbound_special_press_stops() {
        let mut controller = controller();
        controller.on_key_press(KeyCode::Special(SpecialKey::Up));
        let velocity = controller.on_key_press(KeyCode::Special(SpecialKey::Other(29)));
        assert!(velocity.is_stopped());
    }

    #[test]
    fn test_arrow_up_press_and_release() {
        let mut controller = controller();
        press(&mut controller, 'q');

        let velocity = controller.on_key_press(KeyCode::Special(SpecialKey::Up));
        assert_eq!(velocity.linear, MAX_LINEAR);
        assert_eq!(velocity.angular, MAX_ANGULAR, "angular untouched by up");

        let velocity = controller
            .on_key_release(KeyCode::Special(SpecialKey::Up))
            .unwrap();
        assert_eq!(velocity.linear, 0.0);
        assert_eq!(velocity.angular, MAX_ANGULAR);
    }

    #[test]
    fn test_arrow_left_right_drive_angular() {
        let mut controller = controller();
        let velocity = controller.on_key_press(KeyCode::Special(SpecialKey::Left));
        assert_eq!(velocity.angular, MAX_ANGULAR);
        let velocity = controller.on_key_press(KeyCode::Special(SpecialKey::Right));
        assert_eq!(velocity.angular, -MAX_ANGULAR);
        let velocity = controller
            .on_key_release(KeyCode::Special(SpecialKey::Right))
            .unwrap();
        assert_eq!(velocity.angular, 0.0);
    }

    #[test]
    fn test_rotation_override_sequence() {
        let mut controller = controller();
        assert_eq!(press(&mut controller, 'q').angular, MAX_ANGULAR);
        assert_eq!(press(&mut controller, 'e').angular, -MAX_ANGULAR);
        assert_eq!(release(&mut controller, 'e').unwrap().angular, 0.0);
        assert_eq!(release(&mut controller, 'q').unwrap().angular, 0.0);
        assert_eq!(controller.velocity().angular, 0.0);
    }

    #[test]
    fn test_unbound_release_is_noop() {
        let mut controller = controller();
        press(&mut controller, 'w');
        assert_eq!(release(&mut controller, 'z'), None);
        assert_eq!(
            controller.on_key_release(KeyCode::Special(SpecialKey::Other(1))),
            None
        );
        assert_eq!(controller.velocity().linear, MAX_LINEAR);
    }

    #[test]
    fn test_release_without_press_keeps_zero() {
        let mut controller = controller();
        let velocity = release(&mut controller, 's').unwrap();
        assert!(velocity.is_stopped());
    }

    #[test]
    fn test_axes_are_independent() {
        let mut controller = controller();
        press(&mut controller, 'w');
        press(&mut controller, 'a');
        let velocity = press(&mut controller, 'e');
        assert_eq!(velocity, Velocity::new(MAX_LINEAR, -MAX_ANGULAR, MAX_LINEAR));

        let velocity = release(&mut controller, 'a').unwrap();
        assert_eq!(velocity, Velocity::new(MAX_LINEAR, -MAX_ANGULAR, 0.0));
    }

    #[test]
    fn test_handle_dispatches_by_action() {
        let mut controller = controller();
        let pressed = controller.handle(&KeyEvent::press(KeyCode::Char('s')));
        assert_eq!(pressed.map(|v| v.linear), Some(-MAX_LINEAR));

        let released = controller.handle(&KeyEvent::release(KeyCode::Char('s')));
        assert_eq!(released.map(|v| v.linear), Some(0.0));

        assert_eq!(controller.handle(&KeyEvent::release(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_reset() {
        let mut controller = controller();
        press(&mut controller, 'w');
        press(&mut controller, 'q');
        controller.reset();
        assert!(controller.velocity().is_stopped());
    }

    #[test]
    fn test_controls_help_mentions_limits() {
        let help = TeleopController::new(0.8, 1.5).controls_help();
        assert!(help.contains("+/-0.8 m/s"));
        assert!(help.contains("+/-1.5 rad/s"));
        assert!(help.contains("Any other key to stop"));
    }
}
