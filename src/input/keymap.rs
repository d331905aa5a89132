//! # evdev Key Mapping
//!
//! Translates Linux evdev key codes into [`KeyCode`]s and event values into
//! [`KeyAction`]s.
//!
//! Keys that produce a printable character on a US layout become
//! [`KeyCode::Char`] (lowercase, since bindings ignore shift). The arrow keys
//! get their own [`SpecialKey`] variants and every other key is
//! [`SpecialKey::Other`].

use evdev::Key;

use super::{KeyAction, KeyCode, SpecialKey};

/// evdev value for a key release.
pub const KEY_VALUE_RELEASE: i32 = 0;
/// evdev value for a key press.
pub const KEY_VALUE_PRESS: i32 = 1;
/// evdev value for an autorepeat while the key is held.
pub const KEY_VALUE_REPEAT: i32 = 2;

/// Maps an evdev key to a key identifier.
///
/// # Examples
///
/// ```
/// use evdev::Key;
/// use keyboard_teleop::input::{KeyCode, SpecialKey};
/// use keyboard_teleop::input::keymap::key_code;
///
/// assert_eq!(key_code(Key::KEY_W), KeyCode::Char('w'));
/// assert_eq!(key_code(Key::KEY_UP), KeyCode::Special(SpecialKey::Up));
/// ```
#[must_use]
pub fn key_code(key: Key) -> KeyCode {
    match printable(key) {
        Some(c) => KeyCode::Char(c),
        None => KeyCode::Special(special(key)),
    }
}

/// Maps an evdev key event value to an action.
///
/// Autorepeat counts as a press, the same way OS-level key hooks report it.
/// Returns `None` for values the kernel does not define.
#[must_use]
pub fn key_action(value: i32) -> Option<KeyAction> {
    match value {
        KEY_VALUE_RELEASE => Some(KeyAction::Release),
        KEY_VALUE_PRESS | KEY_VALUE_REPEAT => Some(KeyAction::Press),
        _ => None,
    }
}

fn special(key: Key) -> SpecialKey {
    match key {
        Key::KEY_UP => SpecialKey::Up,
        Key::KEY_DOWN => SpecialKey::Down,
        Key::KEY_LEFT => SpecialKey::Left,
        Key::KEY_RIGHT => SpecialKey::Right,
        other => SpecialKey::Other(other.code()),
    }
}

fn printable(key: Key) -> Option<char> {
    let c = match key {
        // Letters
        Key::KEY_A => 'a',
        Key::KEY_B => 'b',
        Key::KEY_C => 'c',
        Key::KEY_D => 'd',
        Key::KEY_E => 'e',
        Key::KEY_F => 'f',
        Key::KEY_G => 'g',
        Key::KEY_H => 'h',
        Key::KEY_I => 'i',
        Key::KEY_J => 'j',
        Key::KEY_K => 'k',
        Key::KEY_L => 'l',
        Key::KEY_M => 'm',
        Key::KEY_N => 'n',
        Key::KEY_O => 'o',
        Key::KEY_P => 'p',
        Key::KEY_Q => 'q',
        Key::KEY_R => 'r',
        Key::KEY_S => 's',
        Key::KEY_T => 't',
        Key::KEY_U => 'u',
        Key::KEY_V => 'v',
        Key::KEY_W => 'w',
        Key::KEY_X => 'x',
        Key::KEY_Y => 'y',
        Key::KEY_Z => 'z',

        // Number row
        Key::KEY_1 => '1',
        Key::KEY_2 => '2',
        Key::KEY_3 => '3',
        Key::KEY_4 => '4',
        Key::KEY_5 => '5',
        Key::KEY_6 => '6',
        Key::KEY_7 => '7',
        Key::KEY_8 => '8',
        Key::KEY_9 => '9',
        Key::KEY_0 => '0',

        // Punctuation
        Key::KEY_MINUS => '-',
        Key::KEY_EQUAL => '=',
        Key::KEY_LEFTBRACE => '[',
        Key::KEY_RIGHTBRACE => ']',
        Key::KEY_SEMICOLON => ';',
        Key::KEY_APOSTROPHE => '\'',
        Key::KEY_GRAVE => '`',
        Key::KEY_BACKSLASH => '\\',
        Key::KEY_COMMA => ',',
        Key::KEY_DOT => '.',
        Key::KEY_SLASH => '/',

        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driving_letters() {
        for (key, c) in [
            (Key::KEY_W, 'w'),
            (Key::KEY_A, 'a'),
            (Key::KEY_S, 's'),
            (Key::KEY_D, 'd'),
            (Key::KEY_Q, 'q'),
            (Key::KEY_E, 'e'),
        ] {
            assert_eq!(key_code(key), KeyCode::Char(c));
        }
    }

    #[test]
    fn test_arrows_are_special() {
        assert_eq!(key_code(Key::KEY_UP), KeyCode::Special(SpecialKey::Up));
        assert_eq!(key_code(Key::KEY_DOWN), KeyCode::Special(SpecialKey::Down));
        assert_eq!(key_code(Key::KEY_LEFT), KeyCode::Special(SpecialKey::Left));
        assert_eq!(key_code(Key::KEY_RIGHT), KeyCode::Special(SpecialKey::Right));
    }

    #[test]
    fn test_modifiers_are_other() {
        assert_eq!(
            key_code(Key::KEY_LEFTCTRL),
            KeyCode::Special(SpecialKey::Other(Key::KEY_LEFTCTRL.code()))
        );
        assert!(key_code(Key::KEY_SPACE).is_special());
        assert!(key_code(Key::KEY_ESC).is_special());
    }

    #[test]
    fn test_digits_and_punctuation_are_chars() {
        assert_eq!(key_code(Key::KEY_0), KeyCode::Char('0'));
        assert_eq!(key_code(Key::KEY_9), KeyCode::Char('9'));
        assert_eq!(key_code(Key::KEY_COMMA), KeyCode::Char(','));
    }

    #[test]
    fn test_key_action_values() {
        assert_eq!(key_action(KEY_VALUE_RELEASE), Some(KeyAction::Release));
        assert_eq!(key_action(KEY_VALUE_PRESS), Some(KeyAction::Press));
        assert_eq!(key_action(KEY_VALUE_REPEAT), Some(KeyAction::Press));
        assert_eq!(key_action(7), None);
    }
}
