//! # Key Bindings
//!
//! Static tables from key identifiers to partial velocity updates.
//!
//! ## Character keys
//!
//! | Key | Linear | Angular | Lateral |
//! |-----|--------|---------|---------|
//! | W | +max_linear | · | · |
//! | S | -max_linear | · | · |
//! | A | · | · | +max_linear |
//! | D | · | · | -max_linear |
//! | Q | · | +max_angular | · |
//! | E | · | -max_angular | · |
//!
//! ## Special keys
//!
//! | Key | Linear | Angular | Lateral |
//! |-----|--------|---------|---------|
//! | Up | +max_linear | · | · |
//! | Down | -max_linear | · | · |
//! | Left | · | +max_angular | · |
//! | Right | · | -max_angular | · |
//!
//! `·` means the axis is left untouched.

use std::collections::HashMap;

use super::velocity::{Axis, Velocity};
use crate::input::{KeyCode, SpecialKey};

/// Partial velocity update: `None` leaves the axis unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Binding {
    pub linear: Option<f64>,
    pub angular: Option<f64>,
    pub lateral: Option<f64>,
}

impl Binding {
    #[must_use]
    pub fn linear(value: f64) -> Self {
        Self {
            linear: Some(value),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn angular(value: f64) -> Self {
        Self {
            angular: Some(value),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn lateral(value: f64) -> Self {
        Self {
            lateral: Some(value),
            ..Self::default()
        }
    }

    /// Axes this binding sets, paired with their magnitude.
    pub fn axes(&self) -> impl Iterator<Item = (Axis, f64)> {
        [
            (Axis::Linear, self.linear),
            (Axis::Angular, self.angular),
            (Axis::Lateral, self.lateral),
        ]
        .into_iter()
        .filter_map(|(axis, value)| value.map(|v| (axis, v)))
    }

    /// Writes every defined axis into `velocity`.
    pub fn apply(&self, velocity: &mut Velocity) {
        for (axis, value) in self.axes() {
            velocity.set(axis, value);
        }
    }

    /// Zeros every axis this binding would set.
    pub fn release(&self, velocity: &mut Velocity) {
        for (axis, _) in self.axes() {
            velocity.set(axis, 0.0);
        }
    }
}

/// The two disjoint binding sets, built once from the speed limits.
///
/// # Examples
///
/// ```
/// use keyboard_teleop::input::{KeyCode, SpecialKey};
/// use keyboard_teleop::teleop::bindings::BindingTable;
///
/// let table = BindingTable::new(0.5, 1.0);
/// let up = table.lookup(&KeyCode::Special(SpecialKey::Up)).unwrap();
/// assert_eq!(up.linear, Some(0.5));
/// assert!(table.lookup(&KeyCode::Char('z')).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct BindingTable {
    chars: HashMap<char, Binding>,
    special: HashMap<SpecialKey, Binding>,
}

impl BindingTable {
    #[must_use]
    pub fn new(max_linear: f64, max_angular: f64) -> Self {
        let chars = HashMap::from([
            ('w', Binding::linear(max_linear)),
            ('s', Binding::linear(-max_linear)),
            ('a', Binding::lateral(max_linear)),
            ('d', Binding::lateral(-max_linear)),
            ('q', Binding::angular(max_angular)),
            ('e', Binding::angular(-max_angular)),
        ]);

        let special = HashMap::from([
            (SpecialKey::Up, Binding::linear(max_linear)),
            (SpecialKey::Down, Binding::linear(-max_linear)),
            (SpecialKey::Left, Binding::angular(max_angular)),
            (SpecialKey::Right, Binding::angular(-max_angular)),
        ]);

        Self { chars, special }
    }

    /// Looks `key` up in the table matching its class.
    #[must_use]
    pub fn lookup(&self, key: &KeyCode) -> Option<&Binding> {
        match key {
            KeyCode::Char(c) => self.chars.get(c),
            KeyCode::Special(special) => self.special.get(special),
        }
    }
}
