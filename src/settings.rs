//! The settings value model: per-domain aggregates and the live record.
//!
//! Aggregates are total: every key declared in the registry resolves to a
//! value, with defaults filling anything not set explicitly. They are never
//! exposed partially constructed: construction starts from the default table
//! and load-time merging only overwrites individual entries.

use std::collections::BTreeMap;
use std::fmt;

use crate::defaults;
use crate::input::InputCode;
use crate::keys::{ButtonKey, ServerKey, ThumbstickKey};

/// A setting value, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    /// A physical input code (button and thumbstick bindings).
    Code(InputCode),
    /// A TCP port (server settings).
    Port(u16),
    /// A mouse sensitivity scalar.
    Sensitivity(f32),
}

impl SettingValue {
    /// Kind name used in mismatch diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Code(_) => "input code",
            Self::Port(_) => "port",
            Self::Sensitivity(_) => "sensitivity",
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Port(port) => write!(f, "{port}"),
            Self::Sensitivity(value) => write!(f, "{value}"),
        }
    }
}

/// Button bindings: one physical input per logical gamepad button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSettings {
    bindings: BTreeMap<ButtonKey, InputCode>,
}

impl ButtonSettings {
    /// The binding for a button. Total: unset buttons report their default.
    #[must_use]
    pub fn get(&self, key: ButtonKey) -> InputCode {
        self.bindings
            .get(&key)
            .copied()
            .unwrap_or_else(|| defaults::button_default(key))
    }

    /// Overwrites one binding. Validation happens in the store's setter path.
    pub fn set(&mut self, key: ButtonKey, code: InputCode) {
        self.bindings.insert(key, code);
    }

    /// Reverts one binding to its default.
    pub fn unset(&mut self, key: ButtonKey) {
        self.bindings.insert(key, defaults::button_default(key));
    }

    /// Iterates all bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ButtonKey, InputCode)> + '_ {
        ButtonKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

impl Default for ButtonSettings {
    fn default() -> Self {
        Self {
            bindings: ButtonKey::ALL
                .into_iter()
                .map(|key| (key, defaults::button_default(key)))
                .collect(),
        }
    }
}

/// Thumbstick bindings: stick clicks plus the four directional sub-bindings
/// per stick, forming one composite group per stick.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbstickSettings {
    bindings: BTreeMap<ThumbstickKey, InputCode>,
}

impl ThumbstickSettings {
    /// The binding for a thumbstick key. Total: unset keys report their default.
    #[must_use]
    pub fn get(&self, key: ThumbstickKey) -> InputCode {
        self.bindings
            .get(&key)
            .copied()
            .unwrap_or_else(|| defaults::thumbstick_default(key))
    }

    /// Overwrites one binding. Validation happens in the store's setter path.
    pub fn set(&mut self, key: ThumbstickKey, code: InputCode) {
        self.bindings.insert(key, code);
    }

    /// Reverts one binding to its default.
    pub fn unset(&mut self, key: ThumbstickKey) {
        self.bindings.insert(key, defaults::thumbstick_default(key));
    }

    /// Iterates all bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ThumbstickKey, InputCode)> + '_ {
        ThumbstickKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

impl Default for ThumbstickSettings {
    fn default() -> Self {
        Self {
            bindings: ThumbstickKey::ALL
                .into_iter()
                .map(|key| (key, defaults::thumbstick_default(key)))
                .collect(),
        }
    }
}

/// Network server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    /// TCP port the event server listens on. Read by the networking
    /// subsystem at listener-bind time.
    pub port: u16,
}

impl ServerSettings {
    /// The value for a server key.
    #[must_use]
    pub const fn get(&self, key: ServerKey) -> u16 {
        match key {
            ServerKey::Port => self.port,
        }
    }

    /// Overwrites one value.
    pub fn set(&mut self, key: ServerKey, value: u16) {
        match key {
            ServerKey::Port => self.port = value,
        }
    }

    /// Reverts one value to its default.
    pub fn unset(&mut self, key: ServerKey) {
        self.set(key, defaults::server_default(key));
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: defaults::DEFAULT_PORT,
        }
    }
}

/// The complete live configuration record.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Button bindings.
    pub buttons: ButtonSettings,
    /// Thumbstick bindings.
    pub thumbsticks: ThumbstickSettings,
    /// Server settings.
    pub server: ServerSettings,
    /// Mouse sensitivity (cursor speed), domain-less scalar.
    pub mouse_sensitivity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            buttons: ButtonSettings::default(),
            thumbsticks: ThumbstickSettings::default(),
            server: ServerSettings::default(),
            mouse_sensitivity: defaults::DEFAULT_MOUSE_SENSITIVITY,
        }
    }
}
