//! The setting key registry.
//!
//! Every configurable value is identified by a [`SettingKey`]: a symbolic
//! name scoped to one of three domains (buttons, thumbsticks, server). The
//! key sets are closed: adding a key is a schema change, done here and in
//! [`crate::defaults`], never at runtime. Exhaustive matches keep the two in
//! lockstep: a key added without a default fails to compile.

use std::fmt;

use crate::error::SettingsError;

/// The domain a setting key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Logical gamepad buttons.
    Button,
    /// Thumbstick axes and their directional sub-bindings.
    Thumbstick,
    /// Network server settings.
    Server,
}

impl Domain {
    /// Name of the persisted table this domain maps to.
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Button => "button_settings",
            Self::Thumbstick => "thumbstick_settings",
            Self::Server => "server_settings",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button => write!(f, "button"),
            Self::Thumbstick => write!(f, "thumbstick"),
            Self::Server => write!(f, "server"),
        }
    }
}

/// Logical gamepad buttons that can be bound to a physical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ButtonKey {
    /// Face button A.
    A,
    /// Face button B.
    B,
    /// Face button X.
    X,
    /// Face button Y.
    Y,
    /// Right shoulder.
    Rshdr,
    /// Left shoulder.
    Lshdr,
    /// D-pad down.
    DpadDown,
    /// D-pad up.
    DpadUp,
    /// D-pad right.
    DpadRight,
    /// D-pad left.
    DpadLeft,
    /// View (back/select) button.
    View,
    /// Menu (start) button.
    Menu,
}

impl ButtonKey {
    /// All button keys, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::Rshdr,
        Self::Lshdr,
        Self::DpadDown,
        Self::DpadUp,
        Self::DpadRight,
        Self::DpadLeft,
        Self::View,
        Self::Menu,
    ];

    /// The symbolic name used in the persisted file and the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::X => "X",
            Self::Y => "Y",
            Self::Rshdr => "RSHDR",
            Self::Lshdr => "LSHDR",
            Self::DpadDown => "DPADDOWN",
            Self::DpadUp => "DPADUP",
            Self::DpadRight => "DPADRIGHT",
            Self::DpadLeft => "DPADLEFT",
            Self::View => "VIEW",
            Self::Menu => "MENU",
        }
    }

    /// Resolves a symbolic name back to its key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

impl fmt::Display for ButtonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Thumbstick bindings: the stick clicks plus one sub-binding per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThumbstickKey {
    /// Left stick click.
    LeftThumbstick,
    /// Left stick pushed up.
    LeftThumbstickUp,
    /// Left stick pushed down.
    LeftThumbstickDown,
    /// Left stick pushed left.
    LeftThumbstickLeft,
    /// Left stick pushed right.
    LeftThumbstickRight,
    /// Right stick click.
    RightThumbstick,
    /// Right stick pushed up.
    RightThumbstickUp,
    /// Right stick pushed down.
    RightThumbstickDown,
    /// Right stick pushed left.
    RightThumbstickLeft,
    /// Right stick pushed right.
    RightThumbstickRight,
}

impl ThumbstickKey {
    /// All thumbstick keys, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::LeftThumbstick,
        Self::LeftThumbstickUp,
        Self::LeftThumbstickDown,
        Self::LeftThumbstickLeft,
        Self::LeftThumbstickRight,
        Self::RightThumbstick,
        Self::RightThumbstickUp,
        Self::RightThumbstickDown,
        Self::RightThumbstickLeft,
        Self::RightThumbstickRight,
    ];

    /// The symbolic name used in the persisted file and the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftThumbstick => "LeftThumbstick",
            Self::LeftThumbstickUp => "LeftThumbstickUpKey",
            Self::LeftThumbstickDown => "LeftThumbstickDownKey",
            Self::LeftThumbstickLeft => "LeftThumbstickLeftKey",
            Self::LeftThumbstickRight => "LeftThumbstickRightKey",
            Self::RightThumbstick => "RightThumbstick",
            Self::RightThumbstickUp => "RightThumbstickUpKey",
            Self::RightThumbstickDown => "RightThumbstickDownKey",
            Self::RightThumbstickLeft => "RightThumbstickLeftKey",
            Self::RightThumbstickRight => "RightThumbstickRightKey",
        }
    }

    /// Resolves a symbolic name back to its key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

impl fmt::Display for ThumbstickKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Network server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServerKey {
    /// TCP port the event server listens on.
    Port,
}

impl ServerKey {
    /// All server keys, in declaration order.
    pub const ALL: [Self; 1] = [Self::Port];

    /// The symbolic name used in the persisted file and the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Port => "Port",
        }
    }

    /// Resolves a symbolic name back to its key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

impl fmt::Display for ServerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A setting identifier: a domain tag plus the symbolic key within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// A button binding.
    Button(ButtonKey),
    /// A thumbstick binding.
    Thumbstick(ThumbstickKey),
    /// A server setting.
    Server(ServerKey),
}

impl SettingKey {
    /// The domain this key belongs to.
    #[must_use]
    pub const fn domain(self) -> Domain {
        match self {
            Self::Button(_) => Domain::Button,
            Self::Thumbstick(_) => Domain::Thumbstick,
            Self::Server(_) => Domain::Server,
        }
    }

    /// The bare symbolic name within the key's domain.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Button(key) => key.name(),
            Self::Thumbstick(key) => key.name(),
            Self::Server(key) => key.name(),
        }
    }
}

impl fmt::Display for SettingKey {
    /// Formats as the qualified `table.Key` name used in diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain().table_name(), self.name())
    }
}

/// Looks up a symbolic name within a domain.
///
/// # Errors
///
/// Returns [`SettingsError::NotFound`] if the name is not declared in the
/// domain. This is a caller-local error, never fatal.
pub fn lookup(domain: Domain, name: &str) -> Result<SettingKey, SettingsError> {
    let found = match domain {
        Domain::Button => ButtonKey::from_name(name).map(SettingKey::Button),
        Domain::Thumbstick => ThumbstickKey::from_name(name).map(SettingKey::Thumbstick),
        Domain::Server => ServerKey::from_name(name).map(SettingKey::Server),
    };

    found.ok_or_else(|| SettingsError::NotFound {
        domain,
        name: name.to_string(),
    })
}

/// Returns every key declared in a domain, in declaration order.
#[must_use]
pub fn all_keys(domain: Domain) -> Vec<SettingKey> {
    match domain {
        Domain::Button => ButtonKey::ALL.into_iter().map(SettingKey::Button).collect(),
        Domain::Thumbstick => ThumbstickKey::ALL
            .into_iter()
            .map(SettingKey::Thumbstick)
            .collect(),
        Domain::Server => ServerKey::ALL.into_iter().map(SettingKey::Server).collect(),
    }
}

/// All domains, in declaration order.
pub const DOMAINS: [Domain; 3] = [Domain::Button, Domain::Thumbstick, Domain::Server];
