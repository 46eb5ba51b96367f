//! Canonical default values for every registered setting key.
//!
//! The default table is static data versioned alongside the key registry.
//! Every function here matches exhaustively over its key enum, so adding a
//! key to [`crate::keys`] without adding its default fails to compile.
//! An incomplete default table is a schema-authoring bug, not a runtime
//! state.

use crate::input::{codes, InputCode};
use crate::keys::{ButtonKey, ServerKey, SettingKey, ThumbstickKey};
use crate::settings::SettingValue;

/// Default TCP port for the gamepad event server.
pub const DEFAULT_PORT: u16 = 7878;

/// Default mouse sensitivity (cursor speed).
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 1000.0;

/// Default physical input for a button binding.
#[must_use]
pub const fn button_default(key: ButtonKey) -> InputCode {
    match key {
        ButtonKey::A => codes::ENTER,
        ButtonKey::B => codes::KEY_B,
        ButtonKey::X => codes::SHIFT,
        ButtonKey::Y => codes::CTRL,
        ButtonKey::Rshdr => codes::PAGE_DOWN,
        ButtonKey::Lshdr => codes::LMBUTTON,
        ButtonKey::DpadDown => codes::DOWN,
        ButtonKey::DpadUp => codes::UP,
        ButtonKey::DpadRight => codes::RIGHT,
        ButtonKey::DpadLeft => codes::LEFT,
        ButtonKey::View => codes::TAB,
        ButtonKey::Menu => codes::ALT,
    }
}

/// Default physical input for a thumbstick binding.
///
/// The left stick drives WASD, the right stick the arrow keys; the stick
/// clicks mirror the shoulder defaults.
#[must_use]
pub const fn thumbstick_default(key: ThumbstickKey) -> InputCode {
    match key {
        ThumbstickKey::LeftThumbstick => codes::LMBUTTON,
        ThumbstickKey::LeftThumbstickUp => codes::KEY_W,
        ThumbstickKey::LeftThumbstickDown => codes::KEY_S,
        ThumbstickKey::LeftThumbstickLeft => codes::KEY_A,
        ThumbstickKey::LeftThumbstickRight => codes::KEY_D,
        ThumbstickKey::RightThumbstick => codes::PAGE_DOWN,
        ThumbstickKey::RightThumbstickUp => codes::UP,
        ThumbstickKey::RightThumbstickDown => codes::DOWN,
        ThumbstickKey::RightThumbstickLeft => codes::LEFT,
        ThumbstickKey::RightThumbstickRight => codes::RIGHT,
    }
}

/// Default value for a server setting.
#[must_use]
pub const fn server_default(key: ServerKey) -> u16 {
    match key {
        ServerKey::Port => DEFAULT_PORT,
    }
}

/// Default value for any registered key. Total over the registry.
#[must_use]
pub const fn default_for(key: SettingKey) -> SettingValue {
    match key {
        SettingKey::Button(key) => SettingValue::Code(button_default(key)),
        SettingKey::Thumbstick(key) => SettingValue::Code(thumbstick_default(key)),
        SettingKey::Server(key) => SettingValue::Port(server_default(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputCodeDb;
    use crate::keys::{all_keys, DOMAINS};
    use crate::validator::SettingsValidator;

    #[test]
    fn test_every_key_has_a_valid_default() {
        let db = InputCodeDb::load().unwrap();
        let validator = SettingsValidator::new(&db);

        for domain in DOMAINS {
            for key in all_keys(domain) {
                let value = default_for(key);
                assert!(
                    validator.validate_value(key, &value).is_ok(),
                    "default for {} failed validation",
                    key
                );
            }
        }
    }

    #[test]
    fn test_default_bindings_unique_within_aggregate() {
        let mut seen = std::collections::HashSet::new();
        for key in ButtonKey::ALL {
            assert!(
                seen.insert(button_default(key)),
                "duplicate default for {}",
                key
            );
        }
        seen.clear();
        for key in ThumbstickKey::ALL {
            assert!(
                seen.insert(thumbstick_default(key)),
                "duplicate default for {}",
                key
            );
        }
    }

    #[test]
    fn test_scalar_defaults_in_range() {
        assert!(DEFAULT_PORT >= 1);
        assert!(DEFAULT_MOUSE_SENSITIVITY > 0.0);
        assert!(DEFAULT_MOUSE_SENSITIVITY <= crate::constants::MAX_MOUSE_SENSITIVITY);
    }
}
