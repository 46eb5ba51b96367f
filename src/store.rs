//! The live setting value store.
//!
//! Exactly one [`SettingsStore`] is live per application process; the
//! input-injection engine and the network server read from it while a
//! settings editor may be writing. Writes are serialized under a single
//! lock and publish a fresh [`Settings`] snapshot behind an [`Arc`], so
//! readers always observe either the pre-write or the post-write state,
//! never a mixture. No operation here touches I/O except [`load`] and
//! [`save`].
//!
//! [`load`]: SettingsStore::load
//! [`save`]: SettingsStore::save_to

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::codec;
use crate::defaults;
use crate::error::{CodecError, SettingsError};
use crate::input::{InputCode, InputCodeDb};
use crate::keys::{ButtonKey, SettingKey, ThumbstickKey};
use crate::settings::{Settings, SettingValue};
use crate::validator::{validate_sensitivity, SettingsValidator, ValidationReport};

struct Inner {
    current: Arc<Settings>,
    dirty: bool,
}

/// The single source of truth for live configuration.
///
/// Constructed once at startup from the persisted file (or defaults) and
/// passed by reference to consumers; saved on shutdown or on demand. There
/// is no ambient singleton.
pub struct SettingsStore {
    codes: InputCodeDb,
    inner: RwLock<Inner>,
}

impl SettingsStore {
    /// Creates a store holding pure defaults.
    #[must_use]
    pub fn with_defaults(codes: InputCodeDb) -> Self {
        Self {
            codes,
            inner: RwLock::new(Inner {
                current: Arc::new(Settings::default()),
                dirty: false,
            }),
        }
    }

    /// Creates a store from the persisted file at `path`.
    ///
    /// A missing file yields defaults; invalid entries are repaired (see
    /// [`codec::apply`]) and reported in the returned report. A read or
    /// parse failure surfaces as [`CodecError`]; callers typically fall
    /// back to [`Self::with_defaults`] rather than aborting.
    pub fn load(codes: InputCodeDb, path: &Path) -> Result<(Self, ValidationReport), CodecError> {
        let raw = codec::load(path)?;
        let (settings, report) = codec::apply(&codes, &raw);

        let store = Self {
            codes,
            inner: RwLock::new(Inner {
                current: Arc::new(settings),
                dirty: false,
            }),
        };

        Ok((store, report))
    }

    /// Creates a store from the default settings file location, falling
    /// back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load_or_defaults(codes: InputCodeDb) -> (Self, ValidationReport) {
        let path = match codec::settings_file_path() {
            Ok(path) => path,
            Err(error) => {
                tracing::warn!("no settings file location: {error}, using defaults");
                return (Self::with_defaults(codes), ValidationReport::new());
            }
        };

        match Self::load(codes.clone(), &path) {
            Ok(loaded) => loaded,
            Err(error) => {
                tracing::warn!("failed to load settings: {error}, using defaults");
                (Self::with_defaults(codes), ValidationReport::new())
            }
        }
    }

    /// The input code database this store validates against.
    #[must_use]
    pub fn codes(&self) -> &InputCodeDb {
        &self.codes
    }

    /// Returns a consistent snapshot of the current settings.
    ///
    /// The snapshot is immutable and cheap to take; long-lived consumers
    /// (e.g. the input-processing cycle) take one per cycle instead of
    /// locking per key.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Settings> {
        Arc::clone(&self.read().current)
    }

    /// The value for any registered key. Total: unset keys report their
    /// default, so this never fails.
    #[must_use]
    pub fn get(&self, key: SettingKey) -> SettingValue {
        let snapshot = self.snapshot();
        match key {
            SettingKey::Button(key) => SettingValue::Code(snapshot.buttons.get(key)),
            SettingKey::Thumbstick(key) => SettingValue::Code(snapshot.thumbsticks.get(key)),
            SettingKey::Server(key) => SettingValue::Port(snapshot.server.get(key)),
        }
    }

    /// The binding for a button.
    #[must_use]
    pub fn button(&self, key: ButtonKey) -> InputCode {
        self.read().current.buttons.get(key)
    }

    /// The binding for a thumbstick key.
    #[must_use]
    pub fn thumbstick(&self, key: ThumbstickKey) -> InputCode {
        self.read().current.thumbsticks.get(key)
    }

    /// The configured server port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.read().current.server.port
    }

    /// The configured mouse sensitivity.
    #[must_use]
    pub fn mouse_sensitivity(&self) -> f32 {
        self.read().current.mouse_sensitivity
    }

    /// Sets one key to a new value, validating before mutating.
    ///
    /// The full aggregate is re-validated (uniqueness is a cross-key rule),
    /// and the store is only updated (and marked dirty) when validation
    /// passes. On rejection the store is left exactly as it was.
    pub fn set(&self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        let mut inner = self.write();
        let mut candidate = (*inner.current).clone();

        match (key, value) {
            (SettingKey::Button(key), SettingValue::Code(code)) => {
                candidate.buttons.set(key, code);
            }
            (SettingKey::Thumbstick(key), SettingValue::Code(code)) => {
                candidate.thumbsticks.set(key, code);
            }
            (SettingKey::Server(key), SettingValue::Port(port)) => {
                candidate.server.set(key, port);
            }
            (key, value) => {
                return Err(crate::error::ValidationError::WrongKind {
                    key: key.to_string(),
                    kind: value.kind_name(),
                }
                .into());
            }
        }

        Self::publish(&self.codes, &mut inner, candidate)
    }

    /// Sets the mouse sensitivity, validating the range first.
    pub fn set_mouse_sensitivity(&self, value: f32) -> Result<(), SettingsError> {
        validate_sensitivity(value)?;

        let mut inner = self.write();
        let mut candidate = (*inner.current).clone();
        candidate.mouse_sensitivity = value;
        inner.current = Arc::new(candidate);
        inner.dirty = true;
        Ok(())
    }

    /// Reverts one key to its default and marks the store dirty.
    ///
    /// Idempotent. Reverting can itself collide (another key may have been
    /// moved onto this key's default), in which case the revert is rejected
    /// like any other invalid write.
    pub fn unset(&self, key: SettingKey) -> Result<(), SettingsError> {
        let mut inner = self.write();
        let mut candidate = (*inner.current).clone();

        match key {
            SettingKey::Button(key) => candidate.buttons.unset(key),
            SettingKey::Thumbstick(key) => candidate.thumbsticks.unset(key),
            SettingKey::Server(key) => candidate.server.unset(key),
        }

        Self::publish(&self.codes, &mut inner, candidate)
    }

    /// Reverts the mouse sensitivity to its default.
    pub fn unset_mouse_sensitivity(&self) {
        let mut inner = self.write();
        let mut candidate = (*inner.current).clone();
        candidate.mouse_sensitivity = defaults::DEFAULT_MOUSE_SENSITIVITY;
        inner.current = Arc::new(candidate);
        inner.dirty = true;
    }

    /// Resets every setting to its default and marks the store dirty.
    pub fn reset(&self) {
        let mut inner = self.write();
        inner.current = Arc::new(Settings::default());
        inner.dirty = true;
    }

    /// Returns true when the store has unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.read().dirty
    }

    /// Saves the current settings to `path` atomically.
    ///
    /// On success the dirty flag is cleared, unless another write landed
    /// while the file was being written; those changes stay pending. On
    /// failure the in-memory store remains authoritative and the error is
    /// surfaced for retry.
    pub fn save_to(&self, path: &Path) -> Result<(), CodecError> {
        let saved = self.snapshot();
        codec::save(&saved, path)?;

        let mut inner = self.write();
        if Arc::ptr_eq(&inner.current, &saved) {
            inner.dirty = false;
        }
        Ok(())
    }

    /// Saves the current settings to the default settings file location.
    pub fn save(&self) -> Result<(), CodecError> {
        self.save_to(&codec::settings_file_path()?)
    }

    /// Validates the candidate and swaps it in if clean.
    fn publish(
        codes: &InputCodeDb,
        inner: &mut Inner,
        candidate: Settings,
    ) -> Result<(), SettingsError> {
        let report = SettingsValidator::new(codes).validate(&candidate);
        if let Some(error) = report.errors.into_iter().next() {
            return Err(error.into());
        }

        inner.current = Arc::new(candidate);
        inner.dirty = true;
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        // A poisoned lock cannot expose partial state: settings swap in as
        // complete records.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::codes;

    fn store() -> SettingsStore {
        SettingsStore::with_defaults(InputCodeDb::load().unwrap())
    }

    #[test]
    fn test_get_returns_defaults_when_unset() {
        let store = store();
        assert_eq!(store.button(ButtonKey::A), codes::ENTER);
        assert_eq!(store.port(), 7878);
        assert!((store.mouse_sensitivity() - 1000.0).abs() < f32::EPSILON);
        assert!(!store.is_dirty());

        // The generic accessor agrees with the typed ones
        assert_eq!(
            store.get(SettingKey::Button(ButtonKey::A)),
            SettingValue::Code(codes::ENTER)
        );
        assert_eq!(
            store.get(SettingKey::Server(ServerKey::Port)),
            SettingValue::Port(7878)
        );
    }

    #[test]
    fn test_set_marks_dirty_and_is_read_back() {
        let store = store();
        store
            .set(
                SettingKey::Server(ServerKey::Port),
                SettingValue::Port(9090),
            )
            .unwrap();

        assert_eq!(store.port(), 9090);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_rejected_set_leaves_store_unchanged() {
        let store = store();
        let before = store.snapshot();

        // B claims A's default code
        let err = store
            .set(
                SettingKey::Button(ButtonKey::B),
                SettingValue::Code(codes::ENTER),
            )
            .unwrap_err();
        assert!(matches!(err, SettingsError::Validation(_)));

        assert_eq!(*store.snapshot(), *before);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_set_after_freeing_code_succeeds() {
        let store = store();

        // Move A off ENTER, then B may take it
        store
            .set(
                SettingKey::Button(ButtonKey::A),
                SettingValue::Code(codes::KEY_W),
            )
            .unwrap();
        store
            .set(
                SettingKey::Button(ButtonKey::B),
                SettingValue::Code(codes::ENTER),
            )
            .unwrap();

        assert_eq!(store.button(ButtonKey::B), codes::ENTER);
    }

    #[test]
    fn test_unset_is_idempotent() {
        let store = store();
        let key = SettingKey::Thumbstick(ThumbstickKey::LeftThumbstickUp);

        store.set(key, SettingValue::Code(codes::ENTER)).unwrap();
        store.unset(key).unwrap();
        assert_eq!(store.thumbstick(ThumbstickKey::LeftThumbstickUp), codes::KEY_W);

        store.unset(key).unwrap();
        assert_eq!(store.thumbstick(ThumbstickKey::LeftThumbstickUp), codes::KEY_W);
    }

    #[test]
    fn test_unset_collision_is_rejected() {
        let store = store();

        // Park A elsewhere and move B onto A's default
        store
            .set(
                SettingKey::Button(ButtonKey::A),
                SettingValue::Code(codes::KEY_W),
            )
            .unwrap();
        store
            .set(
                SettingKey::Button(ButtonKey::B),
                SettingValue::Code(codes::ENTER),
            )
            .unwrap();

        // A's default (ENTER) is now held by B
        assert!(store.unset(SettingKey::Button(ButtonKey::A)).is_err());
        assert_eq!(store.button(ButtonKey::A), codes::KEY_W);
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let store = store();
        let err = store
            .set(
                SettingKey::Button(ButtonKey::A),
                SettingValue::Port(9090),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Validation(crate::error::ValidationError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_save_clears_dirty() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        let store = store();

        store.set_mouse_sensitivity(123.0).unwrap();
        assert!(store.is_dirty());

        store.save_to(&path).unwrap();
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let store = store();
        store.set_mouse_sensitivity(123.0).unwrap();
        store.reset();
        assert!((store.mouse_sensitivity() - 1000.0).abs() < f32::EPSILON);
        assert!(store.is_dirty());
    }
}
