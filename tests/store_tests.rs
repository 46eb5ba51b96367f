//! Integration tests for the settings store: defaults, persistence
//! round-trips, and the concurrent snapshot guarantee.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use padconf::defaults;
use padconf::input::{codes, InputCode, InputCodeDb};
use padconf::keys::{all_keys, ButtonKey, Domain, ServerKey, SettingKey, ThumbstickKey, DOMAINS};
use padconf::settings::SettingValue;
use padconf::store::SettingsStore;
use padconf::validator::SettingsValidator;

use tempfile::TempDir;

fn input_db() -> InputCodeDb {
    InputCodeDb::load().expect("embedded input code table loads")
}

#[test]
fn test_default_is_defined_and_valid_for_every_key() {
    let db = input_db();
    let validator = SettingsValidator::new(&db);

    for domain in DOMAINS {
        for key in all_keys(domain) {
            let value = defaults::default_for(key);
            assert!(
                validator.validate_value(key, &value).is_ok(),
                "default for {key} fails its own validation"
            );
        }
    }
}

#[test]
fn test_save_load_round_trip_reproduces_state() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.toml");

    let store = SettingsStore::with_defaults(input_db());
    store
        .set(
            SettingKey::Button(ButtonKey::A),
            SettingValue::Code(codes::KEY_W),
        )
        .unwrap();
    store
        .set(
            SettingKey::Thumbstick(ThumbstickKey::LeftThumbstickUp),
            SettingValue::Code(codes::ENTER),
        )
        .unwrap();
    store
        .set(
            SettingKey::Server(ServerKey::Port),
            SettingValue::Port(65535),
        )
        .unwrap();
    store.set_mouse_sensitivity(42.5).unwrap();
    store.save_to(&path).unwrap();

    let (reloaded, report) = SettingsStore::load(input_db(), &path).unwrap();
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
    assert_eq!(*reloaded.snapshot(), *store.snapshot());
}

#[test]
fn test_unset_twice_equals_unset_once() {
    let store = SettingsStore::with_defaults(input_db());
    let key = SettingKey::Button(ButtonKey::View);

    store
        .set(key, SettingValue::Code(codes::KEY_S))
        .unwrap();

    store.unset(key).unwrap();
    let once = store.button(ButtonKey::View);
    store.unset(key).unwrap();
    let twice = store.button(ButtonKey::View);

    assert_eq!(once, defaults::button_default(ButtonKey::View));
    assert_eq!(once, twice);
}

#[test]
fn test_duplicate_binding_rejected_then_distinct_accepted() {
    let store = SettingsStore::with_defaults(input_db());
    let code = store.button(ButtonKey::A);

    // Same code for B is rejected...
    assert!(store
        .set(SettingKey::Button(ButtonKey::B), SettingValue::Code(code))
        .is_err());

    // ...a distinct code is fine
    store
        .set(
            SettingKey::Button(ButtonKey::B),
            SettingValue::Code(InputCode::new(0x46)),
        )
        .unwrap();
    assert_eq!(store.button(ButtonKey::B), InputCode::new(0x46));
}

#[test]
fn test_port_boundaries_via_store() {
    let store = SettingsStore::with_defaults(input_db());
    let key = SettingKey::Server(ServerKey::Port);

    assert!(store.set(key, SettingValue::Port(0)).is_err());
    store.set(key, SettingValue::Port(1)).unwrap();
    store.set(key, SettingValue::Port(65535)).unwrap();
    assert_eq!(store.port(), 65535);
}

#[test]
fn test_sensitivity_boundaries_via_store() {
    let store = SettingsStore::with_defaults(input_db());

    assert!(store.set_mouse_sensitivity(0.0).is_err());
    assert!(store.set_mouse_sensitivity(-5.0).is_err());
    store.set_mouse_sensitivity(0.5).unwrap();
    store
        .set_mouse_sensitivity(padconf::constants::MAX_MOUSE_SENSITIVITY)
        .unwrap();
    assert!(store
        .set_mouse_sensitivity(padconf::constants::MAX_MOUSE_SENSITIVITY + 1.0)
        .is_err());
}

#[test]
fn test_lookup_by_name_matches_registry() {
    for domain in DOMAINS {
        for key in all_keys(domain) {
            assert_eq!(padconf::keys::lookup(domain, key.name()).unwrap(), key);
        }
    }
    assert!(padconf::keys::lookup(Domain::Button, "NOPE").is_err());
}

/// N concurrent readers during in-flight writes never observe a torn or
/// invariant-violating state: every snapshot is either pre- or post-write.
#[test]
fn test_concurrent_readers_see_consistent_snapshots() {
    let store = Arc::new(SettingsStore::with_defaults(input_db()));
    let stop = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let snapshot = store.snapshot();

                    // Bindings stay unique inside the button aggregate
                    let codes: HashSet<InputCode> =
                        snapshot.buttons.iter().map(|(_, code)| code).collect();
                    assert_eq!(codes.len(), ButtonKey::ALL.len(), "torn button state");

                    // The scalar only ever shows a value some write produced
                    let sensitivity = snapshot.mouse_sensitivity;
                    assert!(
                        [1000.0_f32, 500.0, 1500.0].contains(&sensitivity),
                        "torn sensitivity {sensitivity}"
                    );
                }
            })
        })
        .collect();

    let key_e = InputCode::new(0x45);
    let key_f = InputCode::new(0x46);
    for round in 0..200 {
        let code = if round % 2 == 0 { key_e } else { key_f };
        store
            .set(SettingKey::Button(ButtonKey::A), SettingValue::Code(code))
            .unwrap();

        let sensitivity = if round % 2 == 0 { 500.0 } else { 1500.0 };
        store.set_mouse_sensitivity(sensitivity).unwrap();
    }

    stop.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().expect("reader observed a torn snapshot");
    }
}

#[test]
fn test_load_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.toml");

    let (store, report) = SettingsStore::load(input_db(), &path).unwrap();
    assert!(report.is_valid());
    assert_eq!(store.port(), defaults::DEFAULT_PORT);
    assert!(!store.is_dirty());
}

#[test]
fn test_load_failure_allows_defaults_fallback() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.toml");
    std::fs::write(&path, "this is { not toml").unwrap();

    // Load surfaces the codec error; the caller falls back to defaults
    assert!(SettingsStore::load(input_db(), &path).is_err());
    let store = SettingsStore::with_defaults(input_db());
    assert_eq!(store.port(), defaults::DEFAULT_PORT);
}
