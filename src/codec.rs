//! TOML persistence for the settings store.
//!
//! The persisted document has three tables (`button_settings`,
//! `thumbstick_settings`, `server_settings`), each mapping symbolic key names
//! to values, plus a scalar `mouse_sensitivity`. Loading is tolerant: a
//! missing file means "all defaults", unknown keys are dropped with a logged
//! warning, and invalid values are repaired to their defaults. Saving uses
//! the temp-file-then-rename pattern so a failure mid-write never corrupts
//! the previously persisted state.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{APP_NAME, CONFIG_DIR_ENV, SETTINGS_FILE_NAME};
use crate::defaults;
use crate::error::CodecError;
use crate::input::{InputCode, InputCodeDb};
use crate::keys::{ButtonKey, Domain, ThumbstickKey};
use crate::settings::Settings;
use crate::validator::{
    validate_port, validate_sensitivity, SettingsValidator, ValidationReport, ValidationWarning,
};

/// Top-level entries the document may carry; anything else is dropped with a
/// warning on load.
const KNOWN_TABLES: [&str; 4] = [
    "button_settings",
    "thumbstick_settings",
    "server_settings",
    "mouse_sensitivity",
];

/// The persisted settings document, exactly as read from disk.
///
/// Values are kept wide (`i64`) so out-of-range entries survive parsing and
/// are rejected by the validator instead of failing the whole load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSettings {
    /// Mouse sensitivity scalar, absent when never set. Declared before the
    /// tables: TOML requires scalar values ahead of any table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouse_sensitivity: Option<f32>,
    /// Button bindings by symbolic name.
    #[serde(default)]
    pub button_settings: BTreeMap<String, i64>,
    /// Thumbstick bindings by symbolic name.
    #[serde(default)]
    pub thumbstick_settings: BTreeMap<String, i64>,
    /// Server settings by symbolic name.
    #[serde(default)]
    pub server_settings: BTreeMap<String, i64>,
}

impl RawSettings {
    /// Builds the persisted form of a live settings record.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mouse_sensitivity: Some(settings.mouse_sensitivity),
            button_settings: settings
                .buttons
                .iter()
                .map(|(key, code)| (key.name().to_string(), i64::from(code.value())))
                .collect(),
            thumbstick_settings: settings
                .thumbsticks
                .iter()
                .map(|(key, code)| (key.name().to_string(), i64::from(code.value())))
                .collect(),
            server_settings: BTreeMap::from([(
                "Port".to_string(),
                i64::from(settings.server.port),
            )]),
        }
    }
}

/// Gets the config directory path.
///
/// The `PADCONF_CONFIG_DIR` environment variable overrides the platform
/// default:
/// - Linux: `~/.config/VirtualGamePad/`
/// - macOS: `~/Library/Application Support/VirtualGamePad/`
/// - Windows: `%APPDATA%\VirtualGamePad\`
pub fn config_dir() -> Result<PathBuf, CodecError> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or(CodecError::NoConfigDir)
}

/// Gets the full path to the settings file.
pub fn settings_file_path() -> Result<PathBuf, CodecError> {
    Ok(config_dir()?.join(SETTINGS_FILE_NAME))
}

/// Loads the persisted document from `path`.
///
/// A missing file is not an error; it reads as an empty document (all
/// defaults). Unknown top-level entries are dropped with a warning. Read
/// and parse failures surface as [`CodecError`] so the caller can fall back
/// to defaults; when the storage medium may be unavailable (e.g. a
/// network-mounted config dir) the caller should wrap this in a timeout.
pub fn load(path: &Path) -> Result<RawSettings, CodecError> {
    if !path.exists() {
        info!("settings file {} not found, using defaults", path.display());
        return Ok(RawSettings::default());
    }

    let content = fs::read_to_string(path).map_err(|source| CodecError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document: toml::Value =
        toml::from_str(&content).map_err(|source| CodecError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(table) = document.as_table() {
        for name in table.keys() {
            if !KNOWN_TABLES.contains(&name.as_str()) {
                warn!("dropping unknown entry `{}` in {}", name, path.display());
            }
        }
    }

    let raw: RawSettings = toml::from_str(&content).map_err(|source| CodecError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!("settings loaded from {}", path.display());
    Ok(raw)
}

/// Merges a raw document over the defaults, repairing what the validator
/// rejects.
///
/// Unknown key names, out-of-range codes, unrecognized codes and duplicate
/// bindings are reported as warnings and replaced by their defaults. The
/// returned settings record is complete and, short of a pathological
/// document, valid; if conflicts survive repair, the whole record falls back
/// to defaults so an invalid state never goes live.
#[must_use]
pub fn apply(codes: &InputCodeDb, raw: &RawSettings) -> (Settings, ValidationReport) {
    let mut report = ValidationReport::new();
    let mut settings = Settings::default();

    for (key, code) in merge_bindings(
        &ButtonKey::ALL,
        &raw.button_settings,
        Domain::Button,
        ButtonKey::from_name,
        defaults::button_default,
        codes,
        &mut report,
    ) {
        settings.buttons.set(key, code);
    }

    for (key, code) in merge_bindings(
        &ThumbstickKey::ALL,
        &raw.thumbstick_settings,
        Domain::Thumbstick,
        ThumbstickKey::from_name,
        defaults::thumbstick_default,
        codes,
        &mut report,
    ) {
        settings.thumbsticks.set(key, code);
    }

    merge_server(&raw.server_settings, &mut settings, &mut report);

    if let Some(value) = raw.mouse_sensitivity {
        if let Err(error) = validate_sensitivity(value) {
            report.add_warning(ValidationWarning::new(format!(
                "mouse_sensitivity reset to default: {error}"
            )));
        } else {
            settings.mouse_sensitivity = value;
        }
    }

    // Repair is best-effort; re-check the merged record as a whole and bail
    // out to pure defaults if conflicts survived.
    let check = SettingsValidator::new(codes).validate(&settings);
    if !check.is_valid() {
        report.add_warning(ValidationWarning::new(
            "persisted settings contain unresolvable conflicts, using defaults",
        ));
        settings = Settings::default();
    }

    (settings, report)
}

/// Resolves one domain's table to complete bindings in declaration order.
///
/// First-wins on duplicate codes: a later key whose persisted code is
/// already taken reverts to its default.
fn merge_bindings<K: Copy + Eq + Hash + Display>(
    all: &[K],
    table: &BTreeMap<String, i64>,
    domain: Domain,
    resolve_name: impl Fn(&str) -> Option<K>,
    default_of: impl Fn(K) -> InputCode,
    codes: &InputCodeDb,
    report: &mut ValidationReport,
) -> Vec<(K, InputCode)> {
    let mut explicit: HashMap<&str, InputCode> = HashMap::new();

    for (name, value) in table {
        let Some(key) = resolve_name(name) else {
            warn!("dropping unknown {} key `{}`", domain, name);
            report.add_warning(ValidationWarning::new(format!(
                "dropped unknown {} key `{}`",
                domain, name
            )));
            continue;
        };

        let code = match u16::try_from(*value) {
            Ok(code) => InputCode::new(code),
            Err(_) => {
                report.add_warning(ValidationWarning::new(format!(
                    "{}.{} reset to default: code {} is out of range",
                    domain.table_name(),
                    key,
                    value
                )));
                continue;
            }
        };

        if codes.is_valid(code) {
            explicit.insert(name.as_str(), code);
        } else {
            report.add_warning(ValidationWarning::new(format!(
                "{}.{} reset to default: input code {} is not recognized",
                domain.table_name(),
                key,
                code
            )));
        }
    }

    let mut taken: HashMap<InputCode, K> = HashMap::new();
    let mut bindings = Vec::with_capacity(all.len());

    for &key in all {
        let default = default_of(key);
        let mut code = explicit
            .get(key.to_string().as_str())
            .copied()
            .unwrap_or(default);

        if let Some(holder) = taken.get(&code) {
            report.add_warning(ValidationWarning::new(format!(
                "{}.{} reset to default: input code {} is already held by {}",
                domain.table_name(),
                key,
                code,
                holder
            )));
            code = default;
        }

        taken.entry(code).or_insert(key);
        bindings.push((key, code));
    }

    bindings
}

/// Merges the server table, repairing out-of-range ports.
fn merge_server(
    table: &BTreeMap<String, i64>,
    settings: &mut Settings,
    report: &mut ValidationReport,
) {
    for (name, value) in table {
        if name == "Port" {
            match validate_port(*value) {
                Ok(port) => settings.server.port = port,
                Err(error) => {
                    report.add_warning(ValidationWarning::new(format!(
                        "server_settings.Port reset to default: {error}"
                    )));
                }
            }
        } else {
            warn!("dropping unknown server key `{}`", name);
            report.add_warning(ValidationWarning::new(format!(
                "dropped unknown server key `{}`",
                name
            )));
        }
    }
}

/// Saves a settings record to `path` using an atomic write.
///
/// Serializes to pretty TOML, writes a temp sibling, then renames over the
/// target so a failure mid-write leaves the previous file intact. Callers on
/// an unreliable storage medium should wrap this in a timeout.
pub fn save(settings: &Settings, path: &Path) -> Result<(), CodecError> {
    let raw = RawSettings::from_settings(settings);
    let content = toml::to_string_pretty(&raw)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CodecError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("toml.tmp");
    fs::write(&temp_path, content).map_err(|source| CodecError::Write {
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| CodecError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("settings saved to {}", path.display());
    Ok(())
}
