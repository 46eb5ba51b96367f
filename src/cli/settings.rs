//! Settings management CLI commands: show, set, unset, reset, path.

use clap::Args;

use crate::cli::common::{CliError, CliResult};
use crate::codec::{self, RawSettings};
use crate::error::SettingsError;
use crate::input::{InputCode, InputCodeDb};
use crate::keys::{Domain, ServerKey, SettingKey};
use crate::settings::SettingValue;
use crate::store::SettingsStore;
use crate::validator::validate_port;

/// Display current settings
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let (store, report) = SettingsStore::load_or_defaults(load_codes()?);
        for warning in &report.warnings {
            eprintln!("warning: {warning}");
        }

        let snapshot = store.snapshot();

        if self.json {
            let raw = RawSettings::from_settings(&snapshot);
            let json = serde_json::to_string_pretty(&raw)
                .map_err(|e| CliError::io(format!("Failed to serialize settings: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        let codes = store.codes();

        println!("Button bindings:");
        for (key, code) in snapshot.buttons.iter() {
            println!("  {:<12} {}", key.name(), format_code(codes, code));
        }

        println!();
        println!("Thumbstick bindings:");
        for (key, code) in snapshot.thumbsticks.iter() {
            println!("  {:<24} {}", key.name(), format_code(codes, code));
        }

        println!();
        println!("Server:");
        println!("  {:<12} {}", "Port", snapshot.server.port);

        println!();
        println!("Mouse sensitivity: {}", snapshot.mouse_sensitivity);

        Ok(())
    }
}

/// Set setting values
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Button binding as KEY=INPUT (e.g. A=ENTER), repeatable
    #[arg(long, value_name = "KEY=INPUT")]
    button: Vec<String>,

    /// Thumbstick binding as KEY=INPUT (e.g. LeftThumbstickUpKey=W), repeatable
    #[arg(long, value_name = "KEY=INPUT")]
    thumbstick: Vec<String>,

    /// Server port
    #[arg(long, value_name = "PORT")]
    port: Option<i64>,

    /// Mouse sensitivity
    #[arg(long, value_name = "VALUE")]
    mouse_sensitivity: Option<f32>,
}

impl SetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.button.is_empty()
            && self.thumbstick.is_empty()
            && self.port.is_none()
            && self.mouse_sensitivity.is_none()
        {
            return Err(CliError::usage(
                "At least one option must be specified: --button, --thumbstick, --port, or --mouse-sensitivity",
            ));
        }

        let (store, _) = SettingsStore::load_or_defaults(load_codes()?);

        for assignment in &self.button {
            let (name, value) = parse_assignment(assignment)?;
            let key = lookup_cli(Domain::Button, name)?;
            let code = parse_code(store.codes(), value)?;
            apply_set(&store, key, SettingValue::Code(code))?;
            println!("{} = {}", key, format_code(store.codes(), code));
        }

        for assignment in &self.thumbstick {
            let (name, value) = parse_assignment(assignment)?;
            let key = lookup_cli(Domain::Thumbstick, name)?;
            let code = parse_code(store.codes(), value)?;
            apply_set(&store, key, SettingValue::Code(code))?;
            println!("{} = {}", key, format_code(store.codes(), code));
        }

        if let Some(port) = self.port {
            let port = validate_port(port).map_err(|e| CliError::validation(e.to_string()))?;
            let key = SettingKey::Server(ServerKey::Port);
            apply_set(&store, key, SettingValue::Port(port))?;
            println!("{key} = {port}");
        }

        if let Some(value) = self.mouse_sensitivity {
            store
                .set_mouse_sensitivity(value)
                .map_err(|e| CliError::validation(e.to_string()))?;
            println!("mouse_sensitivity = {value}");
        }

        save_store(&store)
    }
}

/// Revert settings to their defaults
#[derive(Args, Debug)]
pub struct UnsetArgs {
    /// Button key to revert (e.g. A), repeatable
    #[arg(long, value_name = "KEY")]
    button: Vec<String>,

    /// Thumbstick key to revert, repeatable
    #[arg(long, value_name = "KEY")]
    thumbstick: Vec<String>,

    /// Revert the server port
    #[arg(long)]
    port: bool,

    /// Revert the mouse sensitivity
    #[arg(long)]
    mouse_sensitivity: bool,
}

impl UnsetArgs {
    /// Execute unset command
    pub fn execute(&self) -> CliResult<()> {
        if self.button.is_empty()
            && self.thumbstick.is_empty()
            && !self.port
            && !self.mouse_sensitivity
        {
            return Err(CliError::usage(
                "At least one option must be specified: --button, --thumbstick, --port, or --mouse-sensitivity",
            ));
        }

        let (store, _) = SettingsStore::load_or_defaults(load_codes()?);

        for name in &self.button {
            let key = lookup_cli(Domain::Button, name)?;
            store
                .unset(key)
                .map_err(|e| CliError::validation(e.to_string()))?;
            println!("{} reverted to default", key);
        }

        for name in &self.thumbstick {
            let key = lookup_cli(Domain::Thumbstick, name)?;
            store
                .unset(key)
                .map_err(|e| CliError::validation(e.to_string()))?;
            println!("{} reverted to default", key);
        }

        if self.port {
            let key = SettingKey::Server(ServerKey::Port);
            store
                .unset(key)
                .map_err(|e| CliError::validation(e.to_string()))?;
            println!("{} reverted to default", key);
        }

        if self.mouse_sensitivity {
            store.unset_mouse_sensitivity();
            println!("mouse_sensitivity reverted to default");
        }

        save_store(&store)
    }
}

/// Reset every setting to its default
#[derive(Args, Debug)]
pub struct ResetArgs {}

impl ResetArgs {
    /// Execute reset command
    pub fn execute(&self) -> CliResult<()> {
        let store = SettingsStore::with_defaults(load_codes()?);
        store.reset();
        save_store(&store)?;
        println!("All settings reset to defaults");
        Ok(())
    }
}

/// Print the settings file location
#[derive(Args, Debug)]
pub struct PathArgs {}

impl PathArgs {
    /// Execute path command
    pub fn execute(&self) -> CliResult<()> {
        let path = codec::settings_file_path().map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", path.display());
        Ok(())
    }
}

fn load_codes() -> CliResult<InputCodeDb> {
    InputCodeDb::load().map_err(|e| CliError::io(format!("Failed to load input code table: {e}")))
}

fn save_store(store: &SettingsStore) -> CliResult<()> {
    store
        .save()
        .map_err(|e| CliError::io(format!("Failed to save settings: {e}")))?;
    let path = codec::settings_file_path().map_err(|e| CliError::io(e.to_string()))?;
    println!("Settings saved to {}", path.display());
    Ok(())
}

fn lookup_cli(domain: Domain, name: &str) -> CliResult<SettingKey> {
    crate::keys::lookup(domain, name).map_err(|error| match error {
        SettingsError::NotFound { .. } => {
            CliError::usage(format!("{error}; see `padconf show` for valid keys"))
        }
        other => CliError::validation(other.to_string()),
    })
}

fn apply_set(store: &SettingsStore, key: SettingKey, value: SettingValue) -> CliResult<()> {
    store
        .set(key, value)
        .map_err(|e| CliError::validation(e.to_string()))
}

fn parse_assignment(arg: &str) -> CliResult<(&str, &str)> {
    arg.split_once('=')
        .map(|(name, value)| (name.trim(), value.trim()))
        .ok_or_else(|| CliError::usage(format!("Expected KEY=INPUT, got `{arg}`")))
}

fn parse_code(codes: &InputCodeDb, value: &str) -> CliResult<InputCode> {
    if let Some(code) = codes.resolve(value) {
        return Ok(code);
    }

    value.parse::<u16>().map(InputCode::new).map_err(|_| {
        CliError::usage(format!(
            "`{value}` is neither a known input name nor a numeric code; try `padconf codes`"
        ))
    })
}

fn format_code(codes: &InputCodeDb, code: InputCode) -> String {
    match codes.name_of(code) {
        Some(name) => format!("{name} ({code})"),
        None => format!("({code})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("A=ENTER").unwrap(), ("A", "ENTER"));
        assert_eq!(parse_assignment("A = 13").unwrap(), ("A", "13"));
        assert!(parse_assignment("A").is_err());
    }

    #[test]
    fn test_parse_code_name_or_number() {
        let codes = InputCodeDb::load().unwrap();
        assert_eq!(parse_code(&codes, "ENTER").unwrap(), InputCode::new(13));
        assert_eq!(parse_code(&codes, "13").unwrap(), InputCode::new(13));
        assert!(parse_code(&codes, "NOPE").is_err());
    }

    #[test]
    fn test_lookup_cli_unknown_key_is_usage_error() {
        let err = lookup_cli(Domain::Button, "TURBO").unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }
}
