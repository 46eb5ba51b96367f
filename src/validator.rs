//! Settings validation.
//!
//! Per-key checks (recognized input code, port range, sensitivity range) plus
//! the aggregate-level uniqueness rule: no two bindings within the same
//! aggregate may map to the same physical input. Whenever any binding
//! changes, the full aggregate is re-checked rather than only the changed
//! key, so cross-key collisions are caught deterministically.

use std::collections::HashMap;

use crate::constants::MAX_MOUSE_SENSITIVITY;
use crate::error::ValidationError;
use crate::input::{InputCode, InputCodeDb};
use crate::keys::SettingKey;
use crate::settings::{Settings, SettingValue};

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Rejected values; a settings state with errors must not go live.
    pub errors: Vec<ValidationError>,
    /// Non-critical findings (e.g. values repaired during load).
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Warning message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Checks a port value against the valid range `[1, 65535]`.
///
/// Takes the wide integer type the persisted format and the CLI produce, so
/// out-of-range values are rejected before any narrowing cast.
pub fn validate_port(port: i64) -> Result<u16, ValidationError> {
    u16::try_from(port)
        .ok()
        .filter(|port| *port >= 1)
        .ok_or(ValidationError::PortOutOfRange(port))
}

/// Checks a mouse sensitivity value against `(0, MAX_MOUSE_SENSITIVITY]`.
pub fn validate_sensitivity(value: f32) -> Result<(), ValidationError> {
    if value > 0.0 && value <= MAX_MOUSE_SENSITIVITY && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::SensitivityOutOfRange {
            value,
            max: MAX_MOUSE_SENSITIVITY,
        })
    }
}

/// Settings validator.
pub struct SettingsValidator<'a> {
    codes: &'a InputCodeDb,
}

impl<'a> SettingsValidator<'a> {
    /// Creates a new settings validator.
    #[must_use]
    pub const fn new(codes: &'a InputCodeDb) -> Self {
        Self { codes }
    }

    /// Validates a single value against its key's constraints.
    ///
    /// This is the per-key half of validation; the cross-key uniqueness rule
    /// runs at the aggregate level in [`Self::validate`].
    pub fn validate_value(
        &self,
        key: SettingKey,
        value: &SettingValue,
    ) -> Result<(), ValidationError> {
        match (key, value) {
            (SettingKey::Button(_) | SettingKey::Thumbstick(_), SettingValue::Code(code)) => {
                if self.codes.is_valid(*code) {
                    Ok(())
                } else {
                    Err(ValidationError::UnknownInputCode(*code))
                }
            }
            (SettingKey::Server(_), SettingValue::Port(port)) => {
                validate_port(i64::from(*port)).map(|_| ())
            }
            (key, value) => Err(ValidationError::WrongKind {
                key: key.to_string(),
                kind: value.kind_name(),
            }),
        }
    }

    /// Validates a complete settings state.
    ///
    /// Checks:
    /// - Every binding maps to a recognized input code
    /// - No duplicate bindings within the button aggregate
    /// - No duplicate bindings within the thumbstick aggregate
    /// - Port and mouse sensitivity are within range
    #[must_use]
    pub fn validate(&self, settings: &Settings) -> ValidationReport {
        let mut report = ValidationReport::new();

        self.validate_bindings(
            &mut report,
            settings.buttons.iter().map(|(key, code)| (SettingKey::Button(key), code)),
        );
        self.validate_bindings(
            &mut report,
            settings
                .thumbsticks
                .iter()
                .map(|(key, code)| (SettingKey::Thumbstick(key), code)),
        );

        if let Err(error) = validate_port(i64::from(settings.server.port)) {
            report.add_error(error);
        }
        if let Err(error) = validate_sensitivity(settings.mouse_sensitivity) {
            report.add_error(error);
        }

        report
    }

    /// Checks one aggregate's bindings: code validity plus uniqueness.
    fn validate_bindings(
        &self,
        report: &mut ValidationReport,
        bindings: impl Iterator<Item = (SettingKey, InputCode)>,
    ) {
        let mut holders: HashMap<InputCode, SettingKey> = HashMap::new();

        for (key, code) in bindings {
            if !self.codes.is_valid(code) {
                report.add_error(ValidationError::UnknownInputCode(code));
                continue;
            }

            if let Some(first) = holders.get(&code) {
                report.add_error(ValidationError::DuplicateBinding {
                    first: first.to_string(),
                    second: key.to_string(),
                    code,
                });
            } else {
                holders.insert(code, key);
            }
        }
    }
}
