//! CLI command handlers for padconf.
//!
//! This module provides headless, scriptable access to the settings store
//! for automation, testing, and shell integration. Interactive editing
//! lives in the main application's GUI, not here.

pub mod codes;
pub mod common;
pub mod settings;
pub mod validate;

// Re-export types used by main.rs and tests
pub use codes::CodesArgs;
pub use common::ExitCode;
pub use settings::{PathArgs, ResetArgs, SetArgs, ShowArgs, UnsetArgs};
pub use validate::ValidateArgs;
