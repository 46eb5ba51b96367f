//! VirtualGamePad Settings Library
//!
//! This library provides the settings subsystem for the VirtualGamePad input
//! remapper: the key registry, defaults, validation, the live settings store,
//! and TOML persistence. The input-injection engine and the network server
//! consume these settings but live outside this crate.

// Module declarations
pub mod cli;
pub mod codec;
pub mod constants;
pub mod defaults;
pub mod error;
pub mod input;
pub mod keys;
pub mod settings;
pub mod store;
pub mod validator;
