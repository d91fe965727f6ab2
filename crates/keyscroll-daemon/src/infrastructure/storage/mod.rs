//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the daemon's TOML file from the XDG config
//! directory (or an explicit path), falls back to defaults on first run, and
//! writes a starter file for `keyscroll --init-config`.

pub mod config;
