//! Client configuration: an optional `ots.toml` plus environment overrides.

pub mod settings;

pub use settings::Settings;
