//! Configuration management
//!
//! Node address, mining difficulty and reward settings. Values come from
//! built-in defaults, an optional TOML file and `PKO_*` environment
//! variables, in that order of precedence.

pub mod settings;

pub use settings::Config;
