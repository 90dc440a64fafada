//! Settings come from a TOML file plus `TALAIT__*` environment overrides.
//! Secrets are never stored in the file, only the names of the variables
//! that hold them.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
