//! Ambient helpers shared by the store crates and binaries.
//! - `utils::logging`: tracing subscriber setup.
//! - `env`: data directory sanity checks.

pub mod env;
pub mod utils;
