//! Subcommand handlers: bridge CLI args -> core calls -> output formatting.

pub mod check;
pub mod config_cmd;
