//! Clap derive structures for the `aci-health` CLI.
//!
//! Only depends on clap + clap_complete so `build.rs` can include it
//! to render man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// aci-health -- fault summary and node status for a Cisco ACI fabric
#[derive(Debug, Parser)]
#[command(
    name = "aci-health",
    version,
    about = "Check Cisco ACI fabric health from the APIC",
    long_about = "Logs in to a Cisco ACI APIC, counts fabric faults by severity,\n\
        lists critical and major faults, and reports spine, leaf, and\n\
        controller status.\n\n\
        Runs the `check` command when no subcommand is given.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (YAML or TOML)
    #[arg(long, env = "ACI_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Fabric profile to use
    #[arg(long, short = 'p', env = "ACI_PROFILE", global = true)]
    pub profile: Option<String>,

    /// APIC URL or host (overrides profile)
    #[arg(long, short = 'H', env = "ACI_HOST", global = true)]
    pub host: Option<String>,

    /// APIC username (overrides profile)
    #[arg(long, short = 'u', env = "ACI_USERNAME", global = true)]
    pub username: Option<String>,

    /// APIC password (overrides profile and keyring)
    #[arg(long, env = "ACI_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format [default: text]
    #[arg(long, short = 'o', env = "ACI_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates, even with a ca_cert configured
    #[arg(long, short = 'k', env = "ACI_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "ACI_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-layout text report
    Text,
    /// Pretty tables
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the health check (default)
    Check(CheckArgs),

    /// Inspect configuration and manage stored passwords
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Default, Args)]
pub struct CheckArgs {
    /// Exit with status 9 when any fault at or above this severity exists
    #[arg(long, value_enum)]
    pub fail_on: Option<FailOn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    Critical,
    Major,
    Minor,
    Warning,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path in use
    Path,

    /// Print the effective configuration (passwords redacted)
    Show,

    /// Store the profile's password in the system keyring
    SetPassword {
        /// Read the password from the first line of stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
