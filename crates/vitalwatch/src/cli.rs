//! Clap derive structures for the `vitalwatch` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only depends on clap so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vitalwatch -- admin console for the VitalWatch health-monitoring platform
#[derive(Debug, Parser)]
#[command(
    name = "vitalwatch",
    version,
    about = "Administer the VitalWatch health-monitoring platform",
    long_about = "Admin console for VitalWatch wearables.\n\n\
        Manage users and their devices, review health alerts raised by the\n\
        anomaly model, browse health data and watch the system dashboard.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "VITALWATCH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL including the API prefix (overrides profile)
    #[arg(long, env = "VITALWATCH_API_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "VITALWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "VITALWATCH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "VITALWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Session file holding the bearer token
    #[arg(long, env = "VITALWATCH_SESSION_FILE", global = true, hide = true)]
    pub session_file: Option<PathBuf>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    New,
    Viewed,
    Resolved,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RangeArg {
    /// The last 60 minutes
    #[value(name = "1h")]
    LastHour,
    /// Since midnight UTC
    Today,
    /// The last seven days
    #[value(name = "7d")]
    LastSevenDays,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login(LoginArgs),

    /// Drop the stored session token
    Logout,

    /// Show the signed-in admin
    Whoami,

    /// Create a new account
    Register(RegisterArgs),

    /// Manage monitored users
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Manage wearable devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Review health alerts
    #[command(alias = "a")]
    Alerts(AlertsArgs),

    /// Push health data
    Health(HealthArgs),

    /// System overview: users, devices, server, database and API
    #[command(alias = "dash")]
    Dashboard,

    /// Show or set the stored theme preference
    Theme {
        /// New theme; omit to show the current one
        theme: Option<ThemeArg>,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Server-side paging shared by all list commands.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Zero-based page number
    #[arg(long, default_value = "0")]
    pub page: u32,

    /// Rows per page (defaults to the profile's page size)
    #[arg(long)]
    pub size: Option<u32>,

    /// Server-side sort field
    #[arg(long)]
    pub sort_by: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (defaults to the profile's username, else prompts)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Password (prefer the prompt, keyring or VITALWATCH_PASSWORD)
    #[arg(long, env = "VITALWATCH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, short = 'u')]
    pub username: String,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub dob: Option<String>,

    #[arg(long)]
    pub gender: Option<GenderArg>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users, one page at a time
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Match on full name, username or email (current page only)
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Only enabled (true) or disabled (false) accounts
        #[arg(long)]
        enabled: Option<bool>,
    },

    /// Show one user's profile and devices
    Get {
        /// Numeric user ID
        id: i64,
    },

    /// List the devices assigned to a user
    Devices { id: i64 },

    /// Update profile fields; omitted fields are left unchanged
    Update {
        id: i64,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        full_name: Option<String>,

        #[arg(long)]
        profile_picture_url: Option<String>,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<String>,

        #[arg(long)]
        gender: Option<GenderArg>,

        #[arg(long)]
        weight_kg: Option<f64>,

        #[arg(long)]
        height_m: Option<f64>,
    },

    /// Change a user's password (prompts for both passwords)
    Password { id: i64 },

    /// Show health samples for one of the user's devices
    Health {
        id: i64,

        /// Device UUID
        device: String,

        /// Time window
        #[arg(long, short = 'r', default_value = "today")]
        range: RangeArg,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices, one page at a time
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Match on name, UUID or owner (current page only)
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Only active (true) or inactive (false) devices
        #[arg(long)]
        active: Option<bool>,
    },

    /// Register a device for a user
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        /// Owner's username
        #[arg(long, short = 'u')]
        username: String,

        /// Device UUID (generated when omitted)
        #[arg(long)]
        uuid: Option<String>,
    },

    /// Reconfigure a device
    Config {
        /// Numeric device ID
        id: i64,

        /// Device UUID
        #[arg(long)]
        uuid: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Owner's username
        #[arg(long, short = 'u')]
        username: String,

        /// Whether the device is active
        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        active: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ALERTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List alerts, one page at a time
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only this severity (current page only)
        #[arg(long)]
        severity: Option<SeverityArg>,

        /// Only this status (current page only)
        #[arg(long)]
        status: Option<StatusArg>,
    },

    /// Open an alert; a new alert is marked viewed
    View { id: String },

    /// Mark an alert resolved
    Resolve { id: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  HEALTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct HealthArgs {
    #[command(subcommand)]
    pub command: HealthCommand,
}

#[derive(Debug, Subcommand)]
pub enum HealthCommand {
    /// Upload a batch of samples from a JSON file
    Sync {
        /// JSON file: {"deviceUuid": "...", "dataPoints": [...]}
        #[arg(long, short = 'f')]
        file: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config and session file locations
    Path,

    /// Set a value on the active profile
    Set {
        /// Profile key (base_url, username, ca_cert, insecure, timeout, page_size)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
