//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use lumen_content::DEFAULT_RELATED_LIMIT;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level arguments for `lumen`.
#[derive(Parser, Debug)]
#[command(name = "lumen", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "LUMEN_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (overrides `server.port`).
        #[arg(short, long)]
        port: Option<u16>,

        /// Interface to bind (overrides `server.host`).
        #[arg(long)]
        host: Option<String>,
    },

    /// Inspect the blog corpus.
    Posts(PostsCommand),

    /// Vault passkey operations.
    Vault(VaultCommand),

    /// Print version information.
    Version,

    /// Check configuration and corpus health.
    Health,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Posts-specific subcommands.
#[derive(Parser, Debug)]
pub struct PostsCommand {
    /// Posts subcommand to execute.
    #[command(subcommand)]
    pub command: PostsAction,
}

/// Available posts subcommands.
#[derive(Subcommand, Debug)]
pub enum PostsAction {
    /// List posts, newest first.
    List {
        /// Only posts in this category (exact match).
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one post with its body.
    Show {
        /// Post slug.
        slug: String,
    },

    /// Rank posts related to one post.
    Related {
        /// Post slug.
        slug: String,

        /// Maximum number of posts.
        #[arg(short, long, default_value_t = DEFAULT_RELATED_LIMIT)]
        limit: usize,
    },
}

/// Vault-specific subcommands.
#[derive(Parser, Debug)]
pub struct VaultCommand {
    /// Vault subcommand to execute.
    #[command(subcommand)]
    pub command: VaultAction,
}

/// Available vault subcommands.
#[derive(Subcommand, Debug)]
pub enum VaultAction {
    /// Report which area a passkey unlocks.
    Check {
        /// Passkey to test.
        passkey: String,
    },
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "server.port").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "server.port").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    ///
    /// The database URI, SMTP password and vault passkeys are redacted
    /// unless `--show-secrets` is given.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,

        /// Print credentials in plain text.
        #[arg(long)]
        show_secrets: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
