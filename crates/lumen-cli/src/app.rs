//! The `lumen` application: logging setup and command dispatch.

use std::sync::Arc;

use lumen_api::{ApiState, serve, shutdown_signal};
use lumen_contact::{ContactService, MongoPool, MongoSubmissionStore, Notifier};
use lumen_content::PostProvider;
use lumen_content::store::BLOG_CONTENT_TYPE;
use lumen_core::traits::ConfigProvider;
use lumen_core::{Error, Result};
use lumen_vault::{PasskeyCheck, PasskeyRegistry, VaultArea};
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command, VaultAction};
use crate::config::LumenConfig;
use crate::{config_handlers, post_handlers};

// ============================================================================
// LumenCli
// ============================================================================

/// The CLI application over a loaded [`LumenConfig`].
pub struct LumenCli {
    name: String,
    config: Arc<LumenConfig>,
    version: String,
}

impl LumenCli {
    /// Create from CLI args, loading config from file and env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = LumenConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create an application over an already-built config.
    pub fn new(name: impl Into<String>, config: LumenConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The loaded configuration.
    pub fn config(&self) -> &LumenConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// `RUST_LOG` wins when set; otherwise `--quiet` means `warn`,
    /// `--verbose` means `debug`, and the default is `info`. Library crates
    /// log through `log`, which the subscriber picks up.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (e.g. in tests).
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Health) => self.health().await,
            Some(Command::Serve { port, host }) => self.serve(port, host).await,
            Some(Command::Posts(posts)) => {
                let store = self.config.post_store()?;
                post_handlers::handle_posts_command(&store, posts.command).await
            }
            Some(Command::Vault(vault)) => match vault.command {
                VaultAction::Check { passkey } => self.vault_check(&passkey),
            },
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    /// Build every service from config and serve until a shutdown signal.
    async fn serve(&self, port: Option<u16>, host: Option<String>) -> Result<()> {
        let config = &self.config;

        let mut settings = config.server.clone();
        if let Some(port) = port {
            settings.port = port;
        }
        if let Some(host) = host {
            settings.host = host;
        }

        let posts: Arc<dyn PostProvider> = Arc::new(config.post_store()?);
        let pool = Arc::new(MongoPool::new(config.database.clone()));
        if config.database.uri.is_none() {
            tracing::warn!("database.uri is not set; contact submissions will not be stored");
        }
        let contact = ContactService::new(
            Arc::new(MongoSubmissionStore::new(pool.clone())),
            Notifier::smtp(config.smtp.clone()),
        );
        let vault = PasskeyRegistry::from_passkeys(&config.vault);

        if let Some(url) = &config.site.url {
            tracing::info!("Serving API for {url}");
        }
        tracing::info!("Blog corpus at {}", config.content_path(BLOG_CONTENT_TYPE)?.display());

        let state = ApiState::new(posts, contact, vault);
        let result = serve(&settings, state, shutdown_signal()).await;

        pool.close().await;
        result
    }

    /// Report on corpus and service configuration.
    async fn health(&self) -> Result<()> {
        let config = &self.config;
        let store = config.post_store()?;

        println!("{} {}", self.name, self.version);
        println!("  blog corpus:  {} ({} posts)", store.dir().display(), store.count().await?);
        println!("  database:     {}", configured(config.database.uri.is_some()));
        println!("  smtp:         {}", configured(config.smtp.host.is_some()));
        println!("  operator:     {}", config.smtp.operator_email());

        let registry = PasskeyRegistry::from_passkeys(&config.vault);
        for area in VaultArea::ALL {
            println!("  vault/{:<10}{}", area.as_str(), configured(registry.has(area)));
        }
        Ok(())
    }

    fn vault_check(&self, passkey: &str) -> Result<()> {
        let registry = PasskeyRegistry::from_passkeys(&self.config.vault);
        match registry.check(passkey) {
            PasskeyCheck::Granted(area) => {
                println!("{area}: {}", area.path());
                Ok(())
            }
            PasskeyCheck::Denied => {
                Err(Error::invalid_data("passkey does not unlock any vault area"))
            }
        }
    }
}

fn configured(yes: bool) -> &'static str {
    if yes { "configured" } else { "not configured" }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ContentConfig;
    use crate::test_support::env_lock;
    use clap::Parser;
    use lumen_vault::VaultPasskeys;

    fn test_config(dir: &std::path::Path) -> LumenConfig {
        LumenConfig {
            content: ContentConfig {
                path: Some(dir.to_string_lossy().into_owned()),
                ..Default::default()
            },
            vault: VaultPasskeys {
                community: Some("COMMUNITY2024".into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_lumen_cli_new() {
        let cli = LumenCli::new("lumen", LumenConfig::default()).with_version("1.2.3");
        assert_eq!(cli.name, "lumen");
        assert_eq!(cli.version, "1.2.3");
        assert_eq!(cli.config().project_name(), "lumen");
    }

    #[tokio::test]
    async fn test_run_version_and_no_command() {
        let cli = LumenCli::new("lumen", LumenConfig::default());
        assert!(cli.run(CliArgs::parse_from(["lumen", "version"])).await.is_ok());
        assert!(cli.run(CliArgs::parse_from(["lumen"])).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_health() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = LumenCli::new("lumen", test_config(dir.path()));
        assert!(cli.run(CliArgs::parse_from(["lumen", "health"])).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_posts_list_empty_corpus() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = LumenCli::new("lumen", test_config(&dir.path().join("missing")));
        let args = CliArgs::parse_from(["lumen", "posts", "list"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_posts_show_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = LumenCli::new("lumen", test_config(dir.path()));
        let args = CliArgs::parse_from(["lumen", "posts", "show", "nope"]);
        assert!(cli.run(args).await.unwrap_err().is_not_found());
    }

    #[test]
    fn test_vault_check() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = LumenCli::new("lumen", test_config(dir.path()));
        assert!(cli.vault_check("community2024").is_ok());
        assert!(cli.vault_check("wrong").is_err());
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        let cli = LumenCli::new("lumen", LumenConfig::default());
        cli.init_logging(false, false);
        cli.init_logging(true, false);
        cli.init_logging(false, true);
    }

    #[test]
    fn test_from_args_with_file() {
        let _lock = env_lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "project_name = \"from-file\"\n").unwrap();

        let args = CliArgs::parse_from(["lumen", "--config", path.to_str().unwrap()]);
        let cli = LumenCli::from_args("lumen", &args).unwrap();
        assert_eq!(cli.config().project_name(), "from-file");
    }

    #[tokio::test]
    async fn test_config_command_dispatch() {
        let cli = LumenCli::new("lumen", LumenConfig::default());
        let args =
            CliArgs::parse_from(["lumen", "--config", "/nonexistent/lumen.toml", "config", "path"]);
        assert!(cli.run(args).await.is_ok());
    }
}
