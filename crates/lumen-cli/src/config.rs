//! Configuration for the `lumen` binary.
//!
//! [`LumenConfig`] loads from TOML files, environment variables, and
//! defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `LUMEN_CONFIG` environment variable
//! 3. XDG default: `~/.config/lumen/config.toml`
//! 4. Built-in defaults
//!
//! `LUMEN_<SECTION>_<KEY>` variables are layered on top of whichever file
//! was found.

use std::path::PathBuf;

use confyg::{Confygery, env};
use lumen_api::ServerSettings;
use lumen_contact::{DatabaseSettings, SmtpSettings};
use lumen_content::PostStore;
use lumen_content::store::DEFAULT_EXTENSION;
use lumen_core::traits::ConfigProvider;
use lumen_core::util::paths::expand_tilde;
use lumen_core::{Error, Result};
use lumen_vault::VaultPasskeys;
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "LUMEN_CONFIG";

/// Prefix for per-key environment overrides.
const ENV_PREFIX: &str = "LUMEN";

/// Sections that accept `LUMEN_<SECTION>_<KEY>` overrides.
const ENV_SECTIONS: [&str; 6] = ["site", "content", "database", "smtp", "vault", "server"];

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the site backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LumenConfig {
    /// Project name, used for default paths.
    pub project_name: String,

    /// Base path for site data. Defaults to the working directory.
    pub base_path: Option<String>,

    /// Public site settings.
    pub site: SiteConfig,

    /// Blog corpus location.
    pub content: ContentConfig,

    /// Contact submission store.
    pub database: DatabaseSettings,

    /// Outbound mail.
    pub smtp: SmtpSettings,

    /// Vault passkeys.
    pub vault: VaultPasskeys,

    /// HTTP listener.
    pub server: ServerSettings,
}

/// Public site settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Canonical public URL.
    pub url: Option<String>,
}

/// Blog corpus location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Corpus directory. Defaults to `<base>/content/blog`.
    pub path: Option<String>,

    /// Post file extension, without the dot.
    pub extension: String,
}

impl Default for LumenConfig {
    fn default() -> Self {
        Self {
            project_name: "lumen".to_string(),
            base_path: None,
            site: SiteConfig::default(),
            content: ContentConfig::default(),
            database: DatabaseSettings::default(),
            smtp: SmtpSettings::default(),
            vault: VaultPasskeys::default(),
            server: ServerSettings::default(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: None,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl LumenConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path)
            && path.exists()
        {
            builder
                .add_file(&path.to_string_lossy())
                .map_err(|e| Error::config(format!("config file: {e}")))?;
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        for section in ENV_SECTIONS {
            env_opts.add_section(section);
        }
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let mut merged: toml::Value = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        // Env overrides arrive as strings; retype them against the defaults.
        let shape = toml::Value::try_from(Self::default()).map_err(|e| Error::config(e.to_string()))?;
        coerce_scalars(&mut merged, &shape);

        merged
            .try_into()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lumen").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into `LUMEN_`-prefixed environment variable pairs.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }

    /// The file-backed blog corpus this config points at.
    pub fn post_store(&self) -> Result<PostStore> {
        Ok(PostStore::from_config(self)?.with_extension(self.content.extension.as_str()))
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for LumenConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_path(&self, content_type: &str) -> Result<PathBuf> {
        match &self.content.path {
            Some(p) => Ok(expand_tilde(p)),
            None => Ok(self.base_path()?.join("content").join(content_type)),
        }
    }
}

// ============================================================================
// Helper: retype string leaves
// ============================================================================

/// Parse string leaves of `value` into the scalar type found at the same
/// path in `shape`. Leaves that do not parse are left for serde to reject.
fn coerce_scalars(value: &mut toml::Value, shape: &toml::Value) {
    if let (Some(table), Some(shape)) = (value.as_table_mut(), shape.as_table()) {
        for (key, val) in table.iter_mut() {
            if let Some(expected) = shape.get(key) {
                coerce_scalars(val, expected);
            }
        }
        return;
    }

    let Some(raw) = value.as_str().map(str::trim) else {
        return;
    };
    let coerced = match shape {
        toml::Value::Integer(_) => raw.parse().ok().map(toml::Value::Integer),
        toml::Value::Float(_) => raw.parse().ok().map(toml::Value::Float),
        toml::Value::Boolean(_) => raw.parse().ok().map(toml::Value::Boolean),
        _ => None,
    };
    if let Some(coerced) = coerced {
        *value = coerced;
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{EnvGuard, env_lock};
    use std::collections::HashMap;

    #[test]
    fn test_lumen_config_default() {
        let config = LumenConfig::default();
        assert_eq!(config.project_name, "lumen");
        assert!(config.base_path.is_none());
        assert!(config.site.url.is_none());
        assert_eq!(config.content.extension, "mdx");
        assert_eq!(config.database.name, "lumen");
        assert_eq!(config.database.collection, "contact_submissions");
        assert_eq!(config.smtp.port, 587);
        assert!(config.vault.investors.is_none());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_lumen_config_from_toml() {
        let toml_str = r#"
            project_name = "site"
            base_path = "/srv/site"

            [site]
            url = "https://lumen.example"

            [content]
            path = "/srv/posts"
            extension = "md"

            [database]
            uri = "mongodb://db:27017"

            [smtp]
            host = "smtp.lumen.example"
            port = 465
            operator = "team@lumen.example"

            [vault]
            community = "COMMUNITY2024"

            [server]
            port = 8080
            host = "0.0.0.0"
        "#;

        let config: LumenConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.site.url.as_deref(), Some("https://lumen.example"));
        assert_eq!(config.content.path.as_deref(), Some("/srv/posts"));
        assert_eq!(config.content.extension, "md");
        assert_eq!(config.database.uri.as_deref(), Some("mongodb://db:27017"));
        assert_eq!(config.database.name, "lumen");
        assert_eq!(config.smtp.port, 465);
        assert_eq!(config.smtp.operator_email(), "team@lumen.example");
        assert_eq!(config.vault.community.as_deref(), Some("COMMUNITY2024"));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_lumen_config_to_toml() {
        let config = LumenConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("project_name = \"lumen\""));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("port = 3000"));

        let parsed: LumenConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_lumen_config_load_from_file() {
        let _lock = env_lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "loaded"
                [server]
                port = 9090
                [vault]
                talent = "TALENT2024"
            "#,
        )
        .unwrap();

        let config = LumenConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.project_name, "loaded");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.vault.talent.as_deref(), Some("TALENT2024"));
    }

    #[test]
    fn test_lumen_config_load_defaults() {
        let _lock = env_lock();
        let config = LumenConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.project_name, "lumen");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_lumen_config_load_env_overlay() {
        let _lock = env_lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [database]
                uri = "mongodb://from-file"
            "#,
        )
        .unwrap();

        let _uri = EnvGuard::new("LUMEN_DATABASE_URI", "mongodb://from-env");
        let _key = EnvGuard::new("LUMEN_VAULT_INVESTORS", "INVEST2024");
        let config = LumenConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.database.uri.as_deref(), Some("mongodb://from-env"));
        assert_eq!(config.vault.investors.as_deref(), Some("INVEST2024"));
    }

    #[test]
    fn test_lumen_config_load_numeric_env() {
        let _lock = env_lock();
        let _smtp = EnvGuard::new("LUMEN_SMTP_PORT", "465");
        let _server = EnvGuard::new("LUMEN_SERVER_PORT", " 8080 ");
        let config = LumenConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.smtp.port, 465);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_lumen_config_load_bad_numeric_env() {
        let _lock = env_lock();
        let _port = EnvGuard::new("LUMEN_SERVER_PORT", "eighty");
        let err = LumenConfig::load(Some("/nonexistent/config.toml")).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_lumen_config_env_export_round_trip() {
        let _lock = env_lock();
        let exported = LumenConfig {
            smtp: SmtpSettings {
                port: 465,
                host: Some("smtp.lumen.example".into()),
                ..Default::default()
            },
            vault: VaultPasskeys {
                community: Some("2024".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let _guards: Vec<EnvGuard> = exported
            .to_env_vars()
            .unwrap()
            .iter()
            .map(|(key, value)| EnvGuard::new(key, value))
            .collect();

        let loaded = LumenConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(loaded.smtp.port, 465);
        assert_eq!(loaded.smtp.host.as_deref(), Some("smtp.lumen.example"));
        assert_eq!(loaded.server.port, 3000);
        assert_eq!(loaded.vault.community.as_deref(), Some("2024"));
    }

    #[test]
    fn test_coerce_scalars_follows_shape() {
        let shape: toml::Value = toml::from_str("[server]\nport = 3000\nhost = \"h\"").unwrap();
        let mut value: toml::Value =
            toml::from_str("[server]\nport = \"8080\"\nhost = \"10\"\n[vault]\ntalent = \"7\"")
                .unwrap();
        coerce_scalars(&mut value, &shape);
        assert_eq!(value["server"]["port"], toml::Value::Integer(8080));
        assert_eq!(value["server"]["host"], toml::Value::String("10".into()));
        assert_eq!(value["vault"]["talent"], toml::Value::String("7".into()));
    }

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = LumenConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_env() {
        let _lock = env_lock();
        let _guard = EnvGuard::new(CONFIG_ENV_VAR, "/env/config.toml");
        let path = LumenConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_default() {
        let _lock = env_lock();
        let _guard = EnvGuard::remove(CONFIG_ENV_VAR);
        let p = LumenConfig::resolve_config_path(None).unwrap();
        assert!(p.to_str().unwrap().contains("lumen"));
        assert!(p.to_str().unwrap().ends_with("config.toml"));
    }

    #[test]
    fn test_provider_content_path_default() {
        let config = LumenConfig {
            base_path: Some("/srv/site".into()),
            ..Default::default()
        };
        assert_eq!(
            config.content_path("blog").unwrap(),
            PathBuf::from("/srv/site/content/blog")
        );
    }

    #[test]
    fn test_provider_content_path_explicit() {
        let config = LumenConfig {
            content: ContentConfig {
                path: Some("/custom/posts".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.content_path("blog").unwrap(), PathBuf::from("/custom/posts"));
    }

    #[test]
    fn test_provider_paths_expand_tilde() {
        let config = LumenConfig {
            base_path: Some("~/site".into()),
            ..Default::default()
        };
        let base = config.base_path().unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(base, home.join("site"));
            assert_eq!(config.content_path("blog").unwrap(), home.join("site/content/blog"));
        }
    }

    #[test]
    fn test_post_store_uses_content_settings() {
        let config = LumenConfig {
            content: ContentConfig {
                path: Some("/custom/posts".into()),
                extension: "md".into(),
            },
            ..Default::default()
        };
        let store = config.post_store().unwrap();
        assert_eq!(store.dir(), std::path::Path::new("/custom/posts"));
    }

    #[test]
    fn test_to_env_vars() {
        let config = LumenConfig {
            database: DatabaseSettings {
                uri: Some("mongodb://db".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let map: HashMap<_, _> = config.to_env_vars().unwrap().into_iter().collect();
        assert_eq!(map.get("LUMEN_PROJECT_NAME").unwrap(), "lumen");
        assert_eq!(map.get("LUMEN_SERVER_PORT").unwrap(), "3000");
        assert_eq!(map.get("LUMEN_DATABASE_URI").unwrap(), "mongodb://db");
        assert_eq!(map.get("LUMEN_SMTP_PORT").unwrap(), "587");
        // Unset optional values are omitted.
        assert!(!map.contains_key("LUMEN_SMTP_HOST"));
    }

    #[test]
    fn test_lumen_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LumenConfig>();
    }
}
