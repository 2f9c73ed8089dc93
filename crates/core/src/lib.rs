pub mod assistant;
pub mod domain;
pub mod llm;
pub mod prompt;

pub mod config {
    use anyhow::{bail, Context};
    use std::path::PathBuf;

    const DEFAULT_PORT: u16 = 5000;
    const DEFAULT_STATIC_ROOT: &str = "dist/client";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub port: u16,
        pub node_env: Option<String>,
        pub serve_static: Option<bool>,
        pub static_root: PathBuf,
        pub openai_api_key: Option<String>,
        pub openai_base_url: Option<String>,
        pub openai_timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    /// What the HTTP server does besides the `/api` routes.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ServerConfig {
        pub serve_static: bool,
        pub static_root: PathBuf,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                serve_static: false,
                static_root: PathBuf::from(DEFAULT_STATIC_ROOT),
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Blank values count as unset.
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let var = |key: &str| {
                lookup(key)
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
            };

            let port = match var("PORT") {
                Some(v) => v
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a TCP port number (got {v})"))?,
                None => DEFAULT_PORT,
            };

            let serve_static = var("SERVE_STATIC")
                .map(|v| parse_flag("SERVE_STATIC", &v))
                .transpose()?;

            let openai_timeout_secs = var("OPENAI_TIMEOUT_SECS")
                .map(|v| {
                    v.parse::<u64>().with_context(|| {
                        format!("OPENAI_TIMEOUT_SECS must be an integer (got {v})")
                    })
                })
                .transpose()?;

            Ok(Self {
                port,
                node_env: var("NODE_ENV"),
                serve_static,
                static_root: var("STATIC_ROOT")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_ROOT)),
                openai_api_key: var("OPENAI_API_KEY"),
                openai_base_url: var("OPENAI_BASE_URL"),
                openai_timeout_secs,
                sentry_dsn: var("SENTRY_DSN"),
            })
        }

        pub fn require_openai_api_key(&self) -> anyhow::Result<&str> {
            self.openai_api_key
                .as_deref()
                .context("OPENAI_API_KEY is required")
        }

        pub fn is_production(&self) -> bool {
            self.node_env.as_deref() == Some("production")
        }

        /// `SERVE_STATIC` wins over the `NODE_ENV=production` gate.
        pub fn server_config(&self) -> ServerConfig {
            ServerConfig {
                serve_static: self.serve_static.unwrap_or_else(|| self.is_production()),
                static_root: self.static_root.clone(),
            }
        }
    }

    fn parse_flag(key: &str, value: &str) -> anyhow::Result<bool> {
        match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => bail!("{key} must be a boolean flag (got {other})"),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::collections::HashMap;

        fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
            let vars: HashMap<String, String> = vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Settings::from_lookup(|key| vars.get(key).cloned())
        }

        #[test]
        fn defaults_when_environment_is_empty() {
            let s = settings(&[]).unwrap();
            assert_eq!(s.port, 5000);
            assert!(s.openai_api_key.is_none());
            assert_eq!(s.server_config(), ServerConfig::default());
        }

        #[test]
        fn production_enables_static_serving() {
            let s = settings(&[("NODE_ENV", "production"), ("STATIC_ROOT", "/srv/app")]).unwrap();
            let cfg = s.server_config();
            assert!(cfg.serve_static);
            assert_eq!(cfg.static_root, PathBuf::from("/srv/app"));
        }

        #[test]
        fn serve_static_flag_overrides_node_env() {
            let s = settings(&[("NODE_ENV", "production"), ("SERVE_STATIC", "off")]).unwrap();
            assert!(!s.server_config().serve_static);

            let s = settings(&[("NODE_ENV", "development"), ("SERVE_STATIC", "1")]).unwrap();
            assert!(s.server_config().serve_static);
        }

        #[test]
        fn blank_api_key_counts_as_missing() {
            let s = settings(&[("OPENAI_API_KEY", "   ")]).unwrap();
            assert!(s.require_openai_api_key().is_err());

            let s = settings(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
            assert_eq!(s.require_openai_api_key().unwrap(), "sk-test");
        }

        #[test]
        fn rejects_invalid_port_and_flags() {
            assert!(settings(&[("PORT", "http")]).is_err());
            assert!(settings(&[("SERVE_STATIC", "maybe")]).is_err());
            assert!(settings(&[("OPENAI_TIMEOUT_SECS", "-1")]).is_err());
        }

        #[test]
        fn reads_port() {
            assert_eq!(settings(&[("PORT", "8080")]).unwrap().port, 8080);
        }
    }
}
