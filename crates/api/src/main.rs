use clap::Parser;
use finplan_core::config::Settings;
use finplan_core::llm::openai::OpenAiClient;
use finplan_core::llm::LlmClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod error;
mod routes;
mod static_files;

#[derive(Debug, Parser)]
#[command(name = "finplan_api")]
struct Args {
    /// Listen port. Overrides PORT.
    #[arg(long)]
    port: Option<u16>,

    /// Serve the built frontend bundle (true/false). Overrides NODE_ENV and SERVE_STATIC.
    #[arg(long)]
    serve_static: Option<bool>,

    /// Directory holding the built frontend bundle. Overrides STATIC_ROOT.
    #[arg(long)]
    static_root: Option<PathBuf>,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(serve_static) = self.serve_static {
            settings.serve_static = Some(serve_static);
        }
        if let Some(static_root) = self.static_root {
            settings.static_root = static_root;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut settings = Settings::from_env()?;
    args.apply(&mut settings);
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let llm: Option<Arc<dyn LlmClient>> = if settings.openai_api_key.is_some() {
        Some(Arc::new(OpenAiClient::from_settings(&settings)?))
    } else {
        tracing::warn!("OPENAI_API_KEY missing; chat and recommendations will answer 400");
        None
    };

    let server_config = settings.server_config();
    if server_config.serve_static {
        tracing::info!(
            static_root = %server_config.static_root.display(),
            "serving frontend bundle"
        );
    }

    let app = app::router(app::AppState::new(llm), &server_config);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_environment() {
        let mut settings = Settings::from_lookup(|key| match key {
            "PORT" => Some("5000".to_string()),
            "NODE_ENV" => Some("production".to_string()),
            _ => None,
        })
        .unwrap();

        let args = Args::parse_from([
            "finplan_api",
            "--port",
            "8081",
            "--serve-static",
            "false",
            "--static-root",
            "build",
        ]);
        args.apply(&mut settings);

        assert_eq!(settings.port, 8081);
        let cfg = settings.server_config();
        assert!(!cfg.serve_static);
        assert_eq!(cfg.static_root, PathBuf::from("build"));
    }

    #[test]
    fn no_flags_keep_environment() {
        let mut settings = Settings::from_lookup(|_| None).unwrap();
        Args::parse_from(["finplan_api"]).apply(&mut settings);
        assert_eq!(settings.port, 5000);
        assert!(!settings.server_config().serve_static);
    }
}
