//! Inquiry Relay
//!
//! Contact form backend for an architecture studio:
//! - Inquiry validation with per-field messages
//! - Per-client sliding window rate limiting
//! - Honeypot spam suppression
//! - SMTP relay of accepted inquiries to the studio inbox

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

use api::{middleware::rate_limit::RateLimitConfig, router, AppState};
use mailer::{LogTransport, MailConfig, MailTransport, SmtpTransport, TransportKind};
use relay_core::limits::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS};
use telemetry::{health, init_tracing_from_env};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    #[serde(default)]
    rate_limit: RateLimitSettings,

    #[serde(default)]
    mail: MailConfig,
}

/// Rate limit settings as they appear in configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct RateLimitSettings {
    #[serde(default = "default_max_requests")]
    max_requests: usize,
    #[serde(default = "default_window_secs")]
    window_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_requests() -> usize {
    RATE_LIMIT_MAX_REQUESTS
}

fn default_window_secs() -> u64 {
    RATE_LIMIT_WINDOW_SECS
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

impl From<&RateLimitSettings> for RateLimitConfig {
    fn from(settings: &RateLimitSettings) -> Self {
        Self {
            max_requests: settings.max_requests,
            window: Duration::from_secs(settings.window_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            rate_limit: RateLimitSettings::default(),
            mail: MailConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting Inquiry Relay v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    info!(
        transport = ?config.mail.transport,
        smtp_host = %config.mail.smtp_host,
        smtp_port = config.mail.smtp_port,
        username = config.mail.username.as_deref().unwrap_or("none"),
        "Loaded mail config"
    );

    let route = config.mail.route().context("Invalid mail configuration")?;
    let transport = build_transport(&config.mail)?;

    // A failed check leaves the service up; /health/ready reports it.
    check_health(transport.as_ref()).await;

    let rate_config = RateLimitConfig::from(&config.rate_limit);
    info!(
        max_requests = rate_config.max_requests,
        window_secs = config.rate_limit.window_secs,
        "Rate limiting enabled"
    );

    let state = AppState::with_rate_limit(transport, route, rate_config);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("RELAY")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Conventional mail variables take precedence over RELAY__MAIL__*
    if let Ok(user) = std::env::var("EMAIL_USER") {
        config.mail.username = Some(user);
    }
    if let Ok(password) = std::env::var("EMAIL_PASSWORD") {
        config.mail.password = Some(password);
    }
    if let Ok(destination) = std::env::var("ARCHITECT_EMAIL") {
        config.mail.destination = Some(destination);
    }
    if let Ok(host) = std::env::var("SMTP_HOST") {
        config.mail.smtp_host = host;
    }
    if let Ok(port) = std::env::var("SMTP_PORT") {
        config.mail.smtp_port = port
            .trim()
            .parse()
            .with_context(|| format!("Invalid SMTP_PORT: {}", port))?;
    }

    Ok(config)
}

/// Build the configured mail transport.
fn build_transport(config: &MailConfig) -> Result<Arc<dyn MailTransport>> {
    match config.transport {
        TransportKind::Smtp => {
            let smtp = SmtpTransport::new(config).context("Failed to create SMTP transport")?;
            Ok(Arc::new(smtp))
        }
        TransportKind::Log => {
            warn!("Mail transport is 'log'; inquiries will not be delivered");
            Ok(Arc::new(LogTransport::new()))
        }
    }
}

/// Check mail transport health on startup.
async fn check_health(transport: &dyn MailTransport) {
    if mailer::health::check_connection(transport).await {
        health().mail.set_healthy();
        info!("Mail transport ({}): healthy", transport.name());
    } else {
        health().mail.set_unhealthy("Connection failed");
        error!("Mail transport ({}): unhealthy", transport.name());
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
