// # huntd - Hunt Web Daemon
//
// The huntd daemon is a THIN integration layer:
// 1. Reading configuration from environment variables
// 2. Initializing tracing and the runtime
// 3. Registering store backends
// 4. Serving the HTTP routes
//
// All resolution logic lives in hunt-core; all Notion specifics live in
// hunt-store-notion. Configuration is via environment variables only.
//
// ## Configuration
//
// ### Store
// - `HUNT_NOTION_TOKEN`: Notion integration token
// - `HUNT_TEAMS_DB_ID`: Database id of the team collection
// - `HUNT_CHALLENGES_DB_ID`: Database id of the challenge collection
//
// ### Resolver
// - `HUNT_PUBLIC_BASE_URL`: Base URL challenge locators are built on
//   (must end with '/')
// - `HUNT_SCAN_PAGE_LIMIT`: Page cap for team scans (default 100)
//
// ### Server
// - `HUNT_LISTEN_ADDR`: Listen address (default 0.0.0.0:8080)
// - `HUNT_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// ## Example
//
// ```bash
// export HUNT_NOTION_TOKEN=secret_abc123
// export HUNT_TEAMS_DB_ID=0123456789abcdef0123456789abcdef
// export HUNT_CHALLENGES_DB_ID=fedcba9876543210fedcba9876543210
// export HUNT_PUBLIC_BASE_URL=https://example-hunt.notion.site/
//
// huntd
// ```

mod pages;
mod server;

use anyhow::Result;
use hunt_core::{ChallengeResolver, HuntConfig, ResolverConfig, StoreConfig, StoreRegistry};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum HuntExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<HuntExitCode> for ExitCode {
    fn from(code: HuntExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    notion_token: String,
    teams_db_id: String,
    challenges_db_id: String,
    public_base_url: String,
    scan_page_limit: u32,
    listen_addr: String,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            notion_token: env::var("HUNT_NOTION_TOKEN").unwrap_or_default(),
            teams_db_id: env::var("HUNT_TEAMS_DB_ID").unwrap_or_default(),
            challenges_db_id: env::var("HUNT_CHALLENGES_DB_ID").unwrap_or_default(),
            public_base_url: env::var("HUNT_PUBLIC_BASE_URL").unwrap_or_default(),
            scan_page_limit: env::var("HUNT_SCAN_PAGE_LIMIT")
                .ok()
                .map(|s| s.parse().unwrap_or(100))
                .unwrap_or(100),
            listen_addr: env::var("HUNT_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            log_level: env::var("HUNT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    ///
    /// Checks required fields, value formats, and numeric ranges, with
    /// actionable error messages.
    fn validate(&self) -> Result<()> {
        if self.notion_token.is_empty() {
            anyhow::bail!(
                "HUNT_NOTION_TOKEN is required. \
                Set it via: export HUNT_NOTION_TOKEN=your_token"
            );
        }

        // Check for obvious placeholder tokens (common mistake)
        let token_lower = self.notion_token.to_lowercase();
        if token_lower.contains("your_token")
            || token_lower.contains("replace_me")
            || token_lower.contains("example")
            || token_lower == "token"
        {
            anyhow::bail!(
                "HUNT_NOTION_TOKEN appears to be a placeholder. \
                Use an actual integration token from Notion."
            );
        }

        if self.teams_db_id.is_empty() {
            anyhow::bail!(
                "HUNT_TEAMS_DB_ID is required. \
                Set it via: export HUNT_TEAMS_DB_ID=your_teams_database_id"
            );
        }

        if self.challenges_db_id.is_empty() {
            anyhow::bail!(
                "HUNT_CHALLENGES_DB_ID is required. \
                Set it via: export HUNT_CHALLENGES_DB_ID=your_challenges_database_id"
            );
        }

        if self.public_base_url.is_empty() {
            anyhow::bail!(
                "HUNT_PUBLIC_BASE_URL is required. \
                Set it via: export HUNT_PUBLIC_BASE_URL=https://your-site.notion.site/"
            );
        }

        if !self.public_base_url.starts_with("https://")
            && !self.public_base_url.starts_with("http://")
        {
            anyhow::bail!(
                "HUNT_PUBLIC_BASE_URL must use HTTP or HTTPS scheme. Got: {}",
                self.public_base_url
            );
        }

        if !self.public_base_url.ends_with('/') {
            anyhow::bail!(
                "HUNT_PUBLIC_BASE_URL must end with '/' (the challenge id is appended \
                directly). Got: {}",
                self.public_base_url
            );
        }

        if !(1..=100).contains(&self.scan_page_limit) {
            anyhow::bail!(
                "HUNT_SCAN_PAGE_LIMIT must be between 1 and 100. Got: {}",
                self.scan_page_limit
            );
        }

        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            anyhow::bail!(
                "HUNT_LISTEN_ADDR is not a valid socket address. Got: {}",
                self.listen_addr
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "HUNT_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return HuntExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return HuntExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return HuntExitCode::ConfigError.into();
    }

    info!("Starting huntd daemon");

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return HuntExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            error!("Daemon error: {}", e);
            HuntExitCode::RuntimeError
        } else {
            HuntExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the daemon
async fn run_daemon(config: Config) -> Result<()> {
    // Register built-in store backends
    let registry = StoreRegistry::new();
    hunt_store_notion::register(&registry);
    info!("Registered store backends: {:?}", registry.registered_stores());

    // Build the store and the resolver from config
    let hunt_config = HuntConfig {
        store: StoreConfig::Notion {
            api_token: config.notion_token.clone(),
        },
        resolver: ResolverConfig::new(
            &config.teams_db_id,
            &config.challenges_db_id,
            &config.public_base_url,
        )
        .with_scan_page_limit(config.scan_page_limit),
    };
    hunt_config.validate()?;

    let store = registry.create_store(&hunt_config.store)?;
    let resolver = ChallengeResolver::new(Arc::from(store), hunt_config.resolver)?;

    info!("Team collection: {}", config.teams_db_id);
    info!("Challenge collection: {}", config.challenges_db_id);

    server::serve(resolver, &config.listen_addr).await
}
