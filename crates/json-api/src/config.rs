//! Server configuration module

use clap::Parser;
use ribbon_app::authority::DEFAULT_API_VERSION;
use salvo::http::header::{HeaderName, InvalidHeaderName};

/// Ribbon JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "ribbon-json", about = "Ribbon JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8697")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// `PostgreSQL` connection string for the session store
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Admin API version to address on the authority
    #[arg(long, env = "AUTHORITY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub authority_api_version: String,

    /// Header carrying the gateway-verified shop domain, for deployments
    /// that terminate the signed proxy handshake upstream
    #[arg(long, env = "VERIFIED_SHOP_HEADER")]
    pub verified_shop_header: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse the configured verified-shop header name, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a valid header name.
    pub fn verified_shop_header_name(&self) -> Result<Option<HeaderName>, InvalidHeaderName> {
        self.verified_shop_header
            .as_deref()
            .map(HeaderName::try_from)
            .transpose()
    }
}
