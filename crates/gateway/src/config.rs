//! Configuration for the task gateway.

use std::env;

/// Gateway configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,
    /// Base URL of the hosted Supabase project.
    pub supabase_url: String,
    /// Service key, sent as both `apikey` and bearer token.
    pub supabase_key: String,
    /// Outbound request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            supabase_url: env::var("SUPABASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "http://localhost:54321".to_string()),
            supabase_key: env::var("SUPABASE_KEY").unwrap_or_default(),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}
