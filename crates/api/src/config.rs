/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Load the reference zones at startup (default: `true`).
    pub seed_zones: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            cors_origins: vec!["http://localhost:5173".into()],
            request_timeout_secs: 30,
            seed_zones: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SEED_ZONES`           | `true`                     |
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);

        let port: u16 = std::env::var("PORT")
            .map(|v| v.parse().expect("PORT must be a valid u16"))
            .unwrap_or(defaults.port);

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or(defaults.cors_origins);

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .map(|v| v.parse().expect("REQUEST_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(defaults.request_timeout_secs);

        let seed_zones = std::env::var("SEED_ZONES")
            .map(|v| parse_bool(&v).expect("SEED_ZONES must be true or false"))
            .unwrap_or(defaults.seed_zones);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            seed_zones,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
