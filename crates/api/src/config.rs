/// Default land-registry backend base URL.
const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
/// Default reverse-geocoding endpoint (OpenCage compatible).
const DEFAULT_GEOCODER_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the land-registry backend.
    pub backend_url: String,
    /// Reverse-geocoding endpoint.
    pub geocoder_url: String,
    /// Reverse-geocoding API key. Geocoding is disabled without one.
    pub geocoder_api_key: Option<String>,
    /// Mark the session cookie `Secure` (default: `false`).
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                          |
    /// |------------------------|--------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                        |
    /// | `PORT`                 | `3000`                                           |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                             |
    /// | `BACKEND_URL`          | `http://localhost:8080`                          |
    /// | `GEOCODER_URL`         | `https://api.opencagedata.com/geocode/v1/json`   |
    /// | `GEOCODER_API_KEY`     | unset                                            |
    /// | `COOKIE_SECURE`        | `false`                                          |
    ///
    /// # Panics
    ///
    /// Panics if a numeric or boolean variable cannot be parsed.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend_url =
            std::env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.into());

        let geocoder_url =
            std::env::var("GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.into());

        let geocoder_api_key = std::env::var("GEOCODER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let cookie_secure: bool = std::env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("COOKIE_SECURE must be true or false");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            backend_url,
            geocoder_url,
            geocoder_api_key,
            cookie_secure,
        }
    }
}
