use catalog_core::lang::Lang;

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
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Language used when a request names none (default: `en`).
    pub default_lang: Lang,
    /// Externally visible origin used to build pagination links.
    pub public_base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `DEFAULT_LANG`         | `en`                       |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:{PORT}`  |
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

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let default_lang: Lang = std::env::var("DEFAULT_LANG")
            .unwrap_or_else(|_| "en".into())
            .parse()
            .unwrap_or_else(|e| panic!("DEFAULT_LANG must be a supported language: {e}"));

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            default_lang,
            public_base_url,
        }
    }

    /// Absolute URL of an `/api/v1` route, for HATEOAS links.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.public_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 3000,
            cors_origins: vec![],
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
            default_lang: Lang::En,
            public_base_url: base.into(),
        }
    }

    #[test]
    fn api_url_joins_base_and_path() {
        let cfg = config("https://shop.example.com");
        assert_eq!(
            cfg.api_url("/admin/products"),
            "https://shop.example.com/api/v1/admin/products"
        );
    }
}
