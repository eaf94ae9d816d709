/// Runtime configuration, read from the environment at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP listener binds to
    pub port: u16,
    /// Base URL used when formatting join links
    pub base_url: String,
}

const DEFAULT_PORT: u16 = 3001;

impl AppConfig {
    /// Loads configuration from `PORT` and `BASE_URL` environment variables
    pub fn from_env() -> Self {
        Self::from_vars(std::env::var("PORT").ok(), std::env::var("BASE_URL").ok())
    }

    fn from_vars(port: Option<String>, base_url: Option<String>) -> Self {
        let port = port
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let base_url = base_url.unwrap_or_else(|| format!("http://localhost:{}", port));
        Self { port, base_url }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_vars(None, None)
    }
}
