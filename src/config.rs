use std::env;

/// Controls how the per-request base URL is derived. In production the
/// inbound request's host decides; locally the configured port does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Local,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub mode: Mode,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);
        let mode = match env::var("APP_MODE").as_deref() {
            Ok("production") => Mode::Production,
            _ => Mode::Local,
        };
        Self { port, mode }
    }

    pub fn local_base_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}
