use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub directory_path: PathBuf,
    /// Base URL that relative brand logo paths (e.g. `/imgs/...`) resolve against.
    pub asset_base_url: String,
    /// Recipient for partnership/distribution inquiries and the map fallback notice.
    pub contact_email: String,
    pub asset_timeout_secs: u64,
    pub user_agent: String,
    pub rate_limit_per_minute: usize,
}
