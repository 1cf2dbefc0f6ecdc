use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub identity_base_url: String,
    pub team_save_quiet_millis: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("Invalid PORT"),
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:9999".to_string()),
            team_save_quiet_millis: env::var("TEAM_SAVE_QUIET_MILLIS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .expect("Invalid TEAM_SAVE_QUIET_MILLIS"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
