use std::env;

#[derive(Clone)]
pub struct Config {
    pub bind_addr: String,
    pub oracle_timeout_ms: u64,
    pub oracle_low_score_rate: f64,
    pub auth_public_key_hex: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            oracle_timeout_ms: env::var("ORACLE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            oracle_low_score_rate: env::var("ORACLE_LOW_SCORE_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.2),
            auth_public_key_hex: env::var("AUTH_PUBLIC_KEY").ok(),
        }
    }
}
