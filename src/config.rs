use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        serper_api_key: env::var("SERPER_API_KEY").ok(),
        cache_file: get_env_or_default("CACHE_FILE", "data/connection_cache.json"),
        cache_ttl_hours: get_env_or_default("CACHE_TTL_HOURS", "24")
            .parse()
            .unwrap_or(24),
        primary_institution: get_env_or_default("PRIMARY_INSTITUTION", "IIT Hyderabad"),
        peer_institution_keyword: get_env_or_default("PEER_INSTITUTION_KEYWORD", "IIT"),
    }
});

pub struct Config {
    /// Absent key is not fatal, searches just come back empty.
    pub serper_api_key: Option<String>,
    pub cache_file: String,
    pub cache_ttl_hours: i64,
    pub primary_institution: String,
    pub peer_institution_keyword: String,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
