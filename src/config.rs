use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub url: String,
    pub schema: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db: DbConfig,
    /// Argon2 time cost (iterations). 0 means "use the library default".
    pub argon2_time_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let db = DbConfig {
            url: std::env::var("DATABASE_URL")?,
            schema: std::env::var("DB_SCHEMA").unwrap_or_else(|_| "public".into()),
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            min_connections: std::env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(0),
            acquire_timeout_secs: std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5),
            max_lifetime_secs: std::env::var("DB_MAX_LIFETIME_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(1800),
        };
        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            db,
            argon2_time_cost: std::env::var("ARGON2_TIME_COST")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(0),
        })
    }
}
