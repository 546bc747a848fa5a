use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Defaults, overridden by `TRIVIA_*` variables (a `.env` file is read first).
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_env(Environment::with_prefix("TRIVIA").try_parsing(true))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("database_url", "sqlite:trivia.db")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
