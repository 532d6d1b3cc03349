use std::env;

use crate::i18n::Language;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: Option<String>,
    pub default_language: Language,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());
        let default_language = match env::var("DEFAULT_LANGUAGE") {
            Ok(lang) => lang.parse::<Language>().map_err(anyhow::Error::msg)?,
            Err(_) => Language::En,
        };
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            default_language,
        })
    }
}
