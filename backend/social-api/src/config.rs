//! Configuration management
//!
//! All settings come from environment variables with development defaults;
//! production deployments must provide their own signing secret.

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

/// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Session-token configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Process-wide signing secret, loaded once at startup.
    pub token_secret: String,
    /// Session token lifetime in seconds.
    pub token_ttl_secs: i64,
}

const DEV_TOKEN_SECRET: &str = "dev-only-signing-secret-change-me";
const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let is_production = app_env.eq_ignore_ascii_case("production");

        let token_secret = match std::env::var("TOKEN_SECRET") {
            Ok(value) if !value.trim().is_empty() => value,
            _ if is_production => {
                return Err("TOKEN_SECRET must be set in production".to_string());
            }
            _ => DEV_TOKEN_SECRET.to_string(),
        };

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("SOCIAL_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("SOCIAL_API_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if is_production => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if is_production && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/social".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            auth: AuthConfig {
                token_secret,
                token_ttl_secs: std::env::var("TOKEN_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TOKEN_TTL_SECS),
            },
        })
    }
}
