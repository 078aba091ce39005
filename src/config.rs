use crate::error::AppError;
use std::env;

/// Upper bound for `JWT_EXPIRATION_HOURS`: one year.
const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

/// Runtime settings read once at startup.
///
/// The JWT secret lives here and is handed to `TokenService::new`; nothing else
/// reads it from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. `None` selects the in-memory repositories.
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub seed_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            server_port: parse_var("SERVER_PORT", 8080)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .ok()
                .filter(|secret| !secret.is_empty())
                .ok_or_else(|| AppError::Configuration("JWT_SECRET must be set".into()))?,
            jwt_expiration_hours: expiration_hours()?,
            seed_data: parse_var("SEED_DATA", true)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn expiration_hours() -> Result<i64, AppError> {
    let hours = parse_var("JWT_EXPIRATION_HOURS", 24)?;
    if !(1..=MAX_EXPIRATION_HOURS).contains(&hours) {
        return Err(AppError::Configuration(format!(
            "JWT_EXPIRATION_HOURS must be between 1 and {}, got {}",
            MAX_EXPIRATION_HOURS, hours
        )));
    }
    Ok(hours)
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} has an invalid value: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // All environment manipulation lives in one test; the process environment is shared
    // between test threads.
    #[test]
    fn test_config_from_env() {
        env::remove_var("DATABASE_URL");
        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");
        env::remove_var("JWT_EXPIRATION_HOURS");
        env::remove_var("SEED_DATA");
        env::remove_var("JWT_SECRET");

        assert!(matches!(
            Config::from_env(),
            Err(AppError::Configuration(_))
        ));

        env::set_var("JWT_SECRET", "test-secret");
        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.jwt_expiration_hours, 24);
        assert!(config.seed_data);

        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("SERVER_PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("SEED_DATA", "false");

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://test"));
        assert_eq!(config.server_url(), "http://0.0.0.0:3000");
        assert!(!config.seed_data);

        env::set_var("SERVER_PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(AppError::Configuration(_))
        ));
        env::remove_var("SERVER_PORT");

        for hours in ["0", "-5", "9999999999999"] {
            env::set_var("JWT_EXPIRATION_HOURS", hours);
            assert!(
                matches!(Config::from_env(), Err(AppError::Configuration(_))),
                "JWT_EXPIRATION_HOURS={}",
                hours
            );
        }
        env::set_var("JWT_EXPIRATION_HOURS", "8760");
        assert_eq!(Config::from_env().unwrap().jwt_expiration_hours, 8760);
        env::remove_var("JWT_EXPIRATION_HOURS");

        env::remove_var("DATABASE_URL");
        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");
        env::remove_var("SEED_DATA");
        env::remove_var("JWT_SECRET");
    }
}
