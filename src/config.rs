use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    /// Proximity warning threshold in meters.
    pub warn_threshold_m: f64,

    // Rate limiting
    pub rate_checkin_per_min: u32,
    pub rate_read_per_min: u32,

    pub api_prefix: String,
}

/// Parse an optional env value, falling back to the default when the
/// variable is unset or malformed.
fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            warn_threshold_m: parse_or(env::var("WARN_THRESHOLD_M").ok(), 500.0), // default 500 m

            rate_checkin_per_min: parse_or(env::var("RATE_CHECKIN_PER_MIN").ok(), 60),
            rate_read_per_min: parse_or(env::var("RATE_READ_PER_MIN").ok(), 600),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_value_parses() {
        assert_eq!(parse_or(Some("750".to_string()), 500.0), 750.0);
        assert_eq!(parse_or(Some("30".to_string()), 60u32), 30);
    }

    #[test]
    fn missing_value_uses_default() {
        assert_eq!(parse_or(None, 500.0), 500.0);
    }

    #[test]
    fn malformed_value_falls_back_to_default() {
        assert_eq!(parse_or(Some("five hundred".to_string()), 500.0), 500.0);
        assert_eq!(parse_or(Some("".to_string()), 60u32), 60);
    }
}
