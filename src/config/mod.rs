use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub graphql_url: String,
    pub graphql_timeout_secs: u64,
    pub graphql_service_token: Option<String>,
    pub hotel_id: Option<String>,
    pub session_secret: String,
    pub session_cookie: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub static_dir: String,
    pub booking_poll_interval_secs: u64,
    pub booking_poll_auto_refresh: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            graphql_url: env::var("GRAPHQL_URL")?,
            graphql_timeout_secs: env::var("GRAPHQL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap_or(15),
            graphql_service_token: optional_var("GRAPHQL_SERVICE_TOKEN"),
            hotel_id: optional_var("HOTEL_ID"),
            session_secret: env::var("SESSION_SECRET")?,
            session_cookie: env::var("SESSION_COOKIE")
                .unwrap_or_else(|_| "session_token".to_string()),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "./public".to_string()),
            booking_poll_interval_secs: env::var("BOOKING_POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            booking_poll_auto_refresh: env::var("BOOKING_POLL_AUTO_REFRESH")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// Resolve the hotel to operate on: an explicit request value wins over the default.
    pub fn resolve_hotel_id(&self, requested: Option<&str>) -> Option<String> {
        requested
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.hotel_id.clone())
    }
}

/// Read an env var, treating unset and blank values alike.
fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_hotel(hotel_id: Option<&str>) -> AppConfig {
        AppConfig {
            graphql_url: "http://localhost:4000/graphql".to_string(),
            graphql_timeout_secs: 15,
            graphql_service_token: None,
            hotel_id: hotel_id.map(str::to_string),
            session_secret: "secret".to_string(),
            session_cookie: "session_token".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            frontend_url: "http://localhost:3000".to_string(),
            static_dir: "./public".to_string(),
            booking_poll_interval_secs: 30,
            booking_poll_auto_refresh: false,
        }
    }

    #[test]
    fn requested_hotel_overrides_default() {
        let config = config_with_hotel(Some("default-hotel"));
        assert_eq!(
            config.resolve_hotel_id(Some("other")).as_deref(),
            Some("other")
        );
    }

    #[test]
    fn blank_request_falls_back_to_default() {
        let config = config_with_hotel(Some("default-hotel"));
        assert_eq!(
            config.resolve_hotel_id(Some("  ")).as_deref(),
            Some("default-hotel")
        );
        assert_eq!(
            config.resolve_hotel_id(None).as_deref(),
            Some("default-hotel")
        );
    }

    #[test]
    fn no_hotel_anywhere() {
        let config = config_with_hotel(None);
        assert!(config.resolve_hotel_id(None).is_none());
    }
}
