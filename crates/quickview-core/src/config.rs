use crate::app_config::{AppConfig, CartEncoding, Environment};
use crate::money::DEFAULT_MONEY_FORMAT;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got \"{other}\""),
            }),
        }
    };

    let store_url = require("QUICKVIEW_STORE_URL")?;
    let env = parse_environment(&or_default("QUICKVIEW_ENV", "development"))?;
    let log_level = or_default("QUICKVIEW_LOG_LEVEL", "info");

    let money_format = or_default("QUICKVIEW_MONEY_FORMAT", DEFAULT_MONEY_FORMAT);
    let image_size = or_default("QUICKVIEW_IMAGE_SIZE", "600x");

    let close_delay_ms = parse_u64("QUICKVIEW_CLOSE_DELAY_MS", "200")?;
    let notification_visible_ms = parse_u64("QUICKVIEW_NOTIFICATION_VISIBLE_MS", "3000")?;
    let notification_fade_ms = parse_u64("QUICKVIEW_NOTIFICATION_FADE_MS", "300")?;
    let notification_title_max_chars =
        parse_usize("QUICKVIEW_NOTIFICATION_TITLE_MAX_CHARS", "20")?;
    let cart_notifications = parse_bool("QUICKVIEW_CART_NOTIFICATIONS", "false")?;
    let cart_encoding = parse_cart_encoding(&or_default("QUICKVIEW_CART_ENCODING", "form"))?;

    let request_timeout_secs = parse_u64("QUICKVIEW_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default(
        "QUICKVIEW_USER_AGENT",
        "quickview/0.1 (storefront-quick-view)",
    );
    let max_retries = parse_u32("QUICKVIEW_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("QUICKVIEW_RETRY_BACKOFF_BASE_MS", "250")?;

    Ok(AppConfig {
        store_url,
        env,
        log_level,
        money_format,
        image_size,
        close_delay_ms,
        notification_visible_ms,
        notification_fade_ms,
        notification_title_max_chars,
        cart_notifications,
        cart_encoding,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "QUICKVIEW_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_cart_encoding(s: &str) -> Result<CartEncoding, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "form" => Ok(CartEncoding::Form),
        "json" => Ok(CartEncoding::Json),
        other => Err(ConfigError::InvalidEnvVar {
            var: "QUICKVIEW_CART_ENCODING".to_string(),
            reason: format!("expected \"form\" or \"json\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("QUICKVIEW_STORE_URL", "https://shop.example.com");
        m
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(
            parse_environment("development").unwrap(),
            Environment::Development
        );
        assert_eq!(parse_environment("test").unwrap(), Environment::Test);
        assert_eq!(
            parse_environment("production").unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn build_app_config_fails_without_store_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "QUICKVIEW_STORE_URL"),
            "expected MissingEnvVar(QUICKVIEW_STORE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_treats_blank_store_url_as_missing() {
        let mut map = HashMap::new();
        map.insert("QUICKVIEW_STORE_URL", "   ");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.store_url, "https://shop.example.com");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.money_format, "${{amount}}");
        assert_eq!(cfg.image_size, "600x");
        assert_eq!(cfg.close_delay_ms, 200);
        assert_eq!(cfg.notification_visible_ms, 3000);
        assert_eq!(cfg.notification_fade_ms, 300);
        assert_eq!(cfg.notification_title_max_chars, 20);
        assert!(!cfg.cart_notifications);
        assert_eq!(cfg.cart_encoding, CartEncoding::Form);
        assert_eq!(cfg.request_timeout_secs, 15);
        assert_eq!(cfg.user_agent, "quickview/0.1 (storefront-quick-view)");
        assert_eq!(cfg.max_retries, 2);
        assert_eq!(cfg.retry_backoff_base_ms, 250);
    }

    #[test]
    fn build_app_config_rejects_unknown_environment() {
        let mut map = full_env();
        map.insert("QUICKVIEW_ENV", "staging");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUICKVIEW_ENV"),
            "expected InvalidEnvVar(QUICKVIEW_ENV), got: {result:?}"
        );
    }

    #[test]
    fn cart_notifications_accepts_common_truthy_values() {
        for raw in ["1", "true", "TRUE", "yes", "on"] {
            let mut map = full_env();
            map.insert("QUICKVIEW_CART_NOTIFICATIONS", raw);
            let cfg = build_app_config(lookup_from_map(&map)).unwrap();
            assert!(cfg.cart_notifications, "expected {raw:?} to enable notifications");
        }
    }

    #[test]
    fn cart_notifications_invalid() {
        let mut map = full_env();
        map.insert("QUICKVIEW_CART_NOTIFICATIONS", "sometimes");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUICKVIEW_CART_NOTIFICATIONS"),
            "expected InvalidEnvVar(QUICKVIEW_CART_NOTIFICATIONS), got: {result:?}"
        );
    }

    #[test]
    fn cart_encoding_override() {
        let mut map = full_env();
        map.insert("QUICKVIEW_CART_ENCODING", "JSON");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.cart_encoding, CartEncoding::Json);
    }

    #[test]
    fn cart_encoding_invalid() {
        let mut map = full_env();
        map.insert("QUICKVIEW_CART_ENCODING", "xml");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUICKVIEW_CART_ENCODING"),
            "expected InvalidEnvVar(QUICKVIEW_CART_ENCODING), got: {result:?}"
        );
    }

    #[test]
    fn close_delay_ms_override() {
        let mut map = full_env();
        map.insert("QUICKVIEW_CLOSE_DELAY_MS", "350");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.close_delay_ms, 350);
    }

    #[test]
    fn close_delay_ms_invalid() {
        let mut map = full_env();
        map.insert("QUICKVIEW_CLOSE_DELAY_MS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUICKVIEW_CLOSE_DELAY_MS"),
            "expected InvalidEnvVar(QUICKVIEW_CLOSE_DELAY_MS), got: {result:?}"
        );
    }

    #[test]
    fn max_retries_invalid() {
        let mut map = full_env();
        map.insert("QUICKVIEW_MAX_RETRIES", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUICKVIEW_MAX_RETRIES"),
            "expected InvalidEnvVar(QUICKVIEW_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn money_format_override() {
        let mut map = full_env();
        map.insert("QUICKVIEW_MONEY_FORMAT", "{{amount_with_comma_separator}} EUR");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.money_format, "{{amount_with_comma_separator}} EUR");
    }
}
