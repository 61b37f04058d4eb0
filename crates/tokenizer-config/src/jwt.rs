use std::env;

use chrono::{DateTime, Duration, Utc};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";
const DEFAULT_ACCESS_EXPIRY: i64 = 600; // 10 minutes
const DEFAULT_REFRESH_EXPIRY: i64 = 86400; // 24 hours

/// Token secret and lifetimes.
///
/// `secret` is the raw, un-encoded secret. Lifetimes are in seconds.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    /// Reads `JWT_SECRET`, `JWT_ACCESS_EXPIRY` and `JWT_REFRESH_EXPIRY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            secret: lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_SECRET.to_string()),
            access_token_expiry: lookup("JWT_ACCESS_EXPIRY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ACCESS_EXPIRY),
            refresh_token_expiry: lookup("JWT_REFRESH_EXPIRY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_REFRESH_EXPIRY),
        }
    }

    /// Expiration instant for an access token issued at `now`.
    ///
    /// Returns `None` if the lifetime does not fit in a timestamp.
    pub fn access_expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        expires_after(now, self.access_token_expiry)
    }

    /// Expiration instant for a refresh token issued at `now`.
    ///
    /// Returns `None` if the lifetime does not fit in a timestamp.
    pub fn refresh_expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        expires_after(now, self.refresh_token_expiry)
    }
}

/// `now` plus `seconds`, or `None` on overflow.
pub fn expires_after(now: DateTime<Utc>, seconds: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(seconds).and_then(|ttl| now.checked_add_signed(ttl))
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> JwtConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        JwtConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = lookup_from(&[]);
        assert_eq!(config.secret, DEFAULT_SECRET);
        assert_eq!(config.access_token_expiry, 600);
        assert_eq!(config.refresh_token_expiry, 86400);
    }

    #[test]
    fn test_values_from_environment() {
        let config = lookup_from(&[
            ("JWT_SECRET", "LeeJaehyeok637637123231231231123"),
            ("JWT_ACCESS_EXPIRY", "60"),
            ("JWT_REFRESH_EXPIRY", "3600"),
        ]);
        assert_eq!(config.secret, "LeeJaehyeok637637123231231231123");
        assert_eq!(config.access_token_expiry, 60);
        assert_eq!(config.refresh_token_expiry, 3600);
    }

    #[test]
    fn test_unparseable_expiry_falls_back() {
        let config = lookup_from(&[("JWT_ACCESS_EXPIRY", "ten minutes")]);
        assert_eq!(config.access_token_expiry, DEFAULT_ACCESS_EXPIRY);
    }

    #[test]
    fn test_expiration_instants() {
        let config = lookup_from(&[]);
        let now = Utc::now();
        assert_eq!(
            config.access_expires_at(now),
            Some(now + Duration::minutes(10))
        );
        assert_eq!(
            config.refresh_expires_at(now),
            Some(now + Duration::hours(24))
        );
    }

    #[test]
    fn test_huge_expiry_does_not_overflow() {
        let max = i64::MAX.to_string();
        let config = lookup_from(&[
            ("JWT_ACCESS_EXPIRY", max.as_str()),
            ("JWT_REFRESH_EXPIRY", "9000000000000000"),
        ]);
        let now = Utc::now();
        assert_eq!(config.access_expires_at(now), None);
        assert_eq!(config.refresh_expires_at(now), None);
    }

    #[test]
    fn test_expires_after_negative_seconds() {
        let now = Utc::now();
        assert_eq!(expires_after(now, -60), Some(now - Duration::seconds(60)));
        assert_eq!(expires_after(now, i64::MIN), None);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = lookup_from(&[("JWT_SECRET", "super-secret-value")]);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("<redacted>"));
    }
}
