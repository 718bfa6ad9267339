use std::collections::HashMap;
use std::sync::Mutex;
use time::{OffsetDateTime, Duration};
use tracing::{warn, error};
use crate::error::ApiError;

#[derive(Debug)]
struct Window {
    attempts: u32,
    opened_at: OffsetDateTime,
}

/// Fixed-window attempt counter keyed by caller.
#[derive(Debug)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
    max_attempts: u32,
    window: Duration,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(5, 15)
    }
}

impl RateLimiter {
    pub fn new(max_attempts: u32, window_minutes: i64) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_attempts,
            window: Duration::minutes(window_minutes),
        }
    }

    pub fn check_rate_limit(&self, key: &str) -> Result<(), ApiError> {
        self.check_at(key, OffsetDateTime::now_utc())
    }

    fn check_at(&self, key: &str, now: OffsetDateTime) -> Result<(), ApiError> {
        let mut windows = self.windows.lock().map_err(|e| {
            error!("Failed to acquire rate limit lock: {}", e);
            ApiError::Internal("rate limiter lock poisoned".into())
        })?;

        windows.retain(|_, w| now - w.opened_at <= self.window * 2);

        let window = windows.entry(key.to_string()).or_insert(Window { attempts: 0, opened_at: now });
        if now - window.opened_at > self.window {
            *window = Window { attempts: 0, opened_at: now };
        }

        if window.attempts >= self.max_attempts {
            let minutes_to_wait = (window.opened_at + self.window - now).whole_minutes().max(1);
            warn!(key, minutes_to_wait, "Rate limit triggered");
            return Err(ApiError::RateLimited(format!(
                "Rate limit exceeded. Please try again in {} minutes.",
                minutes_to_wait
            )));
        }

        window.attempts += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_limits_and_resets() {
        let limiter = RateLimiter::new(2, 10);
        let start = OffsetDateTime::now_utc();

        assert!(limiter.check_at("signup:a", start).is_ok());
        assert!(limiter.check_at("signup:a", start + Duration::minutes(1)).is_ok());
        assert!(matches!(
            limiter.check_at("signup:a", start + Duration::minutes(2)),
            Err(ApiError::RateLimited(_))
        ));
        assert!(limiter.check_at("signup:b", start + Duration::minutes(2)).is_ok());
        assert!(limiter.check_at("signup:a", start + Duration::minutes(11)).is_ok());
    }
}
