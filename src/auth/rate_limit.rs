use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Counts failed logins per account and blocks further attempts for a while.
///
/// Keys are normalised emails so the backend is not hammered with guesses
/// for one account.
#[derive(Clone)]
pub struct LoginThrottle {
    max_attempts: usize,
    window: Duration,
    failures: Arc<Mutex<HashMap<String, Vec<Instant>>>>,
}

impl LoginThrottle {
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            window,
            failures: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_blocked(&self, email: &str) -> bool {
        self.is_blocked_at(email, Instant::now())
    }

    /// Prunes expired failures for `email` as a side effect.
    pub fn is_blocked_at(&self, email: &str, now: Instant) -> bool {
        let mut map = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        let key = normalise(email);
        let Some(stamps) = map.get_mut(&key) else {
            return false;
        };
        stamps.retain(|t| now.saturating_duration_since(*t) < self.window);
        if stamps.is_empty() {
            map.remove(&key);
            return false;
        }
        stamps.len() >= self.max_attempts
    }

    pub fn record_failure(&self, email: &str) {
        self.record_failure_at(email, Instant::now());
    }

    /// Also drops every account whose failures have all expired.
    pub fn record_failure_at(&self, email: &str, at: Instant) {
        let mut map = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        map.retain(|_, stamps| {
            stamps.retain(|t| at.saturating_duration_since(*t) < self.window);
            !stamps.is_empty()
        });
        map.entry(normalise(email)).or_default().push(at);
    }

    pub fn clear(&self, email: &str) {
        let mut map = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&normalise(email));
    }

    /// Accounts with failures currently on record.
    pub fn tracked(&self) -> usize {
        self.failures.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

fn normalise(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_max_failures_within_window() {
        let throttle = LoginThrottle::new(3, Duration::from_secs(60));
        let t0 = Instant::now();
        for _ in 0..3 {
            assert!(!throttle.is_blocked_at("a@gym.in", t0));
            throttle.record_failure_at("A@Gym.in ", t0);
        }
        assert!(throttle.is_blocked_at("a@gym.in", t0 + Duration::from_secs(10)));
        assert!(!throttle.is_blocked_at("b@gym.in", t0));
    }

    #[test]
    fn failures_expire_and_clear_resets() {
        let throttle = LoginThrottle::new(2, Duration::from_secs(60));
        let t0 = Instant::now();
        throttle.record_failure_at("a@gym.in", t0);
        throttle.record_failure_at("a@gym.in", t0);
        assert!(throttle.is_blocked_at("a@gym.in", t0));
        assert!(!throttle.is_blocked_at("a@gym.in", t0 + Duration::from_secs(61)));

        throttle.record_failure_at("a@gym.in", t0);
        throttle.record_failure_at("a@gym.in", t0);
        throttle.clear("a@gym.in");
        assert!(!throttle.is_blocked_at("a@gym.in", t0));
    }

    #[test]
    fn stale_accounts_are_dropped_on_next_failure() {
        let throttle = LoginThrottle::new(3, Duration::from_secs(60));
        let t0 = Instant::now();
        for i in 0..10_000 {
            throttle.record_failure_at(&format!("user{i}@gym.in"), t0);
        }
        assert_eq!(throttle.tracked(), 10_000);

        let later = t0 + Duration::from_secs(3600);
        assert!(!throttle.is_blocked_at("fresh@gym.in", later));
        throttle.record_failure_at("fresh@gym.in", later);
        assert_eq!(throttle.tracked(), 1);
    }
}
