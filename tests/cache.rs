#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};
    use nag::libs::cache::{Clock, TtlCache};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// A clock the test advances by hand.
    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(ManualClock {
                now: Mutex::new(Utc::now()),
            })
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock();
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock()
        }
    }

    #[test]
    fn test_miss_on_empty_cache() {
        let cache: TtlCache<String, u64> = TtlCache::new(Duration::seconds(60));
        assert_eq!(cache.get(&"key".to_string()), None);
    }

    #[test]
    fn test_fresh_value_is_served_within_ttl() {
        let clock = ManualClock::new();
        let cache: TtlCache<String, u64> = TtlCache::with_clock(Duration::seconds(60), clock.clone());

        cache.put("key".to_string(), 42);
        assert_eq!(cache.get(&"key".to_string()), Some(42));

        // a second read 59s later still hits the same value
        clock.advance(Duration::seconds(59));
        assert_eq!(cache.get(&"key".to_string()), Some(42));
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let clock = ManualClock::new();
        let cache: TtlCache<String, u64> = TtlCache::with_clock(Duration::seconds(60), clock.clone());

        cache.put("key".to_string(), 42);
        clock.advance(Duration::seconds(61));
        assert_eq!(cache.get(&"key".to_string()), None);

        // a refreshed value restarts the TTL window
        cache.put("key".to_string(), 43);
        assert_eq!(cache.get(&"key".to_string()), Some(43));
        clock.advance(Duration::seconds(59));
        assert_eq!(cache.get(&"key".to_string()), Some(43));
    }

    #[test]
    fn test_exact_ttl_boundary_is_still_fresh() {
        let clock = ManualClock::new();
        let cache: TtlCache<String, u64> = TtlCache::with_clock(Duration::seconds(60), clock.clone());

        cache.put("key".to_string(), 42);
        clock.advance(Duration::seconds(60));
        assert_eq!(cache.get(&"key".to_string()), Some(42));
    }

    #[test]
    fn test_keys_expire_independently() {
        let clock = ManualClock::new();
        let cache: TtlCache<String, u64> = TtlCache::with_clock(Duration::seconds(60), clock.clone());

        cache.put("old".to_string(), 1);
        clock.advance(Duration::seconds(40));
        cache.put("new".to_string(), 2);
        clock.advance(Duration::seconds(30));

        assert_eq!(cache.get(&"old".to_string()), None);
        assert_eq!(cache.get(&"new".to_string()), Some(2));
    }
}
