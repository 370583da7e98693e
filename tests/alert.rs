#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};
    use nag::libs::alert::CategoryAlert;
    use nag::libs::time_spent::next_boundary;

    const DAY_OFFSET_HOURS: i64 = 4;

    fn work_alert() -> CategoryAlert {
        CategoryAlert::new(
            "Work",
            vec![Duration::minutes(15), Duration::minutes(30), Duration::hours(1)],
            Duration::hours(DAY_OFFSET_HOURS),
        )
    }

    #[test]
    fn test_only_highest_satisfied_threshold_fires() {
        // time_spent jumps from 0 to 45m in one refresh, e.g. after downtime
        let mut alert = work_alert();
        alert.refresh(Local::now(), Duration::minutes(45));

        let notification = alert.check(false).expect("a threshold is crossed");
        assert!(notification.body.contains("30m"), "the 30m threshold should fire: {}", notification.body);
        assert_eq!(alert.max_triggered(), Duration::minutes(30));

        // 15m was absorbed silently: nothing else fires for the same reading
        assert!(alert.check(false).is_none());
    }

    #[test]
    fn test_check_is_idempotent_for_unchanged_time() {
        let mut alert = work_alert();
        alert.refresh(Local::now(), Duration::minutes(20));

        assert!(alert.check(false).is_some());
        assert!(alert.check(false).is_none());
        assert!(alert.check(false).is_none());
        assert_eq!(alert.max_triggered(), Duration::minutes(15));
    }

    #[test]
    fn test_thresholds_fire_one_by_one_as_time_grows() {
        let mut alert = work_alert();
        let now = Local::now();

        alert.refresh(now, Duration::minutes(16));
        assert!(alert.check(false).is_some());

        alert.refresh(now, Duration::minutes(31));
        let notification = alert.check(false).expect("30m threshold crossed");
        assert!(notification.body.contains("30m"));

        alert.refresh(now, Duration::minutes(61));
        let notification = alert.check(false).expect("1h threshold crossed");
        assert!(notification.body.contains("1h"));

        assert!(alert.check(false).is_none());
    }

    #[test]
    fn test_silent_check_seeds_without_notifying() {
        let mut alert = work_alert();
        alert.refresh(Local::now(), Duration::minutes(45));

        // first pass after startup
        assert!(alert.check(true).is_none());
        assert_eq!(alert.max_triggered(), Duration::minutes(30));

        // an ordinary pass right after stays quiet too
        assert!(alert.check(false).is_none());
    }

    #[test]
    fn test_notification_body_includes_raw_time_when_it_differs() {
        let mut alert = work_alert();
        alert.refresh(Local::now(), Duration::minutes(45));
        let notification = alert.check(false).unwrap();
        assert_eq!(notification.body, "Work for 30m (45m)");

        // exact crossing: no parenthesized remainder
        let mut alert = work_alert();
        alert.refresh(Local::now(), Duration::minutes(30));
        let notification = alert.check(false).unwrap();
        assert_eq!(notification.body, "Work for 30m");
    }

    #[test]
    fn test_positive_framing_changes_the_title() {
        let mut alert = work_alert().positive();
        alert.refresh(Local::now(), Duration::minutes(15));
        let notification = alert.check(false).unwrap();
        assert_eq!(notification.title, "Goal reached");

        let mut alert = work_alert();
        alert.refresh(Local::now(), Duration::minutes(15));
        let notification = alert.check(false).unwrap();
        assert_eq!(notification.title, "Time alert");
    }

    #[test]
    fn test_time_to_next_threshold_counts_down() {
        let mut alert = work_alert();
        let now = Local::now();
        alert.refresh(now, Duration::minutes(10));
        assert_eq!(alert.time_to_next_threshold(now), Duration::minutes(5));

        // past-due thresholds report a non-positive remainder
        alert.refresh(now, Duration::minutes(20));
        assert!(alert.time_to_next_threshold(now) <= Duration::zero());
    }

    #[test]
    fn test_time_to_next_threshold_after_all_triggered() {
        let mut alert = work_alert();
        let now = Local::now();
        alert.refresh(now, Duration::hours(2));
        alert.check(true);
        assert_eq!(alert.max_triggered(), Duration::hours(1));

        // all triggered: wait until tomorrow's boundary plus the smallest threshold
        let expected = (next_boundary(now, Duration::hours(DAY_OFFSET_HOURS)) - now) + Duration::minutes(15);
        assert_eq!(alert.time_to_next_threshold(now), expected);
        assert!(alert.time_to_next_threshold(now) > Duration::zero());
    }

    #[test]
    fn test_due_respects_the_adaptive_interval() {
        let mut alert = work_alert();
        let now = Local::now();

        // fresh alert: epoch sentinel makes the first update due immediately
        assert!(alert.due(now));

        // nothing can cross for 15 minutes, so no refresh before then
        alert.refresh(now, Duration::zero());
        assert!(!alert.due(now));
        assert!(!alert.due(now + Duration::minutes(14)));
        assert!(alert.due(now + Duration::minutes(16)));
    }

    #[test]
    fn test_reset_rearms_every_threshold() {
        let mut alert = work_alert();
        let now = Local::now();
        alert.refresh(now, Duration::hours(2));
        alert.check(true);
        assert_eq!(alert.max_triggered(), Duration::hours(1));

        alert.reset();
        assert_eq!(alert.max_triggered(), Duration::zero());
        assert_eq!(alert.time_spent(), Duration::zero());
        assert!(alert.due(now), "reset alert must refresh on the next cycle");

        // the day starts over: small thresholds can fire again
        alert.refresh(now, Duration::minutes(16));
        let notification = alert.check(false).unwrap();
        assert!(notification.body.contains("15m"));
    }

    #[test]
    fn test_display_label_is_the_last_path_segment() {
        let alert = CategoryAlert::new("Media>Games", vec![Duration::minutes(30)], Duration::hours(DAY_OFFSET_HOURS));
        assert_eq!(alert.label(), "Games");
        assert_eq!(alert.category(), "Media>Games");
        assert_eq!(alert.status(), "Games: 0s");
    }
}
