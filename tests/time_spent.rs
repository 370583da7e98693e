#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate};
    use nag::libs::time_spent::{day_start, logical_day, next_boundary, ALL_CATEGORY};

    const OFFSET: i64 = 4;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_start_is_midnight_plus_offset() {
        let offset = Duration::hours(OFFSET);
        let start = day_start(date(2026, 8, 7), offset);
        assert_eq!(start.date_naive(), date(2026, 8, 7));
        assert_eq!(start - day_start(date(2026, 8, 6), offset), Duration::days(1));
    }

    #[test]
    fn test_logical_day_attributes_late_night_to_prior_day() {
        let offset = Duration::hours(OFFSET);
        let boundary = day_start(date(2026, 8, 7), offset);

        // one second before 4am still belongs to the 6th
        assert_eq!(logical_day(boundary - Duration::seconds(1), offset), date(2026, 8, 6));
        // at and after the boundary it is the 7th
        assert_eq!(logical_day(boundary, offset), date(2026, 8, 7));
        assert_eq!(logical_day(boundary + Duration::hours(19), offset), date(2026, 8, 7));
    }

    #[test]
    fn test_day_start_round_trips_through_logical_day() {
        let offset = Duration::hours(OFFSET);
        for day in [date(2026, 1, 1), date(2026, 8, 7), date(2026, 12, 31)] {
            assert_eq!(logical_day(day_start(day, offset), offset), day);
        }
    }

    #[test]
    fn test_zero_offset_matches_calendar_days() {
        let offset = Duration::zero();
        let now = Local::now();
        assert_eq!(logical_day(now, offset), now.date_naive());
    }

    #[test]
    fn test_next_boundary_is_in_the_future_and_close() {
        let offset = Duration::hours(OFFSET);
        let now = Local::now();
        let boundary = next_boundary(now, offset);

        assert!(boundary > now);
        assert!(boundary - now <= Duration::days(1));
        // the boundary starts the next logical day
        assert_eq!(logical_day(boundary, offset), logical_day(now, offset) + Duration::days(1));
    }

    #[test]
    fn test_all_category_label() {
        // the synthesized total uses a label no taxonomy path collides with
        assert_eq!(ALL_CATEGORY, "All");
    }
}
