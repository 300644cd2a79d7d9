use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

const GAP_SEARCH_MINUTES: i64 = 180;

/// Parses a calendar day in strict `YYYY-MM-DD` form. Anything else, including
/// other separators, unpadded components, trailing text, and impossible dates
/// such as `2024-02-30`, yields `None`.
pub(crate) fn parse_day(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    for (index, byte) in bytes.iter().enumerate() {
        if matches!(index, 4 | 7) {
            continue;
        }
        if !byte.is_ascii_digit() {
            return None;
        }
    }
    let year: i32 = raw[0..4].parse().ok()?;
    let month: u32 = raw[5..7].parse().ok()?;
    let day: u32 = raw[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The following calendar day. All "+1 day" arithmetic for range bounds goes
/// through here.
pub(crate) fn day_after(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(NaiveDate::MAX)
}

/// The first instant of `date` in `tz`, as a UTC instant. When local midnight
/// does not exist (a DST gap) this walks forward to the earliest valid local
/// time; when it is ambiguous it takes the earlier instant.
pub(crate) fn day_start<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    earliest_local_instant(tz, date.and_time(NaiveTime::MIN))
}

fn earliest_local_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    for minutes in 0..=GAP_SEARCH_MINUTES {
        let candidate = naive + Duration::minutes(minutes);
        match tz.from_local_datetime(&candidate) {
            chrono::LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            chrono::LocalResult::Ambiguous(a, b) => {
                let a = a.with_timezone(&Utc);
                let b = b.with_timezone(&Utc);
                return if a <= b { a } else { b };
            }
            chrono::LocalResult::None => continue,
        }
    }
    // No zone suppresses more than a few hours of wall clock; treat the
    // nominal time as UTC if the walk somehow exhausts the window.
    Utc.from_utc_datetime(&naive)
}

/// A half-open UTC interval derived from optional calendar-day bounds. An
/// absent side means "no bound on that side", not midnight of some default
/// day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DayRange {
    pub(crate) start: Option<DateTime<Utc>>,
    pub(crate) end_exclusive: Option<DateTime<Utc>>,
}

impl DayRange {
    /// Builds the interval `[start of start_day, start of the day after
    /// end_day)` so the end day is fully inclusive. The bounds are resolved
    /// independently; an inverted pair is legal and simply matches nothing.
    pub(crate) fn resolve<Tz: TimeZone>(
        tz: &Tz,
        start_day: Option<NaiveDate>,
        end_day: Option<NaiveDate>,
    ) -> DayRange {
        DayRange {
            start: start_day.map(|day| day_start(tz, day)),
            end_exclusive: end_day.map(|day| day_start(tz, day_after(day))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_strict_calendar_days() {
        assert_eq!(parse_day("2024-01-05"), NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(
            parse_day("1999-12-31"),
            NaiveDate::from_ymd_opt(1999, 12, 31)
        );
        assert_eq!(parse_day("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn rejects_loose_formats() {
        for raw in [
            "2024-1-05",
            "2024-01-5",
            "01-05-2024",
            "2024/01/05",
            "2024-01-05T00:00:00Z",
            "20240105",
            "2024-01-05 ",
            " 2024-01-05",
            "",
            "not-a-date",
        ] {
            assert_eq!(parse_day(raw), None, "{raw:?} should be rejected");
        }
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse_day("2024-02-30"), None);
        assert_eq!(parse_day("2024-13-01"), None);
        assert_eq!(parse_day("2024-00-10"), None);
        assert_eq!(parse_day("2024-04-31"), None);
        assert_eq!(parse_day("2023-02-29"), None);
    }

    #[test]
    fn day_after_advances_across_month_and_year() {
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).expect("date");
        assert_eq!(day_after(jan31), NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"));

        let dec31 = NaiveDate::from_ymd_opt(2023, 12, 31).expect("date");
        assert_eq!(day_after(dec31), NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"));
    }

    #[test]
    fn utc_day_start_is_midnight() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).expect("date");
        let expected = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).single().expect("utc");
        assert_eq!(day_start(&Utc, day), expected);
    }

    #[test]
    fn eastern_day_start_converts_offset() {
        let tz = chrono_tz::US::Eastern;
        let day = NaiveDate::from_ymd_opt(2026, 3, 8).expect("date");
        // Midnight EST, before the 02:00 spring-forward gap on this date.
        let expected = Utc.with_ymd_and_hms(2026, 3, 8, 5, 0, 0).single().expect("utc");
        assert_eq!(day_start(&tz, day), expected);
    }

    #[test]
    fn day_start_skips_midnight_dst_gap() {
        // Sao Paulo's 2018 spring-forward jumped local 00:00 straight to
        // 01:00; the day starts at the earliest valid local time.
        let tz = chrono_tz::America::Sao_Paulo;
        let day = NaiveDate::from_ymd_opt(2018, 11, 4).expect("date");
        let expected = Utc.with_ymd_and_hms(2018, 11, 4, 3, 0, 0).single().expect("utc");
        assert_eq!(day_start(&tz, day), expected);
    }

    #[test]
    fn end_day_is_fully_inclusive() {
        let end = NaiveDate::from_ymd_opt(2024, 1, 10).expect("date");
        let range = DayRange::resolve(&Utc, None, Some(end));

        let end_exclusive = range.end_exclusive.expect("end bound");
        assert_eq!(
            end_exclusive,
            Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).single().expect("utc")
        );

        let last_moment = Utc
            .with_ymd_and_hms(2024, 1, 10, 23, 59, 59)
            .single()
            .expect("utc")
            + Duration::milliseconds(999);
        assert!(last_moment < end_exclusive);
    }

    #[test]
    fn absent_bounds_stay_absent() {
        let range = DayRange::resolve(&Utc, None, None);
        assert_eq!(range, DayRange::default());

        let start_only = DayRange::resolve(
            &Utc,
            NaiveDate::from_ymd_opt(2024, 1, 1),
            None,
        );
        assert!(start_only.start.is_some());
        assert!(start_only.end_exclusive.is_none());
    }

    #[test]
    fn same_day_range_covers_one_full_day() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).expect("date");
        let range = DayRange::resolve(&Utc, Some(day), Some(day));
        let start = range.start.expect("start");
        let end = range.end_exclusive.expect("end");
        assert_eq!(end - start, Duration::days(1));
    }
}
