use chrono::{NaiveDate, NaiveDateTime};
use moji_core::Clock;

/// Browser local time via `Date`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl Clock for JsClock {
    fn now(&self) -> NaiveDateTime {
        let date = js_sys::Date::new_0();
        NaiveDate::from_ymd_opt(
            date.get_full_year() as i32,
            date.get_month() + 1,
            date.get_date(),
        )
        .and_then(|day| {
            day.and_hms_milli_opt(
                date.get_hours(),
                date.get_minutes(),
                date.get_seconds(),
                date.get_milliseconds(),
            )
        })
        .unwrap_or_default()
    }

    fn timestamp_millis(&self) -> u64 {
        js_sys::Date::now().max(0.0) as u64
    }
}
