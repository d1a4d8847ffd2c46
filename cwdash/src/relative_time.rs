use chrono::{DateTime, Datelike, Timelike, Utc};

const MINUTES_IN_HOUR: i64 = 60;
const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// Human readable distance between `date` and `base`, with an "ago"/"in" suffix.
///
/// Minutes are rounded before bucketing: under 45 minutes counts minutes,
/// under a day counts "about" hours, under 30 days counts days, and past two
/// months whole calendar months decide between months and about/over/almost
/// years. E.g. "less than a minute ago", "about 3 hours ago", "in 2 days".
pub fn format_distance(date: DateTime<Utc>, base: DateTime<Utc>) -> String {
    let future = date > base;
    let (earlier, later) = if future { (base, date) } else { (date, base) };

    let seconds = (later - earlier).num_seconds();
    let minutes = rounded_div(seconds, 60);

    let distance = if minutes < 2 {
        if minutes == 0 {
            "less than a minute".to_string()
        } else {
            plural(minutes, "minute")
        }
    } else if minutes < 45 {
        plural(minutes, "minute")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        format!("about {}", plural(rounded_div(minutes, MINUTES_IN_HOUR), "hour"))
    } else if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        plural(rounded_div(minutes, MINUTES_IN_DAY), "day")
    } else if minutes < MINUTES_IN_TWO_MONTHS {
        format!("about {}", plural(rounded_div(minutes, MINUTES_IN_MONTH), "month"))
    } else {
        let months = full_months_between(earlier, later);
        if months < 12 {
            plural(rounded_div(minutes, MINUTES_IN_MONTH), "month")
        } else {
            let years = months / 12;
            match months % 12 {
                0..3 => format!("about {}", plural(years, "year")),
                3..9 => format!("over {}", plural(years, "year")),
                _ => format!("almost {}", plural(years + 1, "year")),
            }
        }
    };

    if future {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Rounds half up, both operands non-negative.
fn rounded_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}

/// Calendar months from `earlier` to `later`, not counting an unfinished last month.
fn full_months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let mut months = (later.year() as i64 - earlier.year() as i64) * 12
        + (later.month() as i64 - earlier.month() as i64);

    let later_in_month = (later.day(), later.num_seconds_from_midnight());
    let earlier_in_month = (earlier.day(), earlier.num_seconds_from_midnight());
    if months > 0 && later_in_month < earlier_in_month {
        months -= 1;
    }

    months
}
