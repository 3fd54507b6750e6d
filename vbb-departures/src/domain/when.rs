//! Free-text departure time parsing.
//!
//! Users type things like "now", "in 10 minutes", "tomorrow 2 pm" or
//! "2024-03-15 14:30". This module turns such phrases into a concrete instant
//! relative to a reference "now", in the reference's time zone.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Error returned when a time phrase cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot understand time \"{input}\": {reason}")]
pub struct WhenError {
    input: String,
    reason: &'static str,
}

impl WhenError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.trim().to_string(),
            reason,
        }
    }
}

/// Absolute formats tried after lowercasing, so the date/time separator is `t`.
const ABSOLUTE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dt%H:%M",
    "%Y-%m-%dt%H:%M:%S",
];

/// Parse a time phrase relative to `now`.
///
/// Accepted forms (case-insensitive):
/// - `now`
/// - relative offsets: `in 10 minutes`, `in 2h`, `15 min ago`
/// - day words, alone or with a time: `tomorrow`, `today 14:30`, `tomorrow at 2 pm`
/// - clock times for today: `14:30`, `9`, `2pm`, `2:30 pm`, `noon`, `midnight`
/// - absolute: `2024-03-15`, `2024-03-15 14:30`, `2024-03-15T14:30`, RFC 3339
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use vbb_departures::domain::parse_when;
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
///
/// let t = parse_when("in 10 minutes", &now).unwrap();
/// assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 15, 10, 10, 0).unwrap());
///
/// let t = parse_when("tomorrow 2 pm", &now).unwrap();
/// assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 16, 14, 0, 0).unwrap());
///
/// assert!(parse_when("next blue moon", &now).is_err());
/// ```
pub fn parse_when<Tz: TimeZone>(input: &str, now: &DateTime<Tz>) -> Result<DateTime<Tz>, WhenError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WhenError::new(input, "empty"));
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&now.timezone()));
    }

    let lower = trimmed.to_ascii_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let joined = words.join(" ");

    if joined == "now" {
        return Ok(now.clone());
    }

    if let Some(naive) = parse_absolute(&joined) {
        return at_local(now, naive).ok_or_else(|| WhenError::new(input, "no such local time"));
    }

    if let Some(offset) = parse_relative(&words) {
        return now
            .clone()
            .checked_add_signed(offset)
            .ok_or_else(|| WhenError::new(input, "out of range"));
    }

    let (date, rest) = split_day_word(&words, now.date_naive())
        .ok_or_else(|| WhenError::new(input, "out of range"))?;

    let time = match rest.as_slice() {
        [] if date.is_some() => now.time(),
        [] => return Err(WhenError::new(input, "unrecognised phrase")),
        rest => parse_clock(&rest.concat())
            .ok_or_else(|| WhenError::new(input, "unrecognised phrase"))?,
    };

    let date = date.unwrap_or_else(|| now.date_naive());
    at_local(now, date.and_time(time)).ok_or_else(|| WhenError::new(input, "no such local time"))
}

fn at_local<Tz: TimeZone>(now: &DateTime<Tz>, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    now.timezone().from_local_datetime(&naive).earliest()
}

fn parse_absolute(s: &str) -> Option<NaiveDateTime> {
    for format in ABSOLUTE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// `in <n><unit>` or `<n><unit> ago`, with or without a space before the unit.
fn parse_relative(words: &[&str]) -> Option<Duration> {
    match words {
        ["in", rest @ ..] if !rest.is_empty() => parse_amount(&rest.concat()),
        [rest @ .., "ago"] if !rest.is_empty() => parse_amount(&rest.concat()).map(|d| -d),
        _ => None,
    }
}

fn parse_amount(s: &str) -> Option<Duration> {
    let split = s.find(|c: char| !c.is_ascii_digit())?;
    let (digits, unit) = s.split_at(split);
    let n: i64 = digits.parse().ok()?;

    match unit {
        "m" | "min" | "mins" | "minute" | "minutes" => Duration::try_minutes(n),
        "h" | "hr" | "hrs" | "hour" | "hours" => Duration::try_hours(n),
        "d" | "day" | "days" => Duration::try_days(n),
        _ => None,
    }
}

/// Strip a leading or trailing day word (and an optional "at").
///
/// Returns the date the word names (if any) and the remaining words. `None`
/// only when the named date is out of range.
fn split_day_word<'a>(
    words: &[&'a str],
    today: NaiveDate,
) -> Option<(Option<NaiveDate>, Vec<&'a str>)> {
    let day_offset = |word: &&str| match *word {
        "today" => Some(0),
        "tomorrow" => Some(1),
        "yesterday" => Some(-1),
        _ => None,
    };

    let (offset, mut rest): (Option<i64>, Vec<&str>) = match words {
        [first, rest @ ..] if day_offset(first).is_some() => (day_offset(first), rest.to_vec()),
        [rest @ .., last] if day_offset(last).is_some() => (day_offset(last), rest.to_vec()),
        _ => (None, words.to_vec()),
    };

    if rest.first() == Some(&"at") {
        rest.remove(0);
    }

    match offset {
        Some(days) => {
            let date = today.checked_add_signed(Duration::try_days(days)?)?;
            Some((Some(date), rest))
        }
        None => Some((None, rest)),
    }
}

/// Parse a clock time with spaces already removed: `14:30`, `9`, `2pm`, `noon`.
fn parse_clock(s: &str) -> Option<NaiveTime> {
    match s {
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => return Some(NaiveTime::MIN),
        _ => {}
    }

    let (digits, meridiem) = if let Some(d) = s.strip_suffix("am") {
        (d, Some(false))
    } else if let Some(d) = s.strip_suffix("pm") {
        (d, Some(true))
    } else {
        (s, None)
    };

    let (hour, minute) = match digits.split_once(':') {
        Some((h, m)) => (parse_hour(h)?, parse_two_digits(m.as_bytes())?),
        None => (parse_hour(digits)?, 0),
    };

    let hour = match meridiem {
        Some(pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            hour % 12 + if pm { 12 } else { 0 }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn parse_hour(s: &str) -> Option<u32> {
    match s.len() {
        1 => (s.as_bytes()[0] as char).to_digit(10),
        2 => parse_two_digits(s.as_bytes()),
        _ => None,
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 20, 30).unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn parse(s: &str) -> DateTime<Utc> {
        parse_when(s, &now()).unwrap()
    }

    #[test]
    fn now_is_reference() {
        assert_eq!(parse("now"), now());
        assert_eq!(parse("  NOW "), now());
    }

    #[test]
    fn relative_future() {
        assert_eq!(parse("in 10 minutes"), now() + Duration::minutes(10));
        assert_eq!(parse("in 10min"), now() + Duration::minutes(10));
        assert_eq!(parse("in 2 hours"), now() + Duration::hours(2));
        assert_eq!(parse("in 1h"), now() + Duration::hours(1));
        assert_eq!(parse("in 1 day"), now() + Duration::days(1));
    }

    #[test]
    fn relative_past() {
        assert_eq!(parse("15 min ago"), now() - Duration::minutes(15));
        assert_eq!(parse("2 hours ago"), now() - Duration::hours(2));
    }

    #[test]
    fn clock_times_are_today() {
        assert_eq!(parse("14:30"), utc(2024, 3, 15, 14, 30));
        assert_eq!(parse("09:05"), utc(2024, 3, 15, 9, 5));
        assert_eq!(parse("9"), utc(2024, 3, 15, 9, 0));
        assert_eq!(parse("8:15"), utc(2024, 3, 15, 8, 15));
    }

    #[test]
    fn meridiem_times() {
        assert_eq!(parse("2pm"), utc(2024, 3, 15, 14, 0));
        assert_eq!(parse("2 PM"), utc(2024, 3, 15, 14, 0));
        assert_eq!(parse("2:30 pm"), utc(2024, 3, 15, 14, 30));
        assert_eq!(parse("12am"), utc(2024, 3, 15, 0, 0));
        assert_eq!(parse("12pm"), utc(2024, 3, 15, 12, 0));
        assert_eq!(parse("11 am"), utc(2024, 3, 15, 11, 0));
    }

    #[test]
    fn named_times() {
        assert_eq!(parse("noon"), utc(2024, 3, 15, 12, 0));
        assert_eq!(parse("midnight"), utc(2024, 3, 15, 0, 0));
    }

    #[test]
    fn day_words() {
        assert_eq!(parse("tomorrow"), now() + Duration::days(1));
        assert_eq!(parse("yesterday"), now() - Duration::days(1));
        assert_eq!(parse("today"), now());
        assert_eq!(parse("tomorrow 2 pm"), utc(2024, 3, 16, 14, 0));
        assert_eq!(parse("tomorrow at 14:30"), utc(2024, 3, 16, 14, 30));
        assert_eq!(parse("8am tomorrow"), utc(2024, 3, 16, 8, 0));
        assert_eq!(parse("today noon"), utc(2024, 3, 15, 12, 0));
    }

    #[test]
    fn absolute_dates() {
        assert_eq!(parse("2024-04-01 07:45"), utc(2024, 4, 1, 7, 45));
        assert_eq!(parse("2024-04-01T07:45"), utc(2024, 4, 1, 7, 45));
        assert_eq!(parse("2024-04-01 07:45:00"), utc(2024, 4, 1, 7, 45));
        assert_eq!(parse("2024-04-01"), utc(2024, 4, 1, 0, 0));
    }

    #[test]
    fn rfc3339_converts_to_reference_zone() {
        assert_eq!(parse("2024-03-15T12:00:00+02:00"), utc(2024, 3, 15, 10, 0));
    }

    #[test]
    fn keeps_reference_offset() {
        let berlin = FixedOffset::east_opt(3600).unwrap();
        let now = berlin.with_ymd_and_hms(2024, 3, 15, 23, 50, 0).unwrap();

        let t = parse_when("in 20 minutes", &now).unwrap();
        assert_eq!(t.offset(), &berlin);
        assert_eq!(t, berlin.with_ymd_and_hms(2024, 3, 16, 0, 10, 0).unwrap());

        let t = parse_when("14:00", &now).unwrap();
        assert_eq!(t, berlin.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap());
    }

    #[test]
    fn reject_garbage() {
        assert!(parse_when("", &now()).is_err());
        assert!(parse_when("   ", &now()).is_err());
        assert!(parse_when("soonish", &now()).is_err());
        assert!(parse_when("in a while", &now()).is_err());
        assert!(parse_when("in 10 fortnights", &now()).is_err());
        assert!(parse_when("ago", &now()).is_err());
    }

    #[test]
    fn reject_invalid_clock() {
        assert!(parse_when("25:00", &now()).is_err());
        assert!(parse_when("14:60", &now()).is_err());
        assert!(parse_when("14:5", &now()).is_err());
        assert!(parse_when("13pm", &now()).is_err());
        assert!(parse_when("0am", &now()).is_err());
        assert!(parse_when("tomorrow blah", &now()).is_err());
    }

    #[test]
    fn error_mentions_input() {
        let err = parse_when(" soonish ", &now()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot understand time \"soonish\": unrecognised phrase"
        );
    }
}
