//! Parsing and formatting of time values typed by the operator.
//!
//! Accepted forms (surrounding whitespace ignored, optional leading `-`):
//! - `d` — a whole number of days
//! - `hh:mm`
//! - `hh:mm:ss`
//! - `hh:mm:ss.fffffff` — up to seven fractional digits
//! - any of the colon forms prefixed by `d.` for days, e.g. `1.02:30:00`

use chrono::TimeDelta;

use crate::error::ClockError;

/// Maximum number of fractional-second digits accepted.
const MAX_FRACTION_DIGITS: usize = 7;

/// Parses operator input into a signed duration.
pub fn parse_time_input(input: &str) -> Result<TimeDelta, ClockError> {
    parse_magnitude(input.trim()).map_err(|reason| ClockError::InvalidTimeInput {
        input: input.to_string(),
        reason,
    })
}

fn parse_magnitude(text: &str) -> Result<TimeDelta, &'static str> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if body.is_empty() {
        return Err("empty input");
    }

    let magnitude = if body.contains(':') {
        parse_clock_form(body)?
    } else {
        days(parse_number(body, "days must be a whole number")?)?
    };

    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_clock_form(body: &str) -> Result<TimeDelta, &'static str> {
    let mut fields = body.split(':');
    let head = fields.next().unwrap_or_default();

    let (day_count, hours) = match head.split_once('.') {
        Some((day_text, hours)) => (parse_number(day_text, "days must be a whole number")?, hours),
        None => (0, head),
    };
    let hours = parse_component(hours, 23, "hours must be 0-23")?;
    let minutes = parse_component(
        fields.next().unwrap_or_default(),
        59,
        "minutes must be 0-59",
    )?;

    let (seconds, nanos) = match fields.next() {
        None => (0, 0),
        Some(field) => {
            let (whole, fraction) = match field.split_once('.') {
                Some((whole, fraction)) => (whole, Some(fraction)),
                None => (field, None),
            };
            let seconds = parse_component(whole, 59, "seconds must be 0-59")?;
            let nanos = match fraction {
                Some(fraction) => parse_fraction(fraction)?,
                None => 0,
            };
            (seconds, nanos)
        }
    };

    if fields.next().is_some() {
        return Err("too many ':' separated fields");
    }

    let clock = TimeDelta::hours(hours)
        + TimeDelta::minutes(minutes)
        + TimeDelta::seconds(seconds)
        + TimeDelta::nanoseconds(nanos);
    days(day_count)?
        .checked_add(&clock)
        .ok_or("time out of range")
}

fn days(count: i64) -> Result<TimeDelta, &'static str> {
    TimeDelta::try_days(count).ok_or("day count out of range")
}

fn parse_number(text: &str, reason: &'static str) -> Result<i64, &'static str> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(reason);
    }
    text.parse().map_err(|_| reason)
}

/// Parses a one- or two-digit clock field no greater than `max`.
fn parse_component(text: &str, max: i64, reason: &'static str) -> Result<i64, &'static str> {
    if text.len() > 2 {
        return Err(reason);
    }
    let value = parse_number(text, reason)?;
    if value > max {
        return Err(reason);
    }
    Ok(value)
}

fn parse_fraction(text: &str) -> Result<i64, &'static str> {
    const REASON: &str = "fraction must be 1-7 digits";
    if text.len() > MAX_FRACTION_DIGITS {
        return Err(REASON);
    }
    let value = parse_number(text, REASON)?;
    let scale = 10_i64.pow(9 - text.len() as u32);
    Ok(value * scale)
}

/// Formats the time-of-day part of `time` as `hh:mm:ss`.
pub fn format_time_of_day(time: TimeDelta) -> String {
    let total = time.num_seconds().rem_euclid(86_400);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: i64, m: i64, s: i64) -> TimeDelta {
        TimeDelta::hours(h) + TimeDelta::minutes(m) + TimeDelta::seconds(s)
    }

    #[test]
    fn test_parse_clock_forms() {
        assert_eq!(parse_time_input("03:30").unwrap(), hms(3, 30, 0));
        assert_eq!(parse_time_input("23:59:59").unwrap(), hms(23, 59, 59));
        assert_eq!(parse_time_input("  7:05:09 ").unwrap(), hms(7, 5, 9));
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(
            parse_time_input("12:00:01.5").unwrap(),
            hms(12, 0, 1) + TimeDelta::milliseconds(500)
        );
        assert_eq!(
            parse_time_input("00:00:00.0000001").unwrap(),
            TimeDelta::nanoseconds(100)
        );
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_time_input("2").unwrap(), TimeDelta::days(2));
        assert_eq!(
            parse_time_input("1.02:30:00").unwrap(),
            TimeDelta::days(1) + hms(2, 30, 0)
        );
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(parse_time_input("-00:00:01").unwrap(), TimeDelta::seconds(-1));
        assert_eq!(parse_time_input("-1:30").unwrap(), -hms(1, 30, 0));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in [
            "", "   ", "-", "abc", "12:", ":30", "24:00", "10:60", "10:00:60",
            "10:00:00:00", "1:2:3.12345678", "1:2:3.", "+5", "1.5", "12:3a",
        ] {
            let err = parse_time_input(input).unwrap_err();
            assert!(
                matches!(err, ClockError::InvalidTimeInput { .. }),
                "expected InvalidTimeInput for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_time() {
        for input in ["106751991167.23:59:59", "-106751991167.23:59:59", "999999999999"] {
            let err = parse_time_input(input).unwrap_err();
            assert!(
                matches!(err, ClockError::InvalidTimeInput { .. }),
                "expected InvalidTimeInput for {input:?}"
            );
        }
    }

    #[test]
    fn test_error_message_names_input() {
        let err = parse_time_input("25:00").unwrap_err();
        assert_eq!(err.to_string(), "invalid time input \"25:00\": hours must be 0-23");
    }

    #[test]
    fn test_format_time_of_day() {
        assert_eq!(format_time_of_day(hms(3, 30, 0)), "03:30:00");
        assert_eq!(format_time_of_day(TimeDelta::days(1) + hms(0, 0, 5)), "00:00:05");
        assert_eq!(format_time_of_day(hms(23, 59, 59) + TimeDelta::milliseconds(999)), "23:59:59");
    }
}
