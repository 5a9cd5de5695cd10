//! Compact duration strings such as `500ms`, `1m30s` or `1h2m3.5s`.

use std::time::Duration;

use super::UrlError;

const NANOS_PER_SEC: i128 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<i128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "\u{b5}s" | "\u{3bc}s" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 3_600 * NANOS_PER_SEC,
        _ => return None,
    };
    Some(nanos)
}

/// Parses a signed sequence of `<number><unit>` segments into nanoseconds.
///
/// Every segment needs a unit; the single exception is a bare `0`.
/// Results outside the `i64` nanosecond range are rejected.
fn parse_nanos(input: &str) -> Option<i128> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Some(0);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: i128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, tail) = rest.split_at(int_len);

        let (frac_part, tail) = match tail.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
                after_dot.split_at(frac_len)
            }
            None => ("", tail),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        let unit_len = tail
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let scale = unit_nanos(unit)?;

        let whole: i128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };
        let mut value = whole.checked_mul(scale)?;

        if !frac_part.is_empty() {
            // Digits past nanosecond precision carry no weight.
            let digits = &frac_part[..frac_part.len().min(18)];
            let frac: i128 = digits.parse().ok()?;
            value = value.checked_add(frac * scale / 10i128.pow(digits.len() as u32))?;
        }

        total = total.checked_add(value)?;
        if total > i64::MAX as i128 {
            return None;
        }
        rest = tail;
    }

    Some(if negative { -total } else { total })
}

fn nanos_to_duration(nanos: i128, input: &str) -> Result<Duration, UrlError> {
    if nanos < 0 {
        return Err(UrlError::NegativeDelay(input.to_string()));
    }
    u64::try_from(nanos)
        .map(Duration::from_nanos)
        .map_err(|_| UrlError::InvalidDelay(input.to_string()))
}

/// Parses a unit-suffixed duration such as `"500ms"`, `"2m"` or `"1h30m"`.
pub fn parse_duration(input: &str) -> Result<Duration, UrlError> {
    let nanos = parse_nanos(input).ok_or_else(|| UrlError::InvalidDelay(input.to_string()))?;
    nanos_to_duration(nanos, input)
}

/// Parses a request delay.
///
/// Unit-suffixed forms are tried first; a plain integer is read as whole
/// seconds, so `"5"` and `"5s"` are the same delay. `"0"` is a valid delay.
pub fn parse_delay(input: &str) -> Result<Duration, UrlError> {
    if input.is_empty() {
        return Err(UrlError::EmptyDelay);
    }

    let nanos = match parse_nanos(input) {
        Some(nanos) => nanos,
        None => input
            .parse::<i64>()
            .map(|secs| secs as i128 * NANOS_PER_SEC)
            .map_err(|_| UrlError::InvalidDelay(input.to_string()))?,
    };

    nanos_to_duration(nanos, input)
}

fn format_scaled(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }

    let width = scale.ilog10() as usize;
    let digits = format!("{:0width$}", frac, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Renders a duration the way [`parse_duration`] reads it back.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < NANOS_PER_SEC as u128 {
        let (unit, scale) = if nanos < 1_000 {
            ("ns", 1)
        } else if nanos < 1_000_000 {
            ("\u{b5}s", 1_000)
        } else {
            ("ms", 1_000_000)
        };
        return format!("{}{}", format_scaled(nanos, scale), unit);
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let secs_nanos = (total_secs % 60) as u128 * NANOS_PER_SEC as u128
        + duration.subsec_nanos() as u128;
    let secs = format_scaled(secs_nanos, NANOS_PER_SEC as u128);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// `#[serde(with = "...")]` adapter storing durations as compact strings.
pub mod serde_str {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_duration(*duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_delay(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delay_seconds_forms_agree() {
        assert_eq!(parse_delay("5").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_delay("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_delay("+5").unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_delay_units() {
        assert_eq!(parse_delay("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_delay("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_delay("1h30m").unwrap(), Duration::from_secs(5_400));
        assert_eq!(parse_delay("1.5s").unwrap(), Duration::from_millis(1_500));
        assert_eq!(parse_delay(".5s").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_delay("250us").unwrap(), Duration::from_micros(250));
        assert_eq!(parse_delay("250\u{b5}s").unwrap(), Duration::from_micros(250));
        assert_eq!(parse_delay("10ns").unwrap(), Duration::from_nanos(10));
    }

    #[test]
    fn test_parse_delay_zero_is_valid() {
        assert_eq!(parse_delay("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_delay("0s").unwrap(), Duration::ZERO);
        assert_eq!(parse_delay("-0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_delay_rejects() {
        assert_eq!(parse_delay(""), Err(UrlError::EmptyDelay));
        assert_eq!(
            parse_delay("-1s"),
            Err(UrlError::NegativeDelay("-1s".to_string()))
        );
        assert_eq!(
            parse_delay("-3"),
            Err(UrlError::NegativeDelay("-3".to_string()))
        );
        assert!(matches!(parse_delay("abc"), Err(UrlError::InvalidDelay(_))));
        assert!(matches!(parse_delay("5x"), Err(UrlError::InvalidDelay(_))));
        assert!(matches!(parse_delay("."), Err(UrlError::InvalidDelay(_))));
        assert!(matches!(parse_delay("s"), Err(UrlError::InvalidDelay(_))));
    }

    #[test]
    fn test_parse_duration_requires_units() {
        assert!(parse_duration("5").is_err());
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert!(parse_duration("9999999999h").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_secs(1)), "1s");
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(3_600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_millis(1_500)), "1.5s");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_micros(1_500)), "1.5ms");
        assert_eq!(format_duration(Duration::from_nanos(42)), "42ns");
    }

    #[test]
    fn test_formatted_durations_parse_back() {
        for d in [
            Duration::from_secs(3_725),
            Duration::from_millis(250),
            Duration::from_micros(7),
        ] {
            assert_eq!(parse_duration(&format_duration(d)).unwrap(), d);
        }
    }
}
