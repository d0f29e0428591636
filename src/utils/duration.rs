//! Lookahead duration parsing.
//!
//! Accepts the Go-style duration syntax (`720h`, `1h30m`, `1.5h`, `90s`) plus
//! day, week and year units (`30d`, `2w`, `1y`) so values like the ones shown
//! on the help page work. A year is 365 days.

use std::time::Duration;

const UNITS: &[(&str, f64)] = &[
    ("ns", 1e-9),
    ("us", 1e-6),
    ("µs", 1e-6),
    ("ms", 1e-3),
    ("s", 1.0),
    ("m", 60.0),
    ("h", 3_600.0),
    ("d", 86_400.0),
    ("w", 604_800.0),
    ("y", 31_536_000.0),
];

/// Parses a lookahead window such as `30d`, `720h` or `1h30m`.
///
/// A bare `0` is accepted; any other number needs a unit. Negative values are
/// rejected.
///
/// # Errors
///
/// Returns a human-readable message when the input is empty, has an unknown
/// unit, or is not a sequence of `<number><unit>` pairs.
pub fn parse_ttl(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut rest = s;
    let mut total_secs = 0f64;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(format!("invalid duration {input:?}"));
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| format!("invalid duration {input:?}"))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        if unit.is_empty() {
            return Err(format!("missing unit in duration {input:?}"));
        }
        let (_, scale) = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .ok_or_else(|| format!("unknown unit {unit:?} in duration {input:?}"))?;
        total_secs += value * scale;
        rest = &rest[unit_len..];
    }

    Duration::try_from_secs_f64(total_secs).map_err(|e| format!("invalid duration {input:?}: {e}"))
}
