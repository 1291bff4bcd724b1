// src/config/duration.rs

use std::time::Duration;

/// Parse a duration such as `50ms`, `90s`, `10m` or `1h30m`.
///
/// Units: `ms`, `s`, `m`, `h`. A bare number is rejected so that `10`
/// cannot silently mean seconds to one reader and minutes to another.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let mut total = Duration::ZERO;
    let mut rest = s;

    while !rest.is_empty() {
        let idx = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("duration '{s}' is missing a unit suffix"))?;
        if idx == 0 {
            return Err(format!("invalid duration '{s}': expected a number"));
        }
        let (num_part, tail) = rest.split_at(idx);
        let value: u64 = num_part
            .parse()
            .map_err(|e| format!("invalid duration number '{num_part}': {e}"))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);

        let part = match unit.trim().to_lowercase().as_str() {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value * 60),
            "h" => Duration::from_secs(value * 60 * 60),
            other => {
                return Err(format!(
                    "unsupported duration unit '{other}'; expected ms, s, m, or h"
                ));
            }
        };
        total += part;
        rest = next;
    }

    Ok(total)
}
