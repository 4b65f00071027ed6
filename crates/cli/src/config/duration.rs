// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Duration strings for recovery timings.
//!
//! Accepted units are `ms`, `s` (fractional allowed) and `m`, e.g. `"500ms"`,
//! `"1.5s"`, `"30s"`, `"1m"`.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Parse a duration string into a Duration.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let invalid = || format!("invalid duration: {s}");

    match unit.trim() {
        "ms" => number
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| invalid()),
        "s" => {
            let secs: f64 = number.parse().map_err(|_| invalid())?;
            Duration::try_from_secs_f64(secs).map_err(|_| invalid())
        }
        "m" => number
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_mul(60))
            .map(Duration::from_secs)
            .ok_or_else(invalid),
        "" => Err(format!("missing unit in duration: {s} (use 30s, 500ms, or 1m)")),
        _ => Err(format!(
            "invalid duration format: {s} (use 30s, 500ms, or 1m)"
        )),
    }
}

/// Parse a poll interval, which must be non-zero.
pub fn parse_interval(s: &str) -> Result<Duration, String> {
    let interval = parse_duration(s)?;
    if interval.is_zero() {
        return Err(format!("interval must be greater than zero: {}", s.trim()));
    }
    Ok(interval)
}

/// Deserialize an optional duration string.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| parse_duration(&s))
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// Deserialize an optional non-zero poll interval.
pub fn deserialize_interval_option<'de, D>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| parse_interval(&s))
        .transpose()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
