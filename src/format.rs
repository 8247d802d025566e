//! Compact currency formatting.
//!
//! One shared formatter feeds the bar chart's axis ticks, the treemap
//! tooltip, and the treemap cell labels, so the three surfaces can never
//! drift apart.

use num_format::{Locale, ToFormattedString};

/// Magnitude buckets, largest first.
const SUFFIXES: [(f64, &str); 4] = [(1.0e12, "T"), (1.0e9, "B"), (1.0e6, "M"), (1.0e3, "K")];

/// Format a value as a compact USD string: `$1.3M`, `$990K`, `$12.5K`,
/// `$0`, `-$2.5B`. At most one fractional digit; a trailing `.0` is
/// trimmed. Rounding that reaches 1000 carries into the next magnitude
/// (`999,950` -> `$1M`).
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    for (i, (scale, suffix)) in SUFFIXES.iter().enumerate() {
        if abs >= *scale {
            let scaled = round1(abs / scale);
            if scaled >= 1000.0 && i > 0 {
                let (up_scale, up_suffix) = SUFFIXES[i - 1];
                return format!("{sign}${}{}", trim1(round1(abs / up_scale)), up_suffix);
            }
            return format!("{sign}${}{}", trim1(scaled), suffix);
        }
    }
    let scaled = round1(abs);
    if scaled >= 1000.0 {
        // 999.99 rounds across the thousands boundary
        return format!("{sign}${}K", trim1(round1(abs / 1.0e3)));
    }
    format!("{sign}${}", trim1(scaled))
}

/// Format a value as an exact, thousands-grouped USD amount
/// (`$1,250,000`), rounded to whole dollars. Used by the CLI summary.
pub fn format_usd_exact(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let whole = value.abs().round() as i64;
    format!("{sign}${}", whole.to_formatted_string(&Locale::en))
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Render with one fractional digit, trimming a trailing `.0`.
fn trim1(v: f64) -> String {
    let s = format!("{:.1}", v);
    match s.strip_suffix(".0") {
        Some(t) => t.to_string(),
        None => s,
    }
}
