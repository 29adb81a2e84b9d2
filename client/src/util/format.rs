//! Display formatting for table cells and cards.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Placeholder for absent values.
pub const EMPTY_CELL: &str = "-";

/// `$1,234.50`; negative amounts keep their sign in front.
#[must_use]
pub fn money(amount: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `2024-05-01T08:30:12Z` -> `2024-05-01 08:30`. Anything unparseable is
/// returned unchanged.
#[must_use]
pub fn timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return EMPTY_CELL.to_owned();
    }
    match raw.split_once('T') {
        Some((date, time)) if date.len() == 10 => match time.get(..5) {
            Some(hours_minutes) => format!("{date} {hours_minutes}"),
            None => raw.to_owned(),
        },
        _ => raw.to_owned(),
    }
}

#[must_use]
pub fn optional_timestamp(raw: Option<&str>) -> String {
    raw.map_or_else(|| EMPTY_CELL.to_owned(), timestamp)
}

#[must_use]
pub fn distance_km(km: f64) -> String {
    format!("{km:.1} km")
}

#[must_use]
pub fn battery(pct: Option<u8>) -> String {
    pct.map_or_else(|| EMPTY_CELL.to_owned(), |p| format!("{p}%"))
}

#[must_use]
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(EMPTY_CELL)
}
