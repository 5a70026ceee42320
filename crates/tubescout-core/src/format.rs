//! Display helpers for counts and export filenames.

/// Compact human form of an optional count: `1.2M`, `3.4K`, `512`, or `N/A`.
#[must_use]
pub fn compact_count(n: Option<u64>) -> String {
    match n {
        None => "N/A".to_owned(),
        #[allow(clippy::cast_precision_loss)]
        Some(n) if n >= 1_000_000 => format!("{:.1}M", n as f64 / 1_000_000.0),
        #[allow(clippy::cast_precision_loss)]
        Some(n) if n >= 1_000 => format!("{:.1}K", n as f64 / 1_000.0),
        Some(n) => n.to_string(),
    }
}

/// Thousands-separated rendering of a count, e.g. `1234567` → `"1,234,567"`.
#[must_use]
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Reduce a query string to a filesystem-safe fragment: ASCII alphanumerics,
/// `_` and `-` pass through, everything else becomes `_`, capped at 50 chars.
#[must_use]
pub fn sanitize_filename(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(50)
        .collect()
}
