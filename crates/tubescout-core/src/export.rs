//! Flat-file export of discovery reports (CSV and JSON).

use crate::channel::ChannelReport;

const CSV_HEADER: &[&str] = &[
    "Channel",
    "URL",
    "Subscribers",
    "Avg Views",
    "Video Count",
    "Niche",
    "Why Partner Fit",
];

/// Render reports as CSV with a fixed header row.
///
/// Unknown counts render as empty cells. Fields containing commas, quotes,
/// or line breaks are quoted per RFC 4180.
#[must_use]
pub fn reports_to_csv(reports: &[ChannelReport]) -> String {
    let mut out = String::new();
    write_row(&mut out, CSV_HEADER.iter().map(|s| (*s).to_owned()));
    for report in reports {
        let ch = &report.channel;
        let analysis = report.analysis.as_ref();
        write_row(
            &mut out,
            [
                ch.name.clone(),
                ch.url.clone(),
                count_cell(ch.subscriber_count),
                count_cell(ch.average_recent_views),
                count_cell(ch.video_count),
                analysis.map(|a| a.niche.clone()).unwrap_or_default(),
                analysis
                    .map(|a| a.why_partner_fit.clone())
                    .unwrap_or_default(),
            ]
            .into_iter(),
        );
    }
    out
}

/// Render reports as pretty-printed JSON.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails (it cannot for these
/// types in practice, but the signature keeps the fallibility explicit).
pub fn reports_to_json(reports: &[ChannelReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

fn count_cell(n: Option<u64>) -> String {
    n.map(|v| v.to_string()).unwrap_or_default()
}

fn write_row(out: &mut String, fields: impl Iterator<Item = String>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&csv_field(&field));
    }
    out.push_str("\r\n");
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
