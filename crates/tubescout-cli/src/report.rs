//! Console table rendering and result-file output.

use std::path::Path;

use tubescout_core::export::{reports_to_csv, reports_to_json};
use tubescout_core::format::{compact_count, sanitize_filename};
use tubescout_core::ChannelReport;

const NAME_WIDTH: usize = 25;
const NICHE_WIDTH: usize = 15;
const FIT_WIDTH: usize = 50;

/// Renders the discovery table to a string (one row per channel).
#[must_use]
pub fn render_table(reports: &[ChannelReport]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<NAME_WIDTH$}  {:>8}  {:>9}  {:<NICHE_WIDTH$}  {:<FIT_WIDTH$}\n",
        "Channel", "Subs", "Avg Views", "Niche", "Why Partner Fit"
    ));
    out.push_str(&format!(
        "{}\n",
        "-".repeat(NAME_WIDTH + NICHE_WIDTH + FIT_WIDTH + 8 + 9 + 8)
    ));
    for report in reports {
        let ch = &report.channel;
        let (niche, fit) = report
            .analysis
            .as_ref()
            .map_or(("N/A", "N/A"), |a| (a.niche.as_str(), a.why_partner_fit.as_str()));
        out.push_str(&format!(
            "{:<NAME_WIDTH$}  {:>8}  {:>9}  {:<NICHE_WIDTH$}  {:<FIT_WIDTH$}\n",
            truncate(&ch.name, NAME_WIDTH),
            compact_count(ch.subscriber_count),
            compact_count(ch.average_recent_views),
            truncate(niche, NICHE_WIDTH),
            truncate(fit, FIT_WIDTH),
        ));
    }
    out
}

/// Default results filename: `results_<query>_<timestamp>.json`.
#[must_use]
pub fn default_json_filename(query: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("results_{}_{timestamp}.json", sanitize_filename(query))
}

pub fn save_json(reports: &[ChannelReport], path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, reports_to_json(reports)?)?;
    Ok(())
}

pub fn save_csv(reports: &[ChannelReport], path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, reports_to_csv(reports))?;
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_owned()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
