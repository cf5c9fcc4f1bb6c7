//! Report output for filter state
//!
//! This module renders the current filter tree and optional filter-pass
//! statistics as a small HTML report, and persists filter trees as JSON
//! snapshots.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::filter::Filter;
use crate::summary::TimelineSummary;

/// Report configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub title: String,
    pub include_stats: bool,
    pub include_generated_at: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Timeline Filter Report".to_string(),
            include_stats: true,
            include_generated_at: true,
        }
    }
}

/// Renders filter state to HTML, to files or other outputs
pub struct ReportWriter {
    config: ReportConfig,
}

impl ReportWriter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            config: ReportConfig {
                title: title.into(),
                ..Default::default()
            },
        }
    }

    /// Render the report document.
    pub fn render(&self, filter: &Filter, summary: Option<&TimelineSummary>) -> String {
        let mut html = String::new();

        html.push_str("<html><head><title>");
        html.push_str(&self.config.title);
        html.push_str("</title></head><body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", self.config.title));

        if self.config.include_generated_at {
            html.push_str(&format!(
                "<p>Generated at: {}</p>\n",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        html.push_str(&format!(
            "<p>Filters: {}</p>\n",
            filter.html_report_string()
        ));

        if self.config.include_stats {
            if let Some(summary) = summary {
                html.push_str("<ul>\n");
                html.push_str(&format!(
                    "<li>Total events: {}</li>\n",
                    summary.stats.total_events
                ));
                html.push_str(&format!(
                    "<li>Visible events: {}</li>\n",
                    summary.stats.visible_events
                ));
                html.push_str(&format!(
                    "<li>Hidden events: {} ({} known files)</li>\n",
                    summary.stats.hidden_events, summary.stats.hidden_known
                ));
                html.push_str("</ul>\n");

                if !summary.visible_by_type.is_empty() {
                    html.push_str("<h2>Visible events by type</h2>\n<ul>\n");
                    for (event_type, count) in &summary.visible_by_type {
                        html.push_str(&format!(
                            "<li>{}: {}</li>\n",
                            event_type.display_name(),
                            count
                        ));
                    }
                    html.push_str("</ul>\n");
                }
            }
        }

        html.push_str("</body></html>\n");
        html
    }

    /// Write the report to a file
    pub fn write_report<P: AsRef<Path>>(
        &self,
        filter: &Filter,
        summary: Option<&TimelineSummary>,
        output_path: P,
    ) -> Result<()> {
        fs::write(output_path.as_ref(), self.render(filter, summary))?;
        Ok(())
    }

    /// Write the report to a writer (for streaming or custom outputs)
    pub fn write_report_to<W: Write>(
        &self,
        writer: &mut W,
        filter: &Filter,
        summary: Option<&TimelineSummary>,
    ) -> Result<()> {
        writer.write_all(self.render(filter, summary).as_bytes())?;
        Ok(())
    }
}

/// Persist a filter tree as a JSON snapshot. Observers are view bindings
/// and are not serialized; a loaded tree starts with none registered.
pub fn save_snapshot<P: AsRef<Path>>(filter: &Filter, path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(filter)?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}

/// Load a filter tree from a JSON snapshot.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Filter> {
    let raw = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&raw)?)
}
