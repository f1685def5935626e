use std::collections::HashSet;

use anyhow::{Context, Result};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use tweetlens_common::OutputFormat;
use tweetlens_social::twitter::Timespan;

/// What a subcommand produced. Absent sections are left out of both renderings.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweets: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timespan: Option<Timespan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Vec<String>>,
}

/// Mention sets have no order; sort them so output is stable between runs.
pub fn sorted(users: HashSet<String>) -> Vec<String> {
    let mut users: Vec<String> = users.into_iter().collect();
    users.sort_unstable();
    users
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("failed to encode report as JSON")
            }
            OutputFormat::Text => self.render_text(),
        }
    }

    fn render_text(&self) -> Result<String> {
        let mut lines = Vec::new();
        if let Some(count) = self.tweets {
            lines.push(format!("tweets:   {count}"));
        }
        if let Some(span) = &self.timespan {
            lines.push(format!(
                "timespan: {} .. {}",
                span.start().format(&Rfc3339)?,
                span.end().format(&Rfc3339)?
            ));
        }
        if let Some(users) = &self.mentions {
            if users.is_empty() {
                lines.push("mentions: (none)".to_string());
            } else {
                lines.push(format!("mentions: {}", users.join(", ")));
            }
        }
        Ok(lines.join("\n"))
    }
}
