use crate::Lead;
use aura_core::AuraResult;
use chrono::{NaiveDate, Utc};
use std::borrow::Borrow;
use std::path::{Path, PathBuf};

pub const EXPORT_HEADER: &str = "Name,Company,Email,Value,Status,Tags";

/// Writes leads as CSV text or files.
pub struct LeadExporter;

impl LeadExporter {
    /// Render leads in the given order. Lines are `\n`-separated with no
    /// trailing newline; the tags cell is always quoted and `;`-joined.
    pub fn export_csv<T: Borrow<Lead>>(leads: &[T]) -> String {
        let mut lines = Vec::with_capacity(leads.len() + 1);
        lines.push(EXPORT_HEADER.to_string());
        for lead in leads {
            lines.push(Self::row(lead.borrow()));
        }
        lines.join("\n")
    }

    fn row(lead: &Lead) -> String {
        let tags = lead.tags.join(";").replace('"', "\"\"");
        format!(
            "{},{},{},{},{},\"{}\"",
            csv_escape(&lead.name),
            csv_escape(&lead.company),
            csv_escape(&lead.email),
            lead.value,
            lead.status,
            tags
        )
    }

    /// `<prefix>_<YYYY-MM-DD>.csv`
    pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
        format!("{}_{}.csv", prefix, date.format("%Y-%m-%d"))
    }

    /// Write the export into `dir` under today's (UTC) file name and return
    /// the written path.
    pub fn export_to_dir<T: Borrow<Lead>>(
        dir: &Path,
        prefix: &str,
        leads: &[T],
    ) -> AuraResult<PathBuf> {
        let path = dir.join(Self::export_file_name(prefix, Utc::now().date_naive()));
        std::fs::write(&path, Self::export_csv(leads))?;
        tracing::info!("Exported {} leads to {}", leads.len(), path.display());
        Ok(path)
    }
}

/// Quote a cell when it contains a comma, quote or line break.
pub fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
