//! Comparison Report
//!
//! The plain in-memory record handed to renderers: per-board category
//! statistics plus the ordered diff rows. Rendering reads the report and
//! never mutates it, so a failed write leaves the computed data intact.

mod html;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::analyzer::classifier::ComponentStats;
use crate::analyzer::connectivity::{Comparison, DiffRow};
use crate::core::{Board, NetCompareError};

pub use html::render_html;

/// Per-board summary.
#[derive(Debug, Clone, Serialize)]
pub struct BoardReport {
    pub file_name: String,
    pub stats: ComponentStats,
    pub net_count: usize,
    pub node_count: usize,
    /// Distinct references wired into at least one net.
    pub wired_refs: usize,
}

impl BoardReport {
    pub fn from_board(board: &Board) -> Self {
        Self {
            file_name: board.file_name(),
            stats: board.stats.clone(),
            net_count: board.netlist.nets.len(),
            node_count: board.netlist.nets.node_count(),
            wired_refs: board.netlist.refs.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub file1_name: String,
    pub file2_name: String,
    pub generated_at: DateTime<Utc>,
    pub board1: BoardReport,
    pub board2: BoardReport,
    pub rows: Vec<DiffRow>,
    pub total_matched: usize,
    pub total_mismatched: usize,
    pub total_only_in_b: usize,
}

impl ComparisonReport {
    pub fn new(a: &Board, b: &Board, comparison: Comparison) -> Self {
        let Comparison {
            rows,
            total_matched,
            total_mismatched,
            total_only_in_b,
        } = comparison;
        Self {
            file1_name: a.file_name(),
            file2_name: b.file_name(),
            generated_at: Utc::now(),
            board1: BoardReport::from_board(a),
            board2: BoardReport::from_board(b),
            rows,
            total_matched,
            total_mismatched,
            total_only_in_b,
        }
    }

    pub fn is_identical(&self) -> bool {
        self.total_mismatched == 0 && self.total_only_in_b == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
}

impl ReportFormat {
    /// `.json` outputs are JSON, anything else is HTML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Html,
        }
    }
}

pub fn render(report: &ComparisonReport, format: ReportFormat) -> Result<String, NetCompareError> {
    match format {
        ReportFormat::Html => render_html(report),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Render fully in memory, then write.
pub fn write_report(
    report: &ComparisonReport,
    path: &Path,
    format: ReportFormat,
) -> Result<(), NetCompareError> {
    let rendered = render(report, format)?;
    std::fs::write(path, rendered).map_err(|source| NetCompareError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {:?} report to {}", format, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ReportFormat::from_path(&PathBuf::from("out.json")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_path(&PathBuf::from("OUT.JSON")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_path(&PathBuf::from("out.html")), ReportFormat::Html);
        assert_eq!(ReportFormat::from_path(&PathBuf::from("report")), ReportFormat::Html);
    }
}
