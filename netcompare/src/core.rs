//! Core comparison logic shared by the CLI and library users.
//! No rendering or terminal dependencies.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::analyzer::classifier::{classify_set, ComponentStats};
use crate::analyzer::connectivity::{compare_with_mode, DiffMode};
use crate::parser::netlist::{NetlistParser, ParsedNetlist};
use crate::report::ComparisonReport;

#[derive(Debug, thiserror::Error)]
pub enum NetCompareError {
    #[error("Cannot read netlist {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot write report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Options for a comparison run (CLI or library).
#[derive(Clone, Debug, Default)]
pub struct CompareOptions {
    pub mode: DiffMode,
}

/// One parsed and classified netlist.
#[derive(Debug, Clone)]
pub struct Board {
    pub path: PathBuf,
    pub netlist: ParsedNetlist,
    pub stats: ComponentStats,
}

impl Board {
    pub fn from_parsed(path: &Path, netlist: ParsedNetlist) -> Self {
        let stats = classify_set(&netlist.components);
        Self {
            path: path.to_path_buf(),
            netlist,
            stats,
        }
    }

    pub fn file_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Core comparison API used by the CLI.
pub struct NetCompareCore;

impl NetCompareCore {
    /// Parse and classify a single netlist file.
    pub fn load_board(path: &Path) -> Result<Board, NetCompareError> {
        let netlist = NetlistParser::parse_file(path)?;
        Ok(Board::from_parsed(path, netlist))
    }

    /// Compare two already loaded boards. Board `a` drives the comparison.
    pub fn compare_boards(a: &Board, b: &Board, options: &CompareOptions) -> ComparisonReport {
        let comparison = compare_with_mode(&a.netlist.nets, &b.netlist.nets, options.mode);
        info!(
            "{} vs {}: {} matched, {} mismatched, {} only in second",
            a.path.display(),
            b.path.display(),
            comparison.total_matched,
            comparison.total_mismatched,
            comparison.total_only_in_b
        );
        ComparisonReport::new(a, b, comparison)
    }

    /// Load both files and compare them. Either file failing to load aborts
    /// the run.
    pub fn compare_files(
        a: &Path,
        b: &Path,
        options: CompareOptions,
    ) -> Result<ComparisonReport, NetCompareError> {
        let board_a = Self::load_board(a)?;
        let board_b = Self::load_board(b)?;
        Ok(Self::compare_boards(&board_a, &board_b, &options))
    }
}
