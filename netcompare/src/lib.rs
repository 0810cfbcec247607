//! NetCompare - pin-level connectivity comparison of KiCad netlists
//!
//! This library parses two KiCad `.net` exports, buckets their components
//! into functional categories, and checks pin by pin that every pin of the
//! first board sits on a net with the same name on the second board.
//!
//! # Quick Start
//!
//! ```no_run
//! use netcompare::{CompareOptions, NetCompareCore};
//! use std::path::Path;
//!
//! let report = NetCompareCore::compare_files(
//!     Path::new("rev_a.net"),
//!     Path::new("rev_b.net"),
//!     CompareOptions::default(),
//! ).unwrap();
//!
//! for row in report.rows.iter().filter(|r| !r.is_match()) {
//!     println!("{} pin {}: {} -> {}", row.ref1, row.pin1, row.net1_name, row.net2_name);
//! }
//! ```
//!
//! # Features
//!
//! - **Netlist parsing**: section-aware line reader, lossy on malformed lines
//! - **Component statistics**: 12 categories from reference prefixes
//! - **Connectivity diff**: `(ref, pin)` keyed, mismatches first
//! - **Reports**: HTML and JSON

pub mod analyzer;
pub mod core;
pub mod parser;
pub mod report;

// Re-export main types
pub use crate::analyzer::classifier::{classify, classify_set, Category, ComponentStats};
pub use crate::analyzer::connectivity::{compare, Comparison, DiffMode, DiffRow, MatchClass};
pub use crate::core::{Board, CompareOptions, NetCompareCore, NetCompareError};
pub use crate::parser::netlist::{ComponentSet, NetList, NetlistParser, ParsedNetlist};
pub use crate::report::{write_report, ComparisonReport, ReportFormat};

/// Parse a netlist file (convenience wrapper).
pub fn parse_netlist(path: &std::path::Path) -> Result<ParsedNetlist, NetCompareError> {
    NetlistParser::parse_file(path)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Category, CompareOptions, ComparisonReport, DiffMode, DiffRow, MatchClass,
        NetCompareCore, NetCompareError, ReportFormat,
    };
}
