//! Compare two netlists and print the mismatched pins.

use netcompare::prelude::*;
use std::path::Path;

fn main() -> Result<(), NetCompareError> {
    let mut args = std::env::args().skip(1);
    let (Some(first), Some(second)) = (args.next(), args.next()) else {
        eprintln!("Usage: cargo run --example compare_boards <rev_a.net> <rev_b.net>");
        std::process::exit(1);
    };

    let report = NetCompareCore::compare_files(
        Path::new(&first),
        Path::new(&second),
        CompareOptions::default(),
    )?;

    println!("Comparing {} against {}", report.file1_name, report.file2_name);
    println!(
        "Matched: {}, mismatched: {}",
        report.total_matched, report.total_mismatched
    );
    println!();

    for row in report.rows.iter().filter(|r| r.class == MatchClass::Mismatch) {
        println!(
            "  {:<8} pin {:<4} {} -> {}",
            row.ref1, row.pin1, row.net1_name, row.net2_name
        );
    }

    if !report.is_identical() {
        println!("\nNetlists differ.");
        std::process::exit(1);
    }

    println!("\nNetlists are identical.");
    Ok(())
}
