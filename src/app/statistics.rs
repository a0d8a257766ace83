//! Result printing.

use colored::*;
use strum::IntoEnumIterator;

use crate::lookup::{LookupOutcome, OutcomeKind};
use crate::CheckReport;

const TABLE_HEADERS: [&str; 3] = ["NAME", "STATUS", "TXT"];
const COLUMN_GAP: &str = "  ";

/// Renders listings as a left-aligned three-column table with a header row.
///
/// Every line ends without trailing whitespace.
pub fn render_listing_table(listings: &[LookupOutcome]) -> String {
    let rows: Vec<[&str; 3]> = listings
        .iter()
        .map(|l| {
            [
                l.provider_url.as_str(),
                l.result_address.as_str(),
                l.txt_detail.as_str(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let underline = TABLE_HEADERS.map(|h| "-".repeat(h.len()));
    let underline = [
        underline[0].as_str(),
        underline[1].as_str(),
        underline[2].as_str(),
    ];

    let mut out = String::new();
    for row in std::iter::once(&TABLE_HEADERS)
        .chain(std::iter::once(&underline))
        .chain(rows.iter())
    {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Builds the summary lines (one per counter) of a finished check.
pub fn summary_lines(report: &CheckReport, timeout_seconds: u64) -> Vec<String> {
    let mut lines = vec![format!(
        "took {:.3} seconds for {} providers",
        report.elapsed_seconds, report.provider_count
    )];
    for kind in OutcomeKind::iter() {
        let count = report.tally.count(kind);
        let line = match kind {
            OutcomeKind::Listed => format!("{} times listed", count.to_string().red()),
            OutcomeKind::NotListed => format!("{} times not listed", count.to_string().green()),
            OutcomeKind::TimedOut => format!(
                "{} timeouts (with {} seconds value)",
                count.to_string().yellow(),
                timeout_seconds
            ),
            OutcomeKind::Skipped => {
                if count == 0 {
                    continue;
                }
                format!("{} skipped (URI lists need a hostname)", count.to_string().yellow())
            }
            OutcomeKind::Disabled => {
                if count == 0 {
                    continue;
                }
                format!("{} disabled", count.to_string().dimmed())
            }
        };
        lines.push(line);
    }
    if report.ignored_providers > 0 {
        lines.push(format!(
            "{} unparseable provider lines ignored",
            report.ignored_providers.to_string().yellow()
        ));
    }
    lines
}

/// Prints the final report to stdout.
pub fn print_report(report: &CheckReport, timeout_seconds: u64) {
    let target = &report.target;
    match (&report.ptr, target.has_host()) {
        (_, true) => println!("Checked host: {} ({})", target.host.bold(), target.ip),
        (Some(ptr), false) => println!("Checked IP: {} (PTR {})", target.ip.bold(), ptr),
        (None, false) => println!("Checked IP: {}", target.ip.bold()),
    }
    println!();

    for line in summary_lines(report, timeout_seconds) {
        println!("{line}");
    }

    if !report.tally.listings.is_empty() {
        println!();
        println!("{}", "########## LISTED ##########".yellow());
        print!("{}", render_listing_table(&report.tally.listings));
    }
}
