#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Per-person point totals.
pub mod aggregate;
/// Deduplication of superseded acknowledgements.
pub mod filter;
/// Retrieval of the commit log.
pub mod log;
/// Commit message grammar and line classification.
pub mod parser;
/// Pass/fail projection.
pub mod projection;
/// Acknowledgement records.
pub mod record;
/// Table and CSV output.
pub mod report;

pub use aggregate::{PersonTotals, Roster};
pub use filter::latest_acknowledgements;
pub use log::{LogError, git_log, read_log_file};
pub use parser::{CommitRecordParser, LineOutcome, ParseError};
pub use projection::{Projection, Standing};
pub use record::Acknowledgement;
pub use report::{Palette, ReportOptions, render_csv, render_table};

use crate::config::{Exemptions, GradingPolicy};

/// Parses a newest-first commit log, drops superseded acknowledgements and
/// totals up the rest.
pub fn collect(
    log: &str,
    policy: &GradingPolicy,
    exemptions: &Exemptions,
) -> Result<Roster, ParseError> {
    let acknowledgements = CommitRecordParser::new(policy, exemptions).parse_log(log)?;
    Ok(latest_acknowledgements(acknowledgements).collect())
}
