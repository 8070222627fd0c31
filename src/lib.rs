//! Batch reporting over web server access logs.
//!
//! One pass over the log builds three tallies: requests per source address,
//! hits per endpoint and failed logins per address. From those the report
//! shows every address by volume, the single most accessed endpoint, and the
//! addresses whose failed logins reach a threshold. The report is printed to
//! stdout and then saved as a CSV snapshot.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;

pub use analyzer::{AnalysisReport, LogTallies, RankedEntry, Tally};
pub use config::Config;
pub use error::{AnalyzerError, Result};

/// Read and tally the configured log, then rank the results.
pub fn analyze(config: &Config) -> Result<AnalysisReport> {
    let tallies = analyzer::analyze_file(&config.log_path)?;
    if tallies.lines_matched == 0 {
        log::warn!(
            "no access log records recognized in '{}'",
            config.log_path.display()
        );
    }
    Ok(AnalysisReport::from_tallies(
        &tallies,
        config.failed_login_threshold,
    ))
}

/// Run the whole report: analyze, print to stdout, then write the CSV.
///
/// Nothing is printed if the log cannot be read. If the CSV cannot be
/// written the printed report stays on screen and the error is returned.
pub fn run(config: &Config) -> Result<AnalysisReport> {
    let analysis = analyze(config)?;
    let sections = report::build_sections(&analysis);

    report::print_report(&sections)?;
    report::write_csv(&sections, &config.csv_path)?;
    log::info!("results saved to '{}'", config.csv_path.display());

    Ok(analysis)
}
