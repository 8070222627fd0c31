use std::path::PathBuf;

/// Log file analyzed when none is given
pub const DEFAULT_LOG_PATH: &str = "sample.log";

/// Failed logins an address needs before it is reported as suspicious
pub const DEFAULT_FAILED_LOGIN_THRESHOLD: u64 = 3;

/// Where the CSV snapshot is written; overwritten on every run
pub const RESULTS_CSV_PATH: &str = "log_analysis_results.csv";

/// Settings for one reporting run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Access log to read
    pub log_path: PathBuf,
    /// Minimum failed-login count (inclusive) for the suspicious section
    pub failed_login_threshold: u64,
    /// Destination of the CSV snapshot
    pub csv_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            failed_login_threshold: DEFAULT_FAILED_LOGIN_THRESHOLD,
            csv_path: PathBuf::from(RESULTS_CSV_PATH),
        }
    }
}

impl Config {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Config {
            log_path: log_path.into(),
            ..Config::default()
        }
    }

    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.failed_login_threshold = threshold;
        self
    }

    pub fn with_csv_path(mut self, csv_path: impl Into<PathBuf>) -> Self {
        self.csv_path = csv_path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.log_path, PathBuf::from("sample.log"));
        assert_eq!(config.failed_login_threshold, 3);
        assert_eq!(config.csv_path, PathBuf::from("log_analysis_results.csv"));
    }

    #[test]
    fn builders_override_single_fields() {
        let config = Config::new("access.log").with_threshold(5);
        assert_eq!(config.log_path, PathBuf::from("access.log"));
        assert_eq!(config.failed_login_threshold, 5);
        assert_eq!(config.csv_path, PathBuf::from(RESULTS_CSV_PATH));
    }
}
