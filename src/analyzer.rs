use crate::error::{AnalyzerError, Result};
use crate::parser::{self, ParsedEntry};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// A key and its count, as shown in one report row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: u64,
}

impl RankedEntry {
    fn new(key: &str, count: u64) -> Self {
        RankedEntry {
            key: key.to_string(),
            count,
        }
    }
}

/// Counter map that remembers the order in which keys were first seen.
///
/// Discovery order is what breaks ties between equal counts, so the report
/// is identical across runs over the same input.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    slots: HashMap<String, usize>,
    counts: Vec<(String, u64)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    pub fn add(&mut self, key: &str, n: u64) {
        match self.slots.get(key) {
            Some(&slot) => self.counts[slot].1 += n,
            None => {
                self.slots.insert(key.to_string(), self.counts.len());
                self.counts.push((key.to_string(), n));
            }
        }
    }

    /// Count for `key`, zero if it was never seen
    pub fn get(&self, key: &str) -> u64 {
        self.slots.get(key).map_or(0, |&slot| self.counts[slot].1)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Entries in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(key, n)| (key.as_str(), *n))
    }

    /// Fold another tally into this one, key by key.
    ///
    /// Keys new to `self` are appended in `other`'s discovery order.
    pub fn merge(&mut self, other: &Tally) {
        for (key, n) in other.iter() {
            self.add(key, n);
        }
    }

    /// All entries by count, highest first; equal counts keep discovery order.
    pub fn ranked(&self) -> Vec<RankedEntry> {
        let mut entries: Vec<RankedEntry> = self
            .iter()
            .map(|(key, n)| RankedEntry::new(key, n))
            .collect();
        // stable
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }

    /// The highest count; on a tie the key seen first wins.
    pub fn most_frequent(&self) -> Option<RankedEntry> {
        self.iter()
            .fold(None::<(&str, u64)>, |best, (key, n)| match best {
                Some((_, best_n)) if best_n >= n => best,
                _ => Some((key, n)),
            })
            .map(|(key, n)| RankedEntry::new(key, n))
    }
}

/// The three tallies built from one pass over a log, plus line counters
#[derive(Debug, Clone, Default)]
pub struct LogTallies {
    pub requests_per_ip: Tally,
    pub endpoint_hits: Tally,
    pub failed_logins: Tally,
    pub lines_read: u64,
    pub lines_matched: u64,
}

impl LogTallies {
    /// Combine the tallies of two disjoint slices of the same log
    pub fn merge(&mut self, other: &LogTallies) {
        self.requests_per_ip.merge(&other.requests_per_ip);
        self.endpoint_hits.merge(&other.endpoint_hits);
        self.failed_logins.merge(&other.failed_logins);
        self.lines_read += other.lines_read;
        self.lines_matched += other.lines_matched;
    }
}

/// Folds log lines into `LogTallies`, one line at a time
#[derive(Debug, Default)]
pub struct Aggregator {
    tallies: LogTallies,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one raw line (without its line ending).
    ///
    /// Returns `false` if the line was not recognized; nothing is counted then.
    pub fn observe(&mut self, line: &str) -> bool {
        self.tallies.lines_read += 1;
        match parser::parse_log_line(line) {
            Some(entry) => {
                self.record(&entry, line);
                true
            }
            None => false,
        }
    }

    fn record(&mut self, entry: &ParsedEntry<'_>, line: &str) {
        self.tallies.lines_matched += 1;
        self.tallies.requests_per_ip.increment(entry.ip);
        self.tallies.endpoint_hits.increment(entry.endpoint);
        if parser::is_failed_login(entry, line) {
            self.tallies.failed_logins.increment(entry.ip);
        }
    }

    pub fn lines_read(&self) -> u64 {
        self.tallies.lines_read
    }

    pub fn finish(self) -> LogTallies {
        self.tallies
    }
}

/// Read every line of `reader` and tally the recognized ones.
///
/// Bytes that are not valid UTF-8 are replaced before matching rather than
/// failing the read.
pub fn analyze_reader<R: BufRead>(mut reader: R) -> io::Result<LogTallies> {
    let mut aggregator = Aggregator::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(strip_line_ending(&buf));
        if !aggregator.observe(&line) {
            log::debug!(
                "skipping unrecognized line {}: {:?}",
                aggregator.lines_read(),
                line.chars().take(80).collect::<String>()
            );
        }
    }

    let tallies = aggregator.finish();
    log::info!(
        "matched {} of {} lines ({} addresses, {} endpoints)",
        tallies.lines_matched,
        tallies.lines_read,
        tallies.requests_per_ip.len(),
        tallies.endpoint_hits.len()
    );
    Ok(tallies)
}

/// Open `path` and tally it. The file is closed before this returns.
pub fn analyze_file(path: &Path) -> Result<LogTallies> {
    let unavailable = |source: io::Error| AnalyzerError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unavailable)?;
    analyze_reader(BufReader::new(file)).map_err(unavailable)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Addresses whose failed-login count is at least `threshold`, highest first.
pub fn suspicious(failed_logins: &Tally, threshold: u64) -> Vec<RankedEntry> {
    failed_logins
        .ranked()
        .into_iter()
        .filter(|entry| entry.count >= threshold)
        .collect()
}

/// The finished, ranked views over a set of tallies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub requests_per_ip: Vec<RankedEntry>,
    /// `None` only when no line matched
    pub most_accessed: Option<RankedEntry>,
    pub suspicious: Vec<RankedEntry>,
    pub failed_login_threshold: u64,
}

impl AnalysisReport {
    pub fn from_tallies(tallies: &LogTallies, failed_login_threshold: u64) -> Self {
        AnalysisReport {
            requests_per_ip: tallies.requests_per_ip.ranked(),
            most_accessed: tallies.endpoint_hits.most_frequent(),
            suspicious: suspicious(&tallies.failed_logins, failed_login_threshold),
            failed_login_threshold,
        }
    }
}
