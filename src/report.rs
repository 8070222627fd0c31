use crate::analyzer::{AnalysisReport, RankedEntry};
use crate::error::{AnalyzerError, Result};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const KEY_WIDTH: usize = 20;
const RULE: &str = "----------------------------------------";
const CSV_ROW_END: &[u8] = b"\r\n";

/// One titled, two-column block of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub columns: [&'static str; 2],
    pub rows: Vec<RankedEntry>,
}

/// Lay out the report sections in their fixed order.
pub fn build_sections(report: &AnalysisReport) -> Vec<Section> {
    vec![
        Section {
            title: "Requests per IP",
            columns: ["IP Address", "Request Count"],
            rows: report.requests_per_ip.clone(),
        },
        Section {
            title: "Most Accessed Endpoint",
            columns: ["Endpoint", "Access Count"],
            rows: report.most_accessed.iter().cloned().collect(),
        },
        Section {
            title: "Suspicious Activity",
            columns: ["IP Address", "Failed Login Count"],
            rows: report.suspicious.clone(),
        },
    ]
}

/// Render the sections as plain text, exactly as printed without colour.
pub fn render_console(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|section| format_section(section, false))
        .collect()
}

/// Print the report to stdout, colouring section titles when enabled
pub fn print_report(sections: &[Section]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for section in sections {
        out.write_all(format_section(section, true).as_bytes())
            .map_err(AnalyzerError::Console)?;
    }
    out.flush().map_err(AnalyzerError::Console)
}

fn format_section(section: &Section, styled: bool) -> String {
    let heading = format!("=== {} ===", section.title);
    let heading = if styled {
        heading.cyan().bold().to_string()
    } else {
        heading
    };

    let mut text = format!(
        "\n{}\n{:<width$} {}\n{}\n",
        heading,
        section.columns[0],
        section.columns[1],
        RULE,
        width = KEY_WIDTH
    );
    for row in &section.rows {
        text.push_str(&format!("{:<width$} {}\n", row.key, row.count, width = KEY_WIDTH));
    }
    text
}

/// Write every section to a CSV file at `path`, replacing any previous file.
pub fn write_csv(sections: &[Section], path: &Path) -> Result<()> {
    let output_write = |source: csv::Error| AnalyzerError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(|e| output_write(e.into()))?;
    write_csv_to(sections, BufWriter::new(file)).map_err(output_write)
}

/// Write the CSV layout to any writer.
///
/// Each section is its header row, one row per entry, then an empty row.
pub fn write_csv_to<W: Write>(sections: &[Section], mut out: W) -> csv::Result<()> {
    for section in sections {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(&mut out);
        writer.write_record(section.columns)?;
        for row in &section.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        drop(writer);
        // The csv writer quotes empty records, so the separator goes out raw.
        out.write_all(CSV_ROW_END)?;
    }
    out.flush()?;
    Ok(())
}
