use access_log_report::config::{Config, DEFAULT_FAILED_LOGIN_THRESHOLD, DEFAULT_LOG_PATH};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Summarizes a web server access log and saves the results as CSV
#[derive(Parser, Debug)]
#[command(
    name = "access_log_report",
    author,
    version,
    about = "Reports requests per IP, the most accessed endpoint and suspicious failed-login activity"
)]
struct Args {
    /// Path to the access log to analyze
    #[arg(value_name = "LOG_FILE", default_value = DEFAULT_LOG_PATH)]
    file: PathBuf,

    /// Failed logins at which an IP is reported as suspicious
    #[arg(
        short = 't',
        long = "threshold",
        default_value_t = DEFAULT_FAILED_LOGIN_THRESHOLD,
        value_name = "COUNT"
    )]
    threshold: u64,

    /// Disable coloured section titles
    #[arg(long = "no-color")]
    no_color: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if args.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let config = Config::new(args.file).with_threshold(args.threshold);

    if let Err(e) = access_log_report::run(&config) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
