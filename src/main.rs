use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use cvscore::{
    batch::{self, BatchLine},
    config::Config,
    model::{RatingReport, Severity},
    output::{print_catalog, print_entries, print_report, OutputFormat},
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const CRITICAL_VULN: u8 = 2;
    pub const HIGH_VULN: u8 = 3;
    pub const MEDIUM_VULN: u8 = 4;
    pub const LOW_VULN: u8 = 5;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "cvscore")]
#[command(author, version, about = "Score CVSS 3.1 base vectors")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one or more vector strings
    Score {
        /// Vectors such as CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H
        #[arg(required = true)]
        vectors: Vec<String>,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Score a file of vectors, one per line, optionally followed by a label
    Batch {
        /// Input file; reads stdin when omitted or "-"
        file: Option<PathBuf>,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Exit with error if findings at or above this severity are present
        #[arg(long, value_enum)]
        fail_on: Option<FailLevel>,

        /// Do not apply the ignore list from the config file
        #[arg(long)]
        no_ignore: bool,
    },

    /// List CVSS 3.1 base metrics and their weights
    Metrics,

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FailLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl From<FailLevel> for Severity {
    fn from(level: FailLevel) -> Self {
        match level {
            FailLevel::Critical => Severity::Critical,
            FailLevel::High => Severity::High,
            FailLevel::Medium => Severity::Medium,
            FailLevel::Low => Severity::Low,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<u8> {
    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config file");
        Config::default()
    });
    debug!(path = %Config::config_path().display(), "configuration loaded");

    match cli.command {
        Commands::Score { vectors, format } => {
            let format = resolve_format(format, &config)?;
            run_score(&vectors, format)
        }
        Commands::Batch {
            file,
            format,
            fail_on,
            no_ignore,
        } => {
            let format = resolve_format(format, &config)?;
            let fail_on = fail_on.map(Severity::from).or(config.fail_on);
            let ignore = if no_ignore {
                Default::default()
            } else {
                config.ignore.clone()
            };

            let input = batch::read_input(file.as_deref())?;
            let report = batch::rate_document(&input, &ignore);
            info!(
                entries = report.entries.len(),
                errors = report.error_count(),
                "batch rated"
            );

            print_report(&report, format)?;
            Ok(determine_exit_code(&report, fail_on))
        }
        Commands::Metrics => {
            print_catalog();
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn resolve_format(flag: Option<String>, config: &Config) -> Result<OutputFormat> {
    let format = flag.unwrap_or_else(|| config.default_format.clone());
    OutputFormat::from_str(&format).map_err(|e| anyhow::anyhow!(e))
}

fn run_score(vectors: &[String], format: OutputFormat) -> Result<u8> {
    let entries: Vec<_> = vectors
        .iter()
        .enumerate()
        .map(|(idx, vector)| {
            batch::rate_line(&BatchLine {
                line: idx + 1,
                vector: vector.trim(),
                label: None,
            })
        })
        .collect();

    print_entries(&entries, format)?;

    if entries.iter().any(|e| e.is_error()) {
        Ok(exit_codes::ERROR)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Determine the exit code based on the worst finding and --fail-on setting
fn determine_exit_code(report: &RatingReport, fail_on: Option<Severity>) -> u8 {
    let Some(threshold) = fail_on else {
        return exit_codes::SUCCESS;
    };

    match report.highest_severity() {
        Some(worst) if worst >= threshold => match worst {
            Severity::Critical => exit_codes::CRITICAL_VULN,
            Severity::High => exit_codes::HIGH_VULN,
            Severity::Medium => exit_codes::MEDIUM_VULN,
            Severity::Low => exit_codes::LOW_VULN,
            Severity::None => exit_codes::SUCCESS,
        },
        _ => exit_codes::SUCCESS,
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'cvscore config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvscore::config::IgnoreConfig;

    fn report(doc: &str) -> RatingReport {
        batch::rate_document(doc, &IgnoreConfig::default())
    }

    #[test]
    fn test_exit_code_without_fail_on() {
        let r = report("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H");
        assert_eq!(determine_exit_code(&r, None), exit_codes::SUCCESS);
    }

    #[test]
    fn test_exit_code_reports_worst_finding() {
        let r = report(
            "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H\n\
             CVSS:3.1/AV:P/AC:H/PR:H/UI:R/S:U/C:L/I:N/A:N",
        );
        assert_eq!(
            determine_exit_code(&r, Some(Severity::Low)),
            exit_codes::CRITICAL_VULN
        );
        assert_eq!(
            determine_exit_code(&r, Some(Severity::Critical)),
            exit_codes::CRITICAL_VULN
        );
    }

    #[test]
    fn test_exit_code_below_threshold() {
        let r = report("CVSS:3.1/AV:L/AC:L/PR:L/UI:N/S:U/C:H/I:H/A:H");
        assert_eq!(
            determine_exit_code(&r, Some(Severity::Critical)),
            exit_codes::SUCCESS
        );
        assert_eq!(
            determine_exit_code(&r, Some(Severity::High)),
            exit_codes::HIGH_VULN
        );
    }

    #[test]
    fn test_exit_code_ignores_zero_scores() {
        let r = report("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N");
        assert_eq!(
            determine_exit_code(&r, Some(Severity::Low)),
            exit_codes::SUCCESS
        );
    }

    #[test]
    fn test_fail_level_conversion() {
        assert_eq!(Severity::from(FailLevel::Medium), Severity::Medium);
        assert_eq!(Severity::from(FailLevel::Low), Severity::Low);
    }

    #[test]
    fn test_cli_parses_batch_flags() {
        let cli = Cli::try_parse_from(["cvscore", "-vv", "batch", "findings.txt", "--fail-on", "high"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Batch { file, fail_on, .. } => {
                assert_eq!(file, Some(PathBuf::from("findings.txt")));
                assert!(matches!(fail_on, Some(FailLevel::High)));
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_cli_score_requires_vector() {
        assert!(Cli::try_parse_from(["cvscore", "score"]).is_err());
    }
}
