//! Remessa CLI - fixed-decimal normalization for remittance spreadsheets

mod logging;
mod summary;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use remessa::prelude::*;
use remessa::{normalize_with_outcome, CellAddress};
use tracing::{debug, error, info, warn};

use crate::summary::{conversion_line, workbook_info};

#[derive(Parser)]
#[command(name = "remessa")]
#[command(
    author,
    version,
    about = "Rewrite value columns of remittance spreadsheets as fixed-decimal text"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize spreadsheets and write `<name>_fixed.<ext>` copies
    Convert {
        /// Input files (xlsx, xlsm, csv)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for converted files (default: next to each input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// JSON file with normalization settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Value columns as letters, e.g. K,L,M
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Digits after the decimal comma
        #[arg(long)]
        decimals: Option<usize>,

        /// CSV field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Show information about a spreadsheet
    Info {
        /// Input spreadsheet file
        input: PathBuf,
    },

    /// Normalize a single value, as it would be in the given column
    Value {
        /// Raw cell text
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Column letter
        #[arg(short, long, default_value = "K")]
        column: String,

        /// Digits after the decimal comma
        #[arg(long)]
        decimals: Option<usize>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(logging::level_from_flags(cli.verbose, cli.quiet));

    match cli.command {
        Commands::Convert {
            files,
            output_dir,
            config,
            columns,
            decimals,
            delimiter,
        } => {
            let config = load_config(config.as_deref(), columns.as_deref(), decimals)?;
            if !delimiter.is_ascii() {
                bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
            }

            let mut options = ConvertOptions::default()
                .with_config(config)
                .with_csv_delimiter(delimiter as u8);
            options.output_dir = output_dir;

            convert_all(&files, &options)
        }
        Commands::Info { input } => {
            show_info(&input)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Value {
            text,
            column,
            decimals,
        } => {
            show_value(&text, &column, decimals)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Defaults, then the JSON file, then flag overrides
fn load_config(
    path: Option<&Path>,
    columns: Option<&[String]>,
    decimals: Option<usize>,
) -> Result<NormalizeConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config '{}'", path.display()))?;
            serde_json::from_str::<NormalizeConfig>(&text)
                .with_context(|| format!("Failed to parse config '{}'", path.display()))?
        }
        None => NormalizeConfig::default(),
    };

    if let Some(columns) = columns {
        config = config
            .with_target_column_letters(columns)
            .context("Invalid --columns")?;
    }
    if let Some(places) = decimals {
        config = config.with_decimal_places(places);
    }

    config.validate().context("Invalid configuration")?;
    debug!(?config, "normalization settings");
    Ok(config)
}

/// Convert every file in turn; one failure does not stop the rest
fn convert_all(files: &[PathBuf], options: &ConvertOptions) -> Result<ExitCode> {
    let mut converted = 0usize;
    let mut failed = 0usize;

    for file in files {
        if let Err(err) = FileFormat::from_path(file) {
            warn!("Skipping {}: {}", file.display(), err);
            continue;
        }
        match convert_file(file, options) {
            Ok(conversion) => {
                println!("{}", conversion_line(&conversion));
                converted += 1;
            }
            Err(err) => {
                error!("{:#}", anyhow::Error::new(err));
                failed += 1;
            }
        }
    }

    info!(converted, failed, "done");
    if converted == 0 && failed == 0 {
        bail!("No supported files given (expected .xlsx, .xlsm or .csv)");
    }
    Ok(if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn show_info(input: &Path) -> Result<()> {
    let workbook =
        Workbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;
    print!("{}", workbook_info(&input.display().to_string(), &workbook));
    Ok(())
}

fn show_value(text: &str, column: &str, decimals: Option<usize>) -> Result<()> {
    let col = CellAddress::letters_to_column(column.trim())
        .with_context(|| format!("Invalid column '{}'", column))?;
    let config = load_config(None, None, decimals)?;

    let (normalized, outcome) = normalize_with_outcome(text, col, &config);
    debug!(?outcome, column, "normalized value");
    println!("{}", normalized);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_config_layers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"decimal_places": 2, "target_columns": [1, 2]}"#).unwrap();

        let config = load_config(Some(&path), None, None).unwrap();
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.target_columns.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(config.min_column_width, 8.0);

        let columns = vec!["K".to_string(), " u ".to_string()];
        let config = load_config(Some(&path), Some(&columns), Some(6)).unwrap();
        assert_eq!(config.decimal_places, 6);
        assert_eq!(config.target_columns.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
    }

    #[test]
    fn test_load_config_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"min_column_width": 50}"#).unwrap();

        assert!(load_config(Some(&path), None, None).is_err());
        assert!(load_config(None, Some(&["1K".to_string()]), None).is_err());
        assert!(load_config(None, None, Some(99)).is_err());
    }

    #[test]
    fn test_cli_parses_convert() {
        let cli = Cli::try_parse_from([
            "remessa", "convert", "a.xlsx", "b.csv", "--columns", "K,L", "-d", ";", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert {
                files,
                columns,
                delimiter,
                ..
            } => {
                assert_eq!(files, vec![PathBuf::from("a.xlsx"), PathBuf::from("b.csv")]);
                assert_eq!(columns, Some(vec!["K".to_string(), "L".to_string()]));
                assert_eq!(delimiter, ';');
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_cli_value_accepts_negative_text() {
        let cli = Cli::try_parse_from(["remessa", "value", "-1.234,5", "--column", "L"]).unwrap();
        assert!(matches!(cli.command, Commands::Value { ref text, .. } if text == "-1.234,5"));
    }
}
