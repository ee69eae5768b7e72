//! mintscan-koinly CLI - Convert Mintscan exports to Koinly universal CSV
//!
//! # Commands
//!
//! ```bash
//! mintscan-koinly convert export.csv        # Per-row conversion
//! mintscan-koinly aggregate export.csv      # Grouped conversion (sum per tx)
//! mintscan-koinly parse export.csv          # Debug: dump parsed rows as JSON
//! ```

use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use mintscan_koinly::{
    aggregate_file, convert_file, default_output_path, parse_file_auto, ConvertOptions,
    PipelineError, RunSummary,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mintscan-koinly")]
#[command(about = "Convert Mintscan transaction exports to Koinly universal CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert each export row to a Koinly row (keeps input order)
    Convert {
        /// Input export CSV
        input: PathBuf,

        /// Output CSV (default: <input>_koinly.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Native token symbol used for every amount
        #[arg(long, default_value = "SAGA")]
        token: String,

        /// IANA timezone assumed for timestamps without one (default: UTC)
        #[arg(long)]
        timezone: Option<String>,

        /// Micro-denomination scale factor (1 usaga = 1e-6 SAGA)
        #[arg(long, default_value_t = 1e-6)]
        micro_factor: f64,

        /// Koinly label for delegate transactions
        #[arg(long, default_value = "stake")]
        stake_label: String,

        /// Koinly label for staking rewards
        #[arg(long, default_value = "reward")]
        reward_label: String,
    },

    /// Group rows by (txhash, type) and sum amounts (output sorted by key)
    Aggregate {
        /// Input export CSV
        input: PathBuf,

        /// Output CSV (default: <input>_koinly.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse an export CSV and dump the rows as JSON
    Parse {
        /// Input export CSV
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            token,
            timezone,
            micro_factor,
            stake_label,
            reward_label,
        } => cmd_convert(
            &input,
            output.as_deref(),
            token,
            timezone.as_deref(),
            micro_factor,
            stake_label,
            reward_label,
        ),

        Commands::Aggregate { input, output } => cmd_aggregate(&input, output.as_deref()),

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    token: String,
    timezone: Option<&str>,
    micro_factor: f64,
    stake_label: String,
    reward_label: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let assumed_timezone = timezone
        .map(|tz| {
            tz.parse::<Tz>()
                .map_err(|_| PipelineError::InvalidTimezone(tz.to_string()))
        })
        .transpose()?;

    let options = ConvertOptions {
        token,
        micro_factor,
        assumed_timezone,
        stake_label,
        reward_label,
    };

    eprintln!("📄 Converting: {}", input.display());
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    let summary = convert_file(input, &output, &options)?;
    print_summary(&summary);
    Ok(())
}

fn cmd_aggregate(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📦 Aggregating: {}", input.display());
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    let summary = aggregate_file(input, &output)?;
    print_summary(&summary);
    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing: {}", input.display());

    let result = parse_file_auto(input)?;
    eprintln!("   Encoding: {}", result.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(result.delimiter));
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    match output {
        Some(path) => {
            fs::write(path, &json)?;
            eprintln!("💾 Output written to: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    eprintln!("   Encoding: {}", summary.csv_info.encoding);
    eprintln!(
        "   Delimiter: '{}'",
        format_delimiter(summary.csv_info.delimiter)
    );
    eprintln!("   Rows read: {}", summary.rows_read);
    println!(
        "Created '{}' with {} transactions.",
        summary.output.display(),
        summary.rows_written
    );
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
