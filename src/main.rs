use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use lpr_audit_tools::audit::aggregate::{DEFAULT_CATEGORY_SAMPLES, DEFAULT_TOP_OFFICERS, DEFAULT_TOP_REASONS};
use lpr_audit_tools::audit::detector::DEFAULT_BURST_THRESHOLD;
use lpr_audit_tools::commands;
use lpr_audit_tools::config::DEFAULT_CONFIG_TOML;
use lpr_audit_tools::utils::export::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lpr-audit")]
#[command(about = "LPR network access log audit tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full audit report with optional CSV/JSON export
    Analyze {
        /// Access-log CSV files or directories (defaults to [paths] input)
        paths: Vec<PathBuf>,

        /// TOML file overriding the default configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory to write report files to (defaults to [paths] output)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Export format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Number of top reasons to report
        #[arg(long, default_value_t = DEFAULT_TOP_REASONS)]
        top: usize,
    },

    /// Search volume, top reasons and network usage per officer
    Officers {
        /// Access-log CSV files or directories (defaults to [paths] input)
        paths: Vec<PathBuf>,

        /// TOML file overriding the default configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of officers to show
        #[arg(long, default_value_t = DEFAULT_TOP_OFFICERS)]
        top: usize,
    },

    /// Reason-category distribution with sample reasons per category
    Categories {
        /// Access-log CSV files or directories (defaults to [paths] input)
        paths: Vec<PathBuf>,

        /// TOML file overriding the default configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Sample reasons listed per category
        #[arg(long, default_value_t = DEFAULT_CATEGORY_SAMPLES)]
        samples: usize,
    },

    /// Night-time searches without a case number and other red flags
    Suspicious {
        /// Access-log CSV files or directories (defaults to [paths] input)
        paths: Vec<PathBuf>,

        /// TOML file overriding the default configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Uncased searches per officer-hour above which an hour is a burst
        #[arg(long, default_value_t = DEFAULT_BURST_THRESHOLD)]
        burst_threshold: usize,

        /// Export flagged searches to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (default: from the output file extension)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Classify reason strings with the configured rule table
    Classify {
        /// Reason strings to classify
        #[arg(required = true)]
        reasons: Vec<String>,

        /// TOML file overriding the default configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the built-in default configuration
    DefaultConfig,

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            paths,
            config,
            output_dir,
            format,
            top,
        } => commands::analyze::run(
            &paths,
            config.as_deref(),
            output_dir.as_deref(),
            format,
            top,
        ),
        Commands::Officers { paths, config, top } => {
            commands::officers::run(&paths, config.as_deref(), top)
        }
        Commands::Categories {
            paths,
            config,
            samples,
        } => commands::categories::run(&paths, config.as_deref(), samples),
        Commands::Suspicious {
            paths,
            config,
            burst_threshold,
            output,
            format,
        } => commands::suspicious::run(
            &paths,
            config.as_deref(),
            burst_threshold,
            output.as_deref(),
            format,
        ),
        Commands::Classify { reasons, config } => {
            commands::classify::run(&reasons, config.as_deref())
        }
        Commands::DefaultConfig => {
            print!("{}", DEFAULT_CONFIG_TOML);
            Ok(())
        }
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "lpr-audit", &mut std::io::stdout());
            Ok(())
        }
    }
}
