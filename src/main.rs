use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use ecbfx::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct QueryOpts {
    /// Comma-separated currency codes to include; all when omitted
    #[arg(short, long, value_delimiter = ',')]
    symbols: Option<Vec<String>>,

    /// Base currency of the result (the ECB feed only publishes EUR)
    #[arg(short, long, default_value = "EUR")]
    base: String,

    /// Base-currency amount to convert into each target currency
    #[arg(short, long)]
    amount: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display rates for the most recent published day
    Latest {
        #[command(flatten)]
        query: QueryOpts,
    },
    /// Display rates for a specific day
    Historical {
        /// Requested day, YYYY-MM-DD; rounds up to the next published day
        #[arg(short, long)]
        date: NaiveDate,

        #[command(flatten)]
        query: QueryOpts,
    },
}

impl From<QueryOpts> for ecbfx::QueryArgs {
    fn from(opts: QueryOpts) -> ecbfx::QueryArgs {
        ecbfx::QueryArgs {
            base: opts.base,
            symbols: opts.symbols,
            amount: opts.amount,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(Commands::Latest { query }) => {
            ecbfx::run_command(
                ecbfx::AppCommand::Latest,
                query.into(),
                cli.config_path.as_deref(),
            )
            .await
        }
        Some(Commands::Historical { date, query }) => {
            ecbfx::run_command(
                ecbfx::AppCommand::Historical { date },
                query.into(),
                cli.config_path.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = ecbfx::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
provider:
  base_url: "https://www.ecb.europa.eu/stats/eurofxref"

cache:
  freshness_secs: 3600

# Default currency codes to display; empty shows every published currency
targets: []
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
