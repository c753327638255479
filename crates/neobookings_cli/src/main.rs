mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;
use neobookings_core::NeobookingsConfig;
use tracing::info;

#[derive(Parser)]
#[command(name = "neobookings")]
#[command(about = "Neobookings hotel-booking API as MCP tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Log line format (logs always go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Compact,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server on stdio
    Serve,
    /// Inspect the tool catalog
    Tools {
        #[command(subcommand)]
        cmd: ToolsCommands,
    },
    /// Run a single tool and print the rendered result
    Call {
        /// Tool name, e.g. zone_search_rq
        tool: String,
        /// Arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Check configuration, catalog and upstream connectivity
    Health {
        /// Skip the sample upstream operations
        #[arg(long)]
        quick: bool,
        /// Restrict catalog and sample checks to one category
        #[arg(long)]
        category: Option<String>,
    },
    /// Measure authentication and search latency
    Bench {
        /// Invocations per measured operation
        #[arg(long, default_value = "10")]
        runs: usize,
        /// Invocations kept in flight at once
        #[arg(long, default_value = "5")]
        concurrent: usize,
        /// Only measure authentication
        #[arg(long)]
        quick: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ToolsCommands {
    /// List tools, optionally for one category
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a tool's description and input schema
    Show { name: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Save current configuration to file
    Save {
        /// Path to save configuration
        #[arg(default_value = "neobookings.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .rgb_colors(miette::RgbColors::Preferred)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))?;
    miette::set_panic_hook();
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the MCP transport
    let _guard = init_logging(cli.debug, cli.log_format);

    match &cli.config {
        Some(config_path) => info!("Loading config from: {:?}", config_path),
        None => info!("Loading config from standard locations"),
    }
    let config = NeobookingsConfig::resolve(cli.config.as_deref()).await?;
    tracing::debug!("Using configuration: {:?}", config.redacted());

    match cli.command {
        Commands::Serve => commands::serve::run(config).await?,
        Commands::Tools { cmd } => match cmd {
            ToolsCommands::List { category } => commands::tools::list(category.as_deref())?,
            ToolsCommands::Show { name } => commands::tools::show(&name)?,
        },
        Commands::Call { tool, args } => commands::call::run(config, &tool, &args).await?,
        Commands::Health { quick, category } => {
            commands::health::run(config, quick, category.as_deref()).await?
        }
        Commands::Bench {
            runs,
            concurrent,
            quick,
        } => commands::bench::run(config, runs, concurrent, quick).await?,
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => commands::config::show(&config)?,
            ConfigCommands::Save { path } => commands::config::save(&config, &path).await?,
        },
    }

    Ok(())
}

fn init_logging(debug: bool, format: LogFormat) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{EnvFilter, fmt};

    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("neobookings_core=debug,neobookings_mcp=debug,neobookings_cli=debug,warn")
        } else {
            EnvFilter::new("neobookings_core=info,neobookings_mcp=info,neobookings_cli=info,warn")
        }
    });

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_file(debug)
        .with_line_number(debug)
        .with_thread_ids(false)
        .with_timer(fmt::time::LocalTime::rfc_3339());

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
    guard
}
