use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use spendtrack::cli::{
    handle_analytics_command, handle_category_command, handle_import_command,
    handle_user_command, resolve_user, AnalyticsCommands, CategoryCommands, UserCommands,
};
use spendtrack::config::{paths::DATA_DIR_ENV, SpendPaths, Settings};
use spendtrack::export::OutputFormat;
use spendtrack::logging::init_tracing;
use spendtrack::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "spendtrack",
    version,
    about = "Monthly analytics for personal expenses",
    long_about = "spendtrack aggregates your expense records into monthly summaries, \
                  category breakdowns, spending trends and a dashboard snapshot."
)]
struct Cli {
    /// User name or ID to report on
    #[arg(short, long, global = true, env = "SPENDTRACK_USER")]
    user: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Directory holding config and data files
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default categories
    Init,

    /// Show current configuration and paths
    Config,

    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Import expenses from a CSV file
    Import {
        /// Path to CSV file (columns: date, amount, category, description)
        file: PathBuf,
    },

    /// Spending analytics
    #[command(subcommand, alias = "stats")]
    Analytics(AnalyticsCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => SpendPaths::with_base_dir(dir),
        None => SpendPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing spendtrack at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  spendtrack user add <name>");
            println!("  spendtrack --user <name> import expenses.csv");
            println!("  spendtrack --user <name> analytics monthly");
        }
        Some(Commands::Config) => {
            println!("spendtrack Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Fallback category: {}", settings.fallback_category.name);
            println!("  Sample size:       {}", settings.sample_size);
            println!("  Top categories:    {}", settings.top_categories);
            println!("  Recent expenses:   {}", settings.recent_expenses);
            println!("  Trend months:      {}", settings.trend_months);
            println!(
                "  Default user:      {}",
                settings.default_user.as_deref().unwrap_or("(none)")
            );
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, cli.format, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let user = resolve_user(&storage, &settings, cli.user.as_deref())?;
            handle_category_command(&storage, &user, cli.format, cmd)?;
        }
        Some(Commands::Import { file }) => {
            let user = resolve_user(&storage, &settings, cli.user.as_deref())?;
            handle_import_command(&storage, &user, &file)?;
        }
        Some(Commands::Analytics(cmd)) => {
            let user = resolve_user(&storage, &settings, cli.user.as_deref())?;
            handle_analytics_command(&storage, &settings, &user, cli.format, cmd)?;
        }
        None => {
            println!("spendtrack - Monthly analytics for personal expenses");
            println!();
            println!("Run 'spendtrack --help' for usage information.");
        }
    }

    Ok(())
}
