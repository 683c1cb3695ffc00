use std::path::{Path, PathBuf};
use std::sync::Arc;
use clap::{Parser, Subcommand};

use smores::application::errors::{BotError, ConfigError};
use smores::application::services::BotService;
use smores::infrastructure::adapters::ConsoleAdapter;
use smores::infrastructure::config::Config;
use smores::plugins::HandlerCatalog;

#[derive(Parser)]
#[command(name = "smores")]
#[command(about = "A pluggable chat room command bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run {
        /// Room to connect to, by name or id (overrides config)
        #[arg(short, long)]
        room: Option<String>,

        /// Plugin directory (overrides config)
        #[arg(short, long)]
        plugins: Option<PathBuf>,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into()),
        )
        .init();

    let result = match cli.command {
        Commands::Run { room, plugins } => run_bot(&cli.config, room, plugins),
        Commands::Version => {
            println!("smores v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &Path) -> Result<Config, BotError> {
    if !path.exists() {
        return Ok(Config::load_env());
    }

    let mut config = match Config::load(path) {
        Ok(config) => config,
        Err(e @ ConfigError::ReservedKeyConflict(_)) => return Err(e.into()),
        Err(e) => {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        }
    };
    config.apply_env();
    Ok(config)
}

fn run_bot(config_path: &Path, room: Option<String>, plugins: Option<PathBuf>) -> Result<(), BotError> {
    let mut config = load_config(config_path)?;
    if let Some(room) = room {
        config.bot.room = Some(room);
    }
    if let Some(dir) = plugins {
        config.plugins.directory = dir;
    }

    tracing::info!("Starting smores: {}", config.bot.name);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;

    rt.block_on(async {
        let client = Arc::new(ConsoleAdapter::new(config.bot.name.clone()));
        let room_key = config.bot.room.clone();
        let service = BotService::start(config, client, HandlerCatalog::with_builtins()).await?;

        let room = match room_key {
            Some(key) => service.find_room(&key).await?,
            None => service.find_room("console").await?,
        };
        service.listen(&room).await
    })
}

fn init_config(path: &Path) -> Result<(), BotError> {
    if path.exists() {
        return Err(ConfigError::InvalidValue(format!("{} already exists", path.display())).into());
    }

    let yaml = Config::default().to_yaml()?;
    std::fs::write(path, yaml)
        .map_err(|e| ConfigError::InvalidValue(format!("Failed to write {}: {}", path.display(), e)))?;

    println!("Wrote default config to {}", path.display());
    Ok(())
}
