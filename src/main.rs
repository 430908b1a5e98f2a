// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use potrans::app_config::{self, Config, ProviderKind};
use potrans::app_controller::Controller;
use potrans::errors::AppError;

/// CLI Wrapper for ProviderKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProviderKind {
    Command,
    Ollama,
    Mock,
}

impl From<CliProviderKind> for ProviderKind {
    fn from(cli_provider: CliProviderKind) -> Self {
        match cli_provider {
            CliProviderKind::Command => ProviderKind::Command,
            CliProviderKind::Ollama => ProviderKind::Ollama,
            CliProviderKind::Mock => ProviderKind::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a catalog, or pick one interactively (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for potrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct TranslateArgs {
    /// Catalog to translate; without it the files in --dir are listed
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Source language code (e.g., 'en', 'auto')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'id', 'pt-BR')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "potrans.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliProviderKind>,

    /// Force overwrite of an existing translated catalog
    #[arg(short, long)]
    force_overwrite: bool,

    /// Directory listed in interactive mode
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,
}

/// potrans - gettext catalog translator
///
/// Translates the msgid entries of a .po catalog into msgstr entries while
/// keeping placeholders, markup and escape sequences intact.
#[derive(Parser, Debug)]
#[command(name = "potrans")]
#[command(version)]
#[command(about = "Translate gettext .po catalogs through an external translator")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "potrans fills the msgstr entries of a gettext catalog with machine translations.

EXAMPLES:
    potrans                                  # Pick a .po file in the current directory
    potrans -d locale/                       # Pick a .po file in locale/
    potrans game.po                          # Translate game.po with the configured languages
    potrans -s en -t ja game.po              # Translate from English to Japanese
    potrans -f game.po                       # Overwrite game_translated.po
    potrans -p ollama game.po                # Use a local Ollama model
    potrans completions bash > potrans.bash  # Generate bash completions

OUTPUT:
    <stem>_translated.po             translated catalog
    <stem>_log_<timestamp>.txt       per-entry translation log
    <stem>_mapping.txt               placeholder ids and their original text

CONFIGURATION:
    Configuration is stored in potrans.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    args: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // Trace is the ceiling; the effective level is set once the config is known
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "potrans", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.args).await,
    };

    let exit_code = match result {
        Ok(()) => 0,
        Err(AppError::Cancelled) => {
            warn!("Cancelled by user");
            AppError::Cancelled.exit_code()
        }
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    };

    log::logger().flush();
    // A pending stdin read would keep the runtime alive on drop
    std::process::exit(i32::from(exit_code));
}

/// Read the config file, creating it with defaults when missing
fn load_or_create_config(config_path: &str) -> Result<Config, AppError> {
    if Path::new(config_path).exists() {
        Config::load(config_path).map_err(|e| AppError::Config(format!("{:#}", e)))
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config
            .save(config_path)
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;
        Ok(config)
    }
}

/// Command line values take precedence over the config file
fn apply_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_translate(options: TranslateArgs) -> Result<(), AppError> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_or_create_config(&options.config_path)?;
    apply_overrides(&mut config, &options);
    log::set_max_level(config.log_level.to_level_filter());

    let mut controller = Controller::with_config(config)?;

    let report = match options.input {
        Some(input) => controller.run(input, options.force_overwrite).await?,
        None => controller.run_interactive(&options.dir).await?,
    };

    info!("Done: {}", report.paths.translated.display());
    Ok(())
}
