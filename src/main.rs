// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use scribedown::app_config::{self, Config, RewriteProvider};
use scribedown::app_controller::Controller;
use scribedown::errors::AppError;

/// CLI Wrapper for RewriteProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliRewriteProvider {
    #[value(name = "openrouter")]
    OpenRouter,
    #[value(name = "openai")]
    OpenAI,
    #[value(name = "lmstudio")]
    LMStudio,
}

impl From<CliRewriteProvider> for RewriteProvider {
    fn from(cli_provider: CliRewriteProvider) -> Self {
        match cli_provider {
            CliRewriteProvider::OpenRouter => RewriteProvider::OpenRouter,
            CliRewriteProvider::OpenAI => RewriteProvider::OpenAI,
            CliRewriteProvider::LMStudio => RewriteProvider::LMStudio,
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

/// Options shared by every command that talks to the rewrite service
#[derive(Args, Debug, Clone)]
struct ServiceArgs {
    /// Rewrite provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliRewriteProvider>,

    /// Model name to use for rewriting
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the provider
    #[arg(long, env = "SCRIBEDOWN_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// File with a replacement system prompt
    #[arg(long, value_name = "FILE")]
    prompt_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "scribedown.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct RewriteArgs {
    /// Transcript file, or directory of transcripts
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Markdown file to write
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: PathBuf,

    #[command(flatten)]
    service: ServiceArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite transcripts into a markdown document (default command)
    Rewrite(RewriteArgs),

    /// Send a minimal request to check the provider configuration
    Check {
        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Write a default configuration file
    InitConfig {
        /// Where to write the configuration
        #[arg(default_value = "scribedown.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions for scribedown
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// scribedown - rewrite raw speech transcripts into markdown
#[derive(Parser, Debug)]
#[command(name = "scribedown")]
#[command(version)]
#[command(about = "Rewrite raw speech transcripts into polished markdown")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "scribedown sends transcripts to an LLM chat-completion service and writes the rewritten markdown.

A directory input rewrites every *.txt, *.text and *.transcript file in it and joins the results,
ordered by the first number in each file name, into one document.

EXAMPLES:
    scribedown talk.txt talk.md                   # Rewrite a single transcript
    scribedown sessions/ course.md                # Rewrite and join a directory
    scribedown -p openai -m gpt-4o talk.txt out.md
    scribedown check                              # Test the provider configuration
    scribedown init-config                        # Write scribedown.json with defaults
    scribedown rewrite check out.md               # Input named like a subcommand (check, rewrite, ...)

CONFIGURATION:
    Settings are read from scribedown.json when present. The API key can also come from
    SCRIBEDOWN_API_KEY or the provider's own variable (OPENROUTER_API_KEY, OPENAI_API_KEY).")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Transcript file, or directory of transcripts
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Markdown file to write
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    #[command(flatten)]
    service: ServiceArgs,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for log level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::decoration(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {}{}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialise logger: {}", e);
    }

    let cli = match CommandLineOptions::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = dispatch(cli).await {
        error!("Error during conversion process: {:#}", e);
        std::process::exit(1);
    }
}

async fn dispatch(cli: CommandLineOptions) -> Result<()> {
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "scribedown", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::InitConfig { path, force }) => init_config(&path, force),
        Some(Commands::Check { service }) => {
            let controller = Controller::with_config(load_config(&service)?)?;
            controller.check_connection().await
        }
        Some(Commands::Rewrite(args)) => run_rewrite(args).await,
        None => {
            let (input_path, output_file) = match (cli.input_path, cli.output_file) {
                (Some(input), Some(output)) => (input, output),
                _ => return Err(anyhow!("Usage: scribedown <INPUT_PATH> <OUTPUT_FILE>")),
            };
            run_rewrite(RewriteArgs {
                input_path,
                output_file,
                service: cli.service,
            })
            .await
        }
    }
}

async fn run_rewrite(args: RewriteArgs) -> Result<()> {
    let config = load_config(&args.service)?;
    let controller = Controller::with_config(config)?;
    controller.run(&args.input_path, &args.output_file).await?;
    Ok(())
}

/// Build the effective configuration: file, then environment, then flags
fn load_config(service: &ServiceArgs) -> Result<Config> {
    // Apply the command line level first so config loading is logged at it
    if let Some(level) = &service.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load(&service.config_path)
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;

    if let Some(provider) = &service.provider {
        config.rewrite.provider = provider.clone().into();
    }
    config.apply_env_overrides();

    if let Some(model) = &service.model {
        config.rewrite.set_model(model.clone());
    }
    if let Some(api_key) = &service.api_key {
        config.rewrite.set_api_key(api_key.clone());
    }
    if let Some(prompt_file) = &service.prompt_file {
        config.rewrite.common.system_prompt_file = Some(prompt_file.clone());
    }

    match &service.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    config.validate()
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;
    Ok(config)
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        warn!("Config file already exists: {:?}. Use -f to force overwrite.", path);
        return Ok(());
    }
    Config::write_default(path)?;
    info!("Wrote default configuration to {:?}", path);
    Ok(())
}
