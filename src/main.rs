//! transgate 命令行入口

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use transgate::logging::{init_logging, LoggingConfig};
use transgate::translation::ProviderMode;
use transgate::{
    FallbackOrchestrator, TranslationConfig, TranslationRequest, TranslationResult, WebConfig,
    WebServer,
};

/// Text translation gateway with ordered provider fallback
#[derive(Parser, Debug)]
#[command(name = "transgate", version, about, long_about = None, propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML or JSON configuration file
    #[arg(short, long, global = true, env = "TRANSGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Provider mode: google, fallback, mymemory, mock
    #[arg(short, long, global = true)]
    mode: Option<ProviderMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind
        #[arg(short, long)]
        bind: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory with static files (empty string disables it)
        #[arg(long)]
        static_dir: Option<String>,
    },

    /// Translate a single text and print the JSON outcome
    Translate {
        /// Text to translate
        text: String,

        /// Target language, e.g. es
        #[arg(short, long)]
        target: String,

        /// Source language, defaults to auto detection
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Print the supported environment variables
    EnvDocs,

    /// Print the effective configuration as TOML (secrets omitted)
    ExampleConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = match LoggingConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(&logging.with_verbosity(cli.verbose)) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> TranslationResult<ExitCode> {
    if let Commands::EnvDocs = cli.command {
        print!("{}", transgate::env::generate_env_docs());
        return Ok(ExitCode::SUCCESS);
    }

    let config = TranslationConfig::load(cli.config.as_deref(), cli.mode)?;

    match cli.command {
        Commands::Serve {
            bind,
            port,
            static_dir,
        } => {
            let mut web_config = WebConfig::from_env()?;
            if let Some(bind) = bind {
                web_config.bind_addr = bind;
            }
            if let Some(port) = port {
                web_config.port = port;
            }
            if let Some(static_dir) = static_dir {
                web_config.static_dir = (!static_dir.is_empty()).then_some(static_dir);
            }

            let orchestrator = FallbackOrchestrator::from_config(&config)?;
            WebServer::new(web_config, orchestrator).start().await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Translate {
            text,
            target,
            source,
        } => {
            let request =
                TranslationRequest::new(Some(&text), source.as_deref(), Some(&target))?;
            let orchestrator = FallbackOrchestrator::from_config(&config)?;
            let outcome = orchestrator.orchestrate(&request).await;

            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::ExampleConfig => {
            print!("{}", config.to_example_toml()?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::EnvDocs => Ok(ExitCode::SUCCESS),
    }
}
