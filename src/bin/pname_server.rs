use clap::Parser;
use pname::adapters::server;
use pname::config::toml_config::DictionarySection;
use pname::utils::{logger, validation::Validate};
use pname::ServerConfig;

#[derive(Parser)]
#[command(name = "pname-server")]
#[command(about = "Serve the logical-to-physical name conversion endpoint")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override the bind address, e.g. 0.0.0.0:8080
    #[arg(long)]
    bind: Option<String>,

    /// Override the context root the endpoint is mounted under
    #[arg(long)]
    context_root: Option<String>,

    /// Override the word dictionary
    #[arg(long)]
    dictionary: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    json_log: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match ServerConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => ServerConfig::default(),
    };

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(root) = args.context_root {
        config.server.context_root = root;
    }
    if let Some(path) = args.dictionary {
        config.dictionary = Some(DictionarySection {
            path,
            format: None,
            word_delimiter: None,
            has_header: None,
        });
    }

    logger::init_server_logger(args.json_log || config.json_logging());

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if config.csrf_requirement().is_some() {
        tracing::info!("CSRF header check enabled");
    }

    if let Err(e) = server::serve(&config).await {
        tracing::error!("Server stopped: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(3);
    }

    Ok(())
}
