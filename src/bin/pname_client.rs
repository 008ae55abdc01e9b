use anyhow::Context;
use clap::Parser;
use pname::domain::model::CasingStyle;
use pname::utils::logger;
use pname::{PageConfig, PnameClient, ServerConfig};
use tokio::io::AsyncReadExt;

#[derive(Parser)]
#[command(name = "pname-client")]
#[command(about = "Send logical names from stdin to a pname server")]
struct Args {
    /// Base URL the server is deployed under
    #[arg(long, default_value = "http://127.0.0.1:8080/")]
    url: String,

    /// Take the URL and CSRF settings from a server TOML configuration
    #[arg(short, long, conflicts_with = "url")]
    config: Option<String>,

    #[arg(short, long, default_value = "UPPER_SNAKE")]
    style: String,

    #[arg(long)]
    csrf_header: Option<String>,

    #[arg(long)]
    csrf_parameter: Option<String>,

    #[arg(long)]
    csrf_token: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let style: CasingStyle = args.style.parse()?;

    let page = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path))?
            .page_config(),
        None => PageConfig {
            context_root: args.url.clone(),
            csrf_header: args.csrf_header.clone(),
            csrf_parameter: args.csrf_parameter.clone(),
            csrf_token: args.csrf_token.clone(),
        },
    };

    let client = PnameClient::new(&page)?;
    tracing::debug!("Using endpoint {}", client.endpoint());

    let mut ln = String::new();
    tokio::io::stdin()
        .read_to_string(&mut ln)
        .await
        .context("reading logical names from stdin")?;

    let converted = client
        .convert(style, &ln)
        .await
        .with_context(|| format!("converting via {}", client.endpoint()))?;
    print!("{}", converted);

    Ok(())
}
