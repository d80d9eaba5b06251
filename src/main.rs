//! paapi-relay - Webhook relay for Product Advertising API GetItems calls

use anyhow::Result;
use clap::{Parser, Subcommand};
use paapi_relay::commands::{LookupCommand, ServeCommand};
use paapi_relay::config::{Config, OutputFormat};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "paapi-relay",
    version,
    about = "Webhook relay for Product Advertising API GetItems calls",
    long_about = "Signs and forwards item lookups to the Product Advertising API and returns normalized items."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Proxy URL for upstream calls (e.g., socks5://host:port)
    #[arg(long, global = true, env = "PAAPI_PROXY")]
    proxy: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook server
    #[command(alias = "s")]
    Serve {
        /// Address to bind
        #[arg(long)]
        bind: Option<IpAddr>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Look up items by ASIN once and print them
    #[command(alias = "l")]
    Lookup {
        /// ASIN(s) to look up
        #[arg(required = true)]
        asins: Vec<String>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine
    dotenv::dotenv().ok();

    let default_level = match cli.command {
        Commands::Serve { .. } => Level::INFO,
        Commands::Lookup { .. } => Level::WARN,
    };
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(default_level.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }
            debug!("Effective config: {:?}", config);

            ServeCommand::new(config).execute().await?;
        }

        Commands::Lookup { asins, format } => {
            if let Some(format) = format {
                config.format = format;
            }
            debug!("Effective config: {:?}", config);

            let output = LookupCommand::new(config).execute(&asins).await?;
            println!("{}", output);
        }
    }

    Ok(())
}
