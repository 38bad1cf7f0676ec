//! Interactive terminal chat client.

mod app;
mod command;
mod controller;
mod notify;
mod sink;

use clap::Parser;
use colored::Colorize;
use command::Command;
use confab_client::{ApiClient, ClientConfig, DEFAULT_BASE_URL};
use controller::Controller;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "confab", version, about = "Terminal client for a confab chat backend")]
struct Cli {
    /// Backend base URL.
    #[arg(long, env = "CONFAB_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Basic auth username.
    #[arg(long, env = "CONFAB_USERNAME")]
    username: Option<String>,

    /// Basic auth password.
    #[arg(long, env = "CONFAB_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Model to chat with (defaults to the catalog's first entry).
    #[arg(long, env = "CONFAB_MODEL")]
    model: Option<String>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ClientConfig::new().with_base_url(cli.base_url);
    if let (Some(username), Some(password)) = (cli.username, cli.password) {
        config = config.with_credentials(username, password);
    }
    let client = ApiClient::new(config)?;

    let mut controller = Controller::new(client, cli.model);
    controller.init().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "you>".cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };

        match Command::parse(&line) {
            Ok(Some(command)) => {
                if !controller.handle(command).await {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => notify::error(&err.to_string()),
        }
    }

    Ok(())
}
