use anyhow::Result;
use clap::Parser;

use sxudo_cli::cli::commands::{GlobalOptions, chat, connect, health};
use sxudo_cli::cli::{Args, Command, exit_code_for};
use sxudo_cli::output::{self, OutputConfig};
use sxudo_cli::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        ..OutputConfig::default()
    });
    output::init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("{} {e:#}", Style::error("Error:"));
        std::process::exit(exit_code_for(&e));
    }
}

async fn run(args: Args) -> Result<()> {
    let options = GlobalOptions {
        endpoint: args.endpoint,
        username: args.username,
        ephemeral: args.ephemeral,
    };

    match args.command {
        None | Some(Command::Chat) => chat::run_chat(&options).await,
        Some(Command::Health) => health::run_health(&options).await,
        Some(Command::Connect { host, port }) => {
            connect::run_connect(&options, &host, port).await
        }
    }
}
