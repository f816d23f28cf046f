use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use taskboard::cli;
use taskboard::cli::commands::{Cli, Commands};

fn main() {
    let cli_args = Cli::parse();

    // RUST_LOG wins; otherwise the server logs at info and the CLI stays quiet.
    let default_level = match cli_args.command {
        Commands::Serve { .. } => "info",
        _ => "off",
    };
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let json_output = cli_args.json;
    let config = cli_args.config;

    let exit_code = match cli_args.command {
        Commands::Init { database } => cli::init::run(&config, database, json_output),
        Commands::Serve { port } => cli::serve::run(&config, port, json_output),
        Commands::Task(cmd) => cli::task::run(cmd, &config, json_output),
        Commands::Project(cmd) => cli::project::run(cmd, &config, json_output),
        Commands::Event(cmd) => cli::event::run(cmd, &config, json_output),
        Commands::Member(cmd) => cli::member::run(cmd, &config, json_output),
        Commands::Status => cli::status::run(&config, json_output),
    };

    process::exit(exit_code);
}
