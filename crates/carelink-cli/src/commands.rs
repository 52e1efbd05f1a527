use anyhow::Context;
use colored::Colorize;

use carelink_server::{AppState, CarelinkServer, Environment, ServerConfig};

use crate::cli::{Cli, Command, ServeArgs};
use crate::seed;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    config = config.with_env_overrides()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if args.production {
        config.environment = Environment::Production;
    }

    let state = AppState::new();
    if args.seed {
        let summary = seed::seed_sample_data(&state)?;
        println!(
            "{} Seeded {} clients, {} programs, {} enrollments",
            "✓".green().bold(),
            summary.clients,
            summary.programs,
            summary.enrollments,
        );
    }

    println!(
        "{} Carelink API on {}",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
    );

    let server = CarelinkServer::with_state(config, state);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(server.serve())?;
    Ok(())
}
