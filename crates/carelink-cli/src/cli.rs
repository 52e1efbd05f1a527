use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "carelink",
    about = "Carelink — health program enrollment service",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the Carelink API server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:5000
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run in production mode (error bodies omit stack details)
    #[arg(long)]
    pub production: bool,

    /// Preload sample clients, programs, and enrollments
    #[arg(long)]
    pub seed: bool,
}
