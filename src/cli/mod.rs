use clap::{Args as ClapArgs, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(about = "Photo location guessing game server")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
    #[command(flatten)]
    pub serve: ServeArgs,
    #[arg(long, global = true)]
    #[arg(default_value = "plonk_server=info")]
    pub log_filter: String,
}

/// Runs the game server when no subcommand is given.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Label catalog rounds with place names and optionally trim the catalog.
    Annotate(AnnotateArgs),
}

#[derive(Debug, ClapArgs)]
pub struct ServeArgs {
    #[arg(long)]
    #[arg(default_value = "0.0.0.0:3030")]
    pub listen_address: SocketAddr,
    #[arg(long)]
    #[arg(default_value = "catalog.example.ndjson")]
    pub catalog: PathBuf,
    #[arg(long)]
    #[arg(default_value = "results")]
    pub results_dir: PathBuf,
    /// NDJSON places used to compute city/area/region/country accuracy.
    #[arg(long)]
    pub places: Option<PathBuf>,
    /// Rounds sampled per game. Plays the whole catalog in order if omitted.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: Option<u32>,
    /// Live sessions idle for this many seconds are dropped. Their saved progress can still
    /// be resumed.
    #[arg(long, default_value_t = 3600)]
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub session_ttl_secs: u64,
    #[arg(long = "allowed-origin")]
    #[arg(default_values_t = [
        String::from("http://127.0.0.1:3000"),
        String::from("http://localhost:3000"),
    ])]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, ClapArgs)]
pub struct AnnotateArgs {
    #[arg(long)]
    pub input: PathBuf,
    #[arg(long)]
    pub places: PathBuf,
    #[arg(long)]
    pub output: PathBuf,
    /// Keep only rounds whose `<image_id>.jpg` exists in this folder.
    #[arg(long)]
    pub images: Option<PathBuf>,
    /// Keep a random sample of at most this many rounds.
    #[arg(long)]
    pub sample: Option<usize>,
}
