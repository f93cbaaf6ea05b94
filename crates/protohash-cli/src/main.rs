//! protohash CLI - fingerprint protobuf payloads described by a descriptor set.

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{hash, messages, verify, HasherOptions, Target};

#[derive(Parser)]
#[command(name = "protohash")]
#[command(about = "Stable content digests for protobuf messages")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the digest of a payload
    Hash {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        options: HasherOptions,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Recompute a payload's digest and compare it with an expected value
    Verify {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        options: HasherOptions,
        /// Expected digest in hex
        #[arg(long)]
        expected: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the message types of a descriptor set
    Messages {
        /// Serialized FileDescriptorSet
        #[arg(long)]
        descriptor_set: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Hash {
            target,
            options,
            json,
        } => hash::run(target, options, json),
        Commands::Verify {
            target,
            options,
            expected,
            json,
        } => verify::run(target, options, expected, json),
        Commands::Messages {
            descriptor_set,
            json,
        } => messages::run(descriptor_set, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
