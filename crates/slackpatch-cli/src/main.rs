use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "slackpatch")]
#[command(about = "In-place string patcher for firmware images")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace configured strings in an image, using trailing null slack
    Patch {
        /// Image file to patch
        input: PathBuf,

        /// Where to write the result (defaults to overwriting INPUT)
        output: Option<PathBuf>,

        /// JSON term table to use instead of the built-in one
        #[arg(short, long)]
        terms: Option<PathBuf>,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the master-server hostname for a server name
    Hostname {
        /// Server name, e.g. "gpcm"
        name: String,
    },

    /// Dump the built-in term table as JSON
    Terms {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("slackpatch=info".parse()?))
        .init();

    let args = Args::parse();

    info!("slackpatch {} starting", env!("CARGO_PKG_VERSION"));

    let result = match args.command {
        Command::Patch {
            input,
            output,
            terms,
            dry_run,
        } => commands::patch::run(&input, output.as_deref(), terms.as_deref(), dry_run),
        Command::Hostname { name } => commands::hostname::run(&name),
        Command::Terms { output } => commands::terms::run(output.as_deref()),
    };

    if result.is_ok() {
        info!("Done");
    }
    result
}
