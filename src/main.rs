use anyhow::{Context, Result};
use clap::Parser;
use pokemon_datagen::generate::{self, Config};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pokemon-datagen")]
#[command(about = "Compile disassembly listings into data tables for the battle engine")]
struct Args {
    /// Root of the raw listings, laid out as <raw>/gen{n}/<domain>.asm
    #[arg(long, default_value = "raw")]
    raw: PathBuf,

    /// Directory holding the gen{n}.ron reference dex documents
    #[arg(long, default_value = "dex")]
    dex: PathBuf,

    #[arg(long, default_value = ".cache")]
    cache: PathBuf,

    #[arg(long, default_value = "generated")]
    out: PathBuf,

    /// Ignore cached listings and re-parse every source
    #[arg(long)]
    force: bool,

    /// Print pending-behavior test stubs for this generation
    #[arg(long, value_name = "GEN")]
    stubs: Option<u8>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            raw: args.raw,
            dex: args.dex,
            cache: args.cache,
            out: args.out,
            force: args.force,
            stubs: args.stubs,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("pokemon_datagen=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from(Args::parse());
    info!(out = %config.out.display(), force = config.force, "pokemon-datagen starting");

    let stubs = match generate::run(&config) {
        Ok(stubs) => stubs,
        Err(e) => {
            if e.is_integrity() {
                error!("upstream data and configuration disagree: {e}");
            }
            return Err(e).context("generation failed");
        }
    };

    if let Some(stubs) = stubs {
        print!("{stubs}");
    }
    Ok(())
}
