mod cli;
mod platform;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    platform::run(args)
}
