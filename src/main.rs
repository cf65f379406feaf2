use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = blurpaste::cli::CliArgs::parse();
    blurpaste::run(args).context("blurpaste failed")
}
