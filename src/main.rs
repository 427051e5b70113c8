use anyhow::Result;
use clap::Parser;
use polygon_batch::cli;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    if let Err(err) = cli::dispatch(args) {
        // Fatal errors can happen before any tracing subscriber exists
        // (config load, run validation), so report them on stderr directly.
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}
