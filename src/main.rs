use clap::Parser;
use holdrank::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    holdrank::logging::init_logging(cli.verbose);
    run(cli)
}
