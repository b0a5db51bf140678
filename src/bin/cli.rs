// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::Report;
use twic_scrape::{cli, log};

fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("Warning: {e}");
    }

    let args = cli::Args::parse();
    if let Err(e) = log::init(args.verbose, args.log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {e}");
        std::process::exit(1);
    }

    if let Err(e) = cli::run(&args) {
        let code = e.exit_code();
        eprintln!("Error: {:?}", Report::new(e));
        std::process::exit(code);
    }
}
