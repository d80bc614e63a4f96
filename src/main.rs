use std::io;
use std::process;

use bethyw::cli::{self, Args};
use clap::Parser;

fn main() {
    let args = Args::parse();
    cli::setup_logging(&args);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if let Err(error) = cli::run(&args, &mut out) {
        eprintln!("{error}");
        process::exit(1);
    }
}
