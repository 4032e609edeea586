use clap::Parser;
use jotter::cli::commands::Cli;
use jotter::cli::handlers;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = handlers::launch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
