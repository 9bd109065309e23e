use clap::Parser;
use schedulr::cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = schedulr::run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
