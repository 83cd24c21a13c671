use clap::Parser;
use finmetic::api::cli::{Cli, run};

#[tokio::main]
async fn main() {
    finmetic::logging::init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
