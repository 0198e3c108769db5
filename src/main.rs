use clap::Parser;

use filegate::cli::{self, Args};
use filegate::error::Result;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run_app(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_app(args: Args) -> Result<()> {
    cli::run(args).await
}
