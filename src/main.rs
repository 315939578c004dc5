use anyhow::Result;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use opagate::cli::RootCommand;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    dotenv().ok();

    // Handle Ctrl+C gracefully
    let code = tokio::select! {
        result = RootCommand::execute() => result?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted by user");
            130
        }
    };

    std::process::exit(code);
}
