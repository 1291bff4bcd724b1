// src/main.rs

use ram::logging::LogSettings;
use ram::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("ram error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(&LogSettings::from_cli(&args))?;
    run(args).await
}
