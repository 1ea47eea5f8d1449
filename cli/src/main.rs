mod commands;
mod formatters;
mod options;

use clap::Parser;
use mgmt_engine::infrastructure::init_logging;
use options::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(Some(&args.log_level));

    let code = commands::run(&args).await?;
    if code != commands::exit_code::SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}
