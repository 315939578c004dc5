use anyhow::Result;
use clap::Parser;

use crate::cli::args::{Args, CheckArgs, validate_check_args};
use crate::cli::commands::run_check_command;
use crate::config::OpagateConfig;

pub struct RootCommand;

impl RootCommand {
    pub async fn execute() -> Result<i32> {
        let args = Args::parse();

        // Handle config generation mode
        if args.generate_config {
            println!("{}", OpagateConfig::generate_default_config());
            return Ok(opagate_core::exit::COMPLIANT);
        }

        let check_args = CheckArgs::from(&args);
        validate_check_args(&check_args)?;
        run_check_command(check_args).await
    }
}
