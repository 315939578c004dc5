use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = None
)]
pub struct Args {
    /// Path to the Terraform plan JSON file
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Directory of Rego policy files
    #[arg(long)]
    pub policies: Option<PathBuf>,

    /// OPA query to evaluate against the plan
    #[arg(long)]
    pub query: Option<String>,

    /// Path to the opa binary
    #[arg(long)]
    pub opa_path: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[arg(long, global = true)]
    pub debug: bool,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub plan: Option<PathBuf>,
    pub policies: Option<PathBuf>,
    pub query: Option<String>,
    pub opa_path: Option<PathBuf>,
    pub verbosity: u8,
    pub debug: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for CheckArgs {
    fn from(args: &Args) -> Self {
        CheckArgs {
            plan: args.plan.clone(),
            policies: args.policies.clone(),
            query: args.query.clone(),
            opa_path: args.opa_path.clone(),
            verbosity: args.verbosity,
            debug: args.debug,
            config: args.config.clone(),
        }
    }
}

pub fn validate_check_args(args: &CheckArgs) -> Result<()> {
    if let Some(query) = &args.query {
        if query.trim().is_empty() {
            return Err(anyhow::anyhow!("Query must not be empty"));
        }
    }

    Ok(())
}
