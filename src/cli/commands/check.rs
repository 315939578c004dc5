use anyhow::Result;

use crate::cli::args::CheckArgs;
use crate::cli::ui::StatusPrinter;
use crate::config::OpagateConfig;
use crate::gate::{report, run_gate};

pub async fn run_check_command(args: CheckArgs) -> Result<i32> {
    // Load configuration with precedence: CLI args > config files
    let config = OpagateConfig::load_with_precedence(args.config.clone(), &args)?;

    let printer = StatusPrinter::new();

    if args.verbosity > 0 || args.debug {
        printer.info("Config", "resolved configuration");
        printer.kv("plan", &config.paths.plan.display().to_string());
        printer.kv("policies", &config.paths.policies.display().to_string());
        printer.kv("query", &config.policy.query);
        printer.kv("opa", &config.engine.opa_path.display().to_string());
    }

    printer.status(
        "Checking",
        &format!(
            "{} against {}",
            config.paths.plan.display(),
            config.paths.policies.display()
        ),
    );

    let outcome = run_gate(&config).await;
    report(&outcome, &printer);

    Ok(outcome.exit_code())
}
