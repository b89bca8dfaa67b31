use std::time::Duration;

use clap::Parser;

use crate::app::run_plan;
use crate::args::ScanArgs;
use crate::config::{apply_config, load_config};
use crate::error::AppResult;

/// How long exit waits for blocking reads that outlived their timeout.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

pub(crate) fn run() -> AppResult<()> {
    let args = ScanArgs::parse();

    crate::logger::init_logging(args.verbose, args.no_color);

    let config = load_config(args.config.as_deref())?;
    let clock_now = chrono::Local::now().naive_local();
    let plan = apply_config(&args, config, clock_now)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(run_plan(plan));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    let report = outcome?;
    tracing::debug!(
        "Run finished: {} emitted, {} skipped, {} failed",
        report.emitted,
        report.rejected,
        report.failed
    );
    Ok(())
}
