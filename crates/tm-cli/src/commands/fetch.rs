//! Fetch command implementation

use anyhow::{Context, Result};
use std::future::Future;
use std::path::Path;
use tm_sync::{fetch, AssumeYes, Confirm, FetchOutcome, FsStorage, PromptConfirm, SyncError};

use crate::cli::{FetchArgs, GlobalArgs};
use crate::commands::common::{plural, shutdown_signal, ExitCode, INTERRUPTED_EXIT_CODE};
use crate::context::RuntimeContext;

/// Execute the fetch command
pub(crate) async fn execute(args: &FetchArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let mut confirm: Box<dyn Confirm> = if args.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirm::stdio())
    };
    run(&ctx, args, confirm.as_mut(), shutdown_signal()).await
}

/// Run the pipeline for `ctx` and report the outcome on stdout
async fn run<F>(
    ctx: &RuntimeContext,
    args: &FetchArgs,
    confirm: &mut dyn Confirm,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let dir = ctx.migrations_dir(args.dir.as_deref())?;
    let connector = ctx.connector()?;
    let endpoint = connector.endpoint();

    ctx.verbose(&format!("Migrations directory: {}", dir.display()));
    ctx.verbose(&format!(
        "Reading history from {} ({})",
        endpoint, ctx.database.db_type
    ));

    let outcome = fetch(&dir, &FsStorage, confirm, connector.as_ref(), shutdown).await;
    match outcome {
        Ok(FetchOutcome::Written(paths)) => {
            report_written(&ctx.root, &dir, &paths);
            Ok(())
        }
        Ok(FetchOutcome::Declined) => {
            println!("Fetch skipped; {} was left unchanged.", dir.display());
            Ok(())
        }
        Err(SyncError::Cancelled) => {
            eprintln!("Fetch interrupted before any files were written.");
            Err(ExitCode(INTERRUPTED_EXIT_CODE).into())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to fetch migrations from {}", endpoint))
        }
    }
}

fn report_written(root: &Path, dir: &Path, paths: &[std::path::PathBuf]) {
    if paths.is_empty() {
        println!("Remote migration history is empty; nothing to write.");
        return;
    }

    for path in paths {
        let shown = path.strip_prefix(root).unwrap_or(path);
        println!("  Wrote {}", shown.display());
    }
    println!();
    println!(
        "Fetched {} into {}",
        plural(paths.len(), "migration"),
        dir.display()
    );
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
