use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing::error;

use pyship::cli;
use pyship::confirm::{AssumeYes, ConfirmationProvider, TerminalConfirmation};
use pyship::executor::{CommandExecutor, RealCommandExecutor};

fn run_release(opts: &cli::ReleaseArgs) -> Result<()> {
    let executor: Arc<dyn CommandExecutor> = Arc::new(RealCommandExecutor {
        dry_run: opts.dry_run,
    });
    let confirm: Box<dyn ConfirmationProvider> = if opts.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirmation)
    };
    pyship::run_release(opts, executor, confirm.as_ref())
}

fn main() -> Result<()> {
    let args = cli::parse_args()?;

    let log_level = match &args.command {
        None => args.release.log_level,
        Some(cli::Commands::Release(opts)) => opts.log_level,
        Some(cli::Commands::Validate(opts)) => opts.log_level,
        Some(cli::Commands::Completions(_)) => cli::LogLevel::Warn,
    };
    pyship::init_logging(log_level)?;

    ctrlc::set_handler(|| {
        eprintln!("interrupted, aborting release");
        process::exit(1);
    })
    .context("failed to install interrupt handler")?;

    let result = match &args.command {
        None => run_release(&args.release),
        Some(cli::Commands::Release(opts)) => run_release(opts),
        Some(cli::Commands::Validate(opts)) => pyship::run_validate(opts),
        Some(cli::Commands::Completions(opts)) => {
            let mut cmd = cli::Cli::command();
            clap_complete::generate(
                opts.shell,
                &mut cmd,
                env!("CARGO_PKG_NAME"),
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }

    Ok(())
}
