// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run a migration workload and record its breadcrumb.

use anyhow::Result;
use clap::Args;
use crumbs_core::RecorderConfig;
use crumbs_recorder::{BreadcrumbRecorder, RecorderError, SystemDeps};
use std::process::{Command, ExitStatus};

use crate::exit_error::ExitError;

/// Exit code when the breadcrumb cannot be started and nothing was run
pub const EXIT_NOT_STARTED: i32 = 2;
/// Exit code when the workload could not be spawned
pub const EXIT_SPAWN_FAILED: i32 = 127;

#[derive(Args)]
pub struct RunArgs {
    /// Program to run, followed by its arguments
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Collect early data, run the workload, then finish the breadcrumb.
///
/// `argv` is this process's own command line, recorded with secrets redacted.
/// A breadcrumb that cannot be persisted is reported but does not change the
/// exit code, which is always the workload's.
pub fn handle(args: RunArgs, config: RecorderConfig, argv: &[String]) -> Result<()> {
    let Some((program, program_args)) = args.command.split_first() else {
        return Err(ExitError::new(EXIT_NOT_STARTED, "no command given").into());
    };

    let deps = SystemDeps::system(&config);
    let collected = BreadcrumbRecorder::new(config, deps)
        .collect_early_data(argv)
        .map_err(|e| ExitError::new(EXIT_NOT_STARTED, format!("cannot start breadcrumb: {e}")))?;

    let code = match Command::new(program).args(program_args).status() {
        Ok(status) => exit_code(status),
        Err(e) => {
            eprintln!("error: failed to run {program}: {e}");
            EXIT_SPAWN_FAILED
        }
    };
    tracing::debug!(program = %program, code, "workload finished");

    let finished = if code == 0 { collected.finish_success() } else { collected.finish_fail() };
    match finished {
        Ok(_) => {}
        Err(e @ RecorderError::TargetUnread { .. }) => {
            tracing::warn!(error = %e, "target OS identity not recorded");
            eprintln!("warning: {e}");
        }
        Err(e) => {
            tracing::warn!(error = %e, "breadcrumb not recorded");
            eprintln!("warning: breadcrumb not recorded: {e}");
        }
    }

    if code != 0 {
        return Err(ExitError::silent(code).into());
    }
    Ok(())
}

/// The workload's exit code, or 128 + signal number when it was killed.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
