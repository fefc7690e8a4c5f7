use std::{
    io::{self, Write},
    time::Duration,
};

use clap::Args;

use crate::runtime::{ContainerRestart, StartOptions};

#[derive(Args)]
pub struct RestartArgs {
    /// Containers to restart, by name or ID
    #[arg(value_name = "CONTAINER", required = true)]
    containers: Vec<String>,
    /// Seconds to wait for stop before killing the container (runtime default: 10)
    #[arg(short, long, value_name = "SECONDS")]
    time: Option<u32>,
    /// Restore from this checkpoint (experimental, linux only)
    #[arg(long)]
    checkpoint: Option<String>,
    /// Use a custom checkpoint storage directory (experimental, linux only)
    #[arg(long, value_name = "DIR")]
    checkpoint_dir: Option<String>,
}

impl RestartArgs {
    pub async fn run(self, client: &impl ContainerRestart) -> anyhow::Result<()> {
        let request = self.into_request();
        let mut stdout = io::stdout().lock();
        restart_all(client, &request, &mut stdout).await
    }

    fn into_request(self) -> RestartRequest {
        let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());

        RestartRequest {
            targets: self.containers,
            timeout: self.time.map(|secs| Duration::from_secs(secs.into())),
            checkpoint_id: non_empty(self.checkpoint),
            checkpoint_dir: non_empty(self.checkpoint_dir),
        }
    }
}

/// One invocation of `restart`, fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartRequest {
    pub targets: Vec<String>,
    /// `None` lets the runtime apply its own grace period.
    pub timeout: Option<Duration>,
    pub checkpoint_id: Option<String>,
    pub checkpoint_dir: Option<String>,
}

impl RestartRequest {
    pub fn start_options(&self) -> StartOptions {
        StartOptions {
            checkpoint_id: self.checkpoint_id.clone(),
            checkpoint_dir: self.checkpoint_dir.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{:#}", .error)]
pub struct TargetFailure {
    pub target: String,
    pub error: anyhow::Error,
}

/// Every target that could not be restarted, in the order they were tried.
///
/// Displays as the individual messages joined by newlines.
#[derive(Debug, thiserror::Error)]
#[error("{}", join_lines(.failures))]
pub struct RestartFailures {
    pub failures: Vec<TargetFailure>,
}

fn join_lines(failures: &[TargetFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Restarts each target in order, writing its identifier to `out` as soon as
/// it succeeds.
///
/// A failed target does not stop the batch, and neither does a failed write to
/// `out`. If any target failed the result is a [`RestartFailures`], even though
/// the others were restarted and printed. Otherwise the first write error, if
/// any, is returned.
pub async fn restart_all<C, W>(
    client: &C,
    request: &RestartRequest,
    out: &mut W,
) -> anyhow::Result<()>
where
    C: ContainerRestart,
    W: Write,
{
    let mut failures = vec![];
    let mut write_error = None;

    if !request.start_options().is_plain() {
        log::debug!(
            "Restoring from checkpoint {:?} in {:?}",
            request.checkpoint_id,
            request.checkpoint_dir
        );
    }

    for target in &request.targets {
        log::debug!("Restarting container \"{target}\"");
        let options = request.start_options();

        match client
            .container_restart(target, request.timeout, &options)
            .await
        {
            Ok(()) => {
                if let Err(e) = writeln!(out, "{target}") {
                    log::warn!("Failed to report restarted container \"{target}\": {e}");
                    if write_error.is_none() {
                        write_error = Some(e);
                    }
                }
            }
            Err(error) => {
                log::debug!("Container \"{target}\" failed to restart: {error:#}");
                failures.push(TargetFailure {
                    target: target.clone(),
                    error,
                });
            }
        }
    }

    if failures.is_empty() {
        return match write_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        };
    }

    log::debug!(
        "{} of {} containers failed to restart: {}",
        failures.len(),
        request.targets.len(),
        failures
            .iter()
            .map(|f| f.target.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Err(RestartFailures { failures }.into())
}
