use std::time::Duration;

use anyhow::anyhow;

use crate::bus::{ContainerRuntimeProxy, NO_TIMEOUT_OVERRIDE};

/// Checkpoint selection applied when the container is started again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartOptions {
    pub checkpoint_id: Option<String>,
    pub checkpoint_dir: Option<String>,
}

impl StartOptions {
    /// No checkpoint restore requested.
    pub fn is_plain(&self) -> bool {
        self.checkpoint_id.is_none() && self.checkpoint_dir.is_none()
    }

    fn wire_checkpoint(&self) -> (&str, &str) {
        (
            self.checkpoint_id.as_deref().unwrap_or_default(),
            self.checkpoint_dir.as_deref().unwrap_or_default(),
        )
    }
}

/// Restart capability of the container runtime.
///
/// `timeout` of `None` leaves the grace period to the runtime. An `Err` means
/// the container was not restarted, and its text is the runtime's message.
#[allow(async_fn_in_trait)]
pub trait ContainerRestart {
    async fn container_restart(
        &self,
        target: &str,
        timeout: Option<Duration>,
        options: &StartOptions,
    ) -> anyhow::Result<()>;
}

impl ContainerRestart for ContainerRuntimeProxy<'_> {
    async fn container_restart(
        &self,
        target: &str,
        timeout: Option<Duration>,
        options: &StartOptions,
    ) -> anyhow::Result<()> {
        let (checkpoint_id, checkpoint_dir) = options.wire_checkpoint();

        self.restart(target, wire_timeout(timeout), checkpoint_id, checkpoint_dir)
            .await
            .map_err(restart_error)
    }
}

fn wire_timeout(timeout: Option<Duration>) -> i64 {
    timeout.map_or(NO_TIMEOUT_OVERRIDE, |t| {
        i64::try_from(t.as_secs()).unwrap_or(i64::MAX)
    })
}

// Surface the daemon's own message rather than "<error name>: <message>"
fn restart_error(e: zbus::Error) -> anyhow::Error {
    match e {
        zbus::Error::MethodError(_, Some(message), _) => anyhow!(message),
        e => e.into(),
    }
}
