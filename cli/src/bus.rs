use std::fmt;

use anyhow::Context;
use clap::ValueEnum;
use zbus::{dbus_proxy, Connection, Result};

/// Wire value for "let the runtime pick its own grace period".
pub const NO_TIMEOUT_OVERRIDE: i64 = -1;

#[dbus_proxy(
    interface = "org.berth.Containers",
    default_service = "org.berth.Containers",
    default_path = "/org/berth/Containers"
)]
pub trait ContainerRuntime {
    /// `timeout` is in seconds, [`NO_TIMEOUT_OVERRIDE`] when unset.
    /// Empty checkpoint strings mean a plain restart.
    async fn restart(
        &self,
        id: &str,
        timeout: i64,
        checkpoint_id: &str,
        checkpoint_dir: &str,
    ) -> Result<()>;
}

/// Which message bus the runtime daemon is registered on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BusKind {
    /// Per-user session bus
    #[default]
    Session,
    /// System-wide bus
    System,
}

impl fmt::Display for BusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusKind::Session => f.write_str("session"),
            BusKind::System => f.write_str("system"),
        }
    }
}

pub async fn connect(kind: BusKind) -> anyhow::Result<Connection> {
    log::debug!("Connecting to the {kind} bus");
    let connection = match kind {
        BusKind::Session => Connection::session().await,
        BusKind::System => Connection::system().await,
    };
    connection.with_context(|| format!("Failed to connect to the {kind} bus"))
}
