//! # sprout-adapter-output-cli
//!
//! Actuator gateway over the external output command. The command owns the
//! GPIO electrics; this adapter only speaks its convention:
//! `<cmd> <channel>` reads a channel, `<cmd> <channel> 0|1` writes it, and
//! either way the resulting state is printed to stdout as an integer.
//!
//! Every invocation is bounded by a timeout so a hung helper process
//! cannot starve the automation loop or the HTTP listener.

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;

use sprout_app::ports::ActuatorGateway;
use sprout_domain::error::SproutError;

/// Default bound on a single output-command invocation.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway invoking the configured output command per call.
///
/// Holds no cached state: every read spawns the command again, so callers
/// always observe real hardware state.
#[derive(Debug, Clone)]
pub struct CliOutputGateway {
    command: PathBuf,
    timeout: Duration,
}

impl CliOutputGateway {
    /// Create a gateway for `command` with the default timeout.
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Override the per-invocation timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn invoke(&self, channel: &str, value: Option<&str>) -> Result<bool, SproutError> {
        let mut command = Command::new(&self.command);
        command.arg(channel);
        if let Some(value) = value {
            command.arg(value);
        }

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| SproutError::actuator_io(channel, "output command timed out"))?
            .map_err(|err| SproutError::actuator_io(channel, err))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(channel, %stderr, "output command failed");
            return Err(SproutError::actuator_io(
                channel,
                format!("output command exited with {}", output.status),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.trim().parse::<i64>() {
            Ok(state) => Ok(state != 0),
            Err(_) => Err(SproutError::actuator_io(
                channel,
                format!("unparseable output state {:?}", stdout.trim()),
            )),
        }
    }
}

impl ActuatorGateway for CliOutputGateway {
    async fn read_state(&self, channel: &str) -> Result<bool, SproutError> {
        self.invoke(channel, None).await
    }

    async fn write_state(&self, channel: &str, on: bool) -> Result<(), SproutError> {
        self.invoke(channel, Some(if on { "1" } else { "0" }))
            .await
            .map(|_| ())
    }
}
