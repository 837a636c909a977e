//! # sprout-adapter-camera-cli
//!
//! Still-image capture through the platform capture command (`raspistill`
//! and compatible tools): `<cmd> -o - -w <width> -h <height>` writes JPEG
//! bytes to stdout. Bounded by a timeout like every external invocation.

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;

use sprout_app::ports::CameraCapture;
use sprout_domain::error::SproutError;

/// Default bound on a capture invocation; stills can take a few seconds.
pub const DEFAULT_CAPTURE_TIMEOUT: Duration = Duration::from_secs(30);

/// Camera invoking the configured capture command per shot.
#[derive(Debug, Clone)]
pub struct CliCamera {
    command: PathBuf,
    width: u32,
    height: u32,
    timeout: Duration,
}

impl CliCamera {
    /// Create a camera for `command` producing `width`×`height` stills.
    pub fn new(command: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            command: command.into(),
            width,
            height,
            timeout: DEFAULT_CAPTURE_TIMEOUT,
        }
    }

    /// Override the per-capture timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl CameraCapture for CliCamera {
    async fn capture(&self) -> Result<Vec<u8>, SproutError> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.command)
                .arg("-o")
                .arg("-")
                .arg("-w")
                .arg(self.width.to_string())
                .arg("-h")
                .arg(self.height.to_string())
                .output(),
        )
        .await
        .map_err(|_| SproutError::CaptureFailed("capture command timed out".to_string()))?
        .map_err(|err| SproutError::CaptureFailed(err.to_string()))?;

        if !output.status.success() {
            return Err(SproutError::CaptureFailed(format!(
                "capture command exited with {}",
                output.status
            )));
        }
        Ok(output.stdout)
    }
}
