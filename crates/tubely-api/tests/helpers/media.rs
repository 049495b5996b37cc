use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tubely_processing::remux::remux_output_path;
use tubely_processing::{MediaTools, ProbeResult, ProcessingError};

pub const FASTSTART_MARKER: &[u8] = b"faststart:";

/// Media tools that never spawn ffmpeg.
///
/// `remux` prefixes the input with a marker; `probe` reports fixed dimensions
/// or fails when built with `failing_probe`.
pub struct StubTools {
    width: u32,
    height: u32,
    fail_probe: bool,
}

impl StubTools {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fail_probe: false,
        }
    }

    pub fn failing_probe() -> Self {
        Self {
            width: 0,
            height: 0,
            fail_probe: true,
        }
    }
}

#[async_trait]
impl MediaTools for StubTools {
    async fn probe(&self, _path: &Path) -> Result<ProbeResult, ProcessingError> {
        if self.fail_probe {
            return Err(ProcessingError::ProbeFailed {
                stderr: "Invalid data found when processing input".to_string(),
            });
        }
        Ok(ProbeResult {
            width: self.width,
            height: self.height,
        })
    }

    async fn remux(&self, path: &Path) -> Result<PathBuf, ProcessingError> {
        let output = remux_output_path(path);
        let mut data = FASTSTART_MARKER.to_vec();
        data.extend_from_slice(&tokio::fs::read(path).await.map_err(|source| {
            ProcessingError::Spawn {
                tool: "ffmpeg",
                source,
            }
        })?);
        tokio::fs::write(&output, data)
            .await
            .map_err(|source| ProcessingError::Spawn {
                tool: "ffmpeg",
                source,
            })?;
        Ok(output)
    }
}
