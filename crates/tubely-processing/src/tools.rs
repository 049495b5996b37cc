//! External media tools (`ffprobe`, `ffmpeg`)

use crate::error::ProcessingError;
use crate::probe::{parse_probe_output, probe_args, ProbeResult};
use crate::remux::{remux_args, remux_output_path};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;

/// The probe and remux capability the upload pipeline depends on.
#[async_trait]
pub trait MediaTools: Send + Sync {
    /// Read the frame geometry of the file at `path`.
    async fn probe(&self, path: &Path) -> Result<ProbeResult, ProcessingError>;

    /// Write a fast-start copy of `path` next to it and return the copy's path.
    ///
    /// The input is left in place. Output left behind on failure is unusable
    /// and must be discarded by the caller.
    async fn remux(&self, path: &Path) -> Result<PathBuf, ProcessingError>;
}

/// Validate that a path doesn't contain shell metacharacters or dangerous sequences
fn validate_path(path: &str) -> Result<(), ProcessingError> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(ProcessingError::InvalidPath(format!(
            "Path contains dangerous characters: {}",
            path
        )));
    }

    if path.contains("..") {
        return Err(ProcessingError::InvalidPath(format!(
            "Path contains directory traversal: {}",
            path
        )));
    }

    Ok(())
}

fn validate_binary(path: &str) -> Result<(), ProcessingError> {
    validate_path(path)?;

    if path.is_empty()
        || !path.chars().all(|c| {
            c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\'
        })
    {
        return Err(ProcessingError::InvalidPath(format!(
            "Tool path contains unsafe characters: {}",
            path
        )));
    }

    Ok(())
}

/// `MediaTools` backed by the ffmpeg suite, one process per call.
#[derive(Debug, Clone)]
pub struct FfmpegTools {
    ffmpeg_path: String,
    ffprobe_path: String,
}

impl FfmpegTools {
    pub fn new(ffmpeg_path: String, ffprobe_path: String) -> Result<Self, ProcessingError> {
        validate_binary(&ffmpeg_path)?;
        validate_binary(&ffprobe_path)?;

        Ok(Self {
            ffmpeg_path,
            ffprobe_path,
        })
    }

    async fn run(
        &self,
        tool: &'static str,
        program: &str,
        args: Vec<OsString>,
    ) -> Result<Output, ProcessingError> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProcessingError::Spawn { tool, source })
    }
}

#[async_trait]
impl MediaTools for FfmpegTools {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> Result<ProbeResult, ProcessingError> {
        let start = std::time::Instant::now();
        validate_path(&path.to_string_lossy())?;

        let output = self
            .run("ffprobe", &self.ffprobe_path, probe_args(path))
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::warn!(
                exit_code = ?output.status.code(),
                stderr = %stderr,
                "ffprobe exited with failure"
            );
            return Err(ProcessingError::ProbeFailed { stderr });
        }

        let result = parse_probe_output(&output.stdout)?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            width = result.width,
            height = result.height,
            "Video probe completed"
        );

        Ok(result)
    }

    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "remux"
    ))]
    async fn remux(&self, path: &Path) -> Result<PathBuf, ProcessingError> {
        let start = std::time::Instant::now();
        validate_path(&path.to_string_lossy())?;

        let output_path = remux_output_path(path);
        let output = self
            .run("ffmpeg", &self.ffmpeg_path, remux_args(path, &output_path))
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::warn!(
                exit_code = ?output.status.code(),
                stderr = %stderr,
                "ffmpeg remux exited with failure"
            );
            return Err(ProcessingError::RemuxFailed { stderr });
        }

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            output = %output_path.display(),
            "Video remux completed"
        );

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path_rejects_metacharacters() {
        assert!(validate_path("/tmp/ok/upload.mp4").is_ok());
        assert!(validate_path("/tmp/a;rm -rf /").is_err());
        assert!(validate_path("/tmp/$(whoami).mp4").is_err());
        assert!(validate_path("/tmp/../etc/passwd").is_err());
    }

    #[test]
    fn test_new_rejects_unsafe_binary_paths() {
        assert!(FfmpegTools::new("ffmpeg".into(), "ffprobe".into()).is_ok());
        assert!(FfmpegTools::new("/usr/bin/ffmpeg".into(), "/usr/bin/ffprobe".into()).is_ok());
        assert!(FfmpegTools::new("ffmpeg --evil".into(), "ffprobe".into()).is_err());
        assert!(FfmpegTools::new("ffmpeg".into(), String::new()).is_err());
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let tools = FfmpegTools::new(
            "/nonexistent/tubely-ffmpeg".into(),
            "/nonexistent/tubely-ffprobe".into(),
        )
        .unwrap();

        let result = tools.probe(Path::new("/tmp/upload.mp4")).await;
        assert!(matches!(
            result,
            Err(ProcessingError::Spawn {
                tool: "ffprobe",
                ..
            })
        ));

        let result = tools.remux(Path::new("/tmp/upload.mp4")).await;
        assert!(matches!(
            result,
            Err(ProcessingError::Spawn { tool: "ffmpeg", .. })
        ));
    }

    #[tokio::test]
    async fn test_unsafe_input_path_rejected_before_spawn() {
        let tools = FfmpegTools::new("ffmpeg".into(), "ffprobe".into()).unwrap();
        let result = tools.probe(Path::new("/tmp/x|y.mp4")).await;
        assert!(matches!(result, Err(ProcessingError::InvalidPath(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_probe_failure() {
        // `sh -v error ...` tries to run a script named "error" and exits non-zero.
        let tools = FfmpegTools::new("ffmpeg".into(), "sh".into()).unwrap();
        let result = tools.probe(Path::new("/tmp/upload.mp4")).await;
        match result {
            Err(ProcessingError::ProbeFailed { stderr }) => assert!(!stderr.is_empty()),
            other => panic!("expected ProbeFailed, got {:?}", other),
        }
    }
}
