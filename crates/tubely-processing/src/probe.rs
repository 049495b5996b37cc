//! ffprobe invocation and output parsing

use crate::error::ProcessingError;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::Path;
use tubely_core::Orientation;

/// Frame geometry of the first video stream of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub width: u32,
    pub height: u32,
}

impl ProbeResult {
    pub fn orientation(&self) -> Orientation {
        Orientation::from_dimensions(self.width, self.height)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    codec_type: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

/// Arguments for `ffprobe`, path last.
pub fn probe_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-v", "error", "-print_format", "json", "-show_streams"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(path.as_os_str().to_os_string());
    args
}

/// Parse `ffprobe -print_format json -show_streams` output.
///
/// Picks the first stream flagged as video, falling back to the first stream
/// when none carries a `codec_type`. Absent or zero dimensions are an error.
pub fn parse_probe_output(stdout: &[u8]) -> Result<ProbeResult, ProcessingError> {
    let output: ProbeOutput = serde_json::from_slice(stdout).map_err(|e| {
        ProcessingError::NoStreamFound(format!("Failed to parse ffprobe output: {}", e))
    })?;

    let stream = output
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .or_else(|| output.streams.first())
        .ok_or_else(|| ProcessingError::NoStreamFound("ffprobe reported no streams".to_string()))?;

    match (stream.width, stream.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            Ok(ProbeResult { width, height })
        }
        _ => Err(ProcessingError::NoStreamFound(
            "Stream has no frame dimensions".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_probe_args_match_tool_contract() {
        let args = probe_args(&PathBuf::from("/tmp/x/upload.mp4"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "/tmp/x/upload.mp4"
            ]
        );
    }

    #[test]
    fn test_parse_first_stream_dimensions() {
        let json = br#"{"streams":[{"index":0,"codec_type":"video","width":1280,"height":720}]}"#;
        let result = parse_probe_output(json).unwrap();
        assert_eq!(
            result,
            ProbeResult {
                width: 1280,
                height: 720
            }
        );
        assert_eq!(result.orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_parse_skips_leading_audio_stream() {
        let json = br#"{"streams":[
            {"index":0,"codec_type":"audio","sample_rate":"48000"},
            {"index":1,"codec_type":"video","width":1080,"height":1920}
        ]}"#;
        let result = parse_probe_output(json).unwrap();
        assert_eq!(result.orientation(), Orientation::Portrait);
    }

    #[test]
    fn test_parse_untyped_streams_uses_first() {
        let json = br#"{"streams":[{"width":640,"height":480},{"width":1920,"height":1080}]}"#;
        let result = parse_probe_output(json).unwrap();
        assert_eq!(result.width, 640);
    }

    #[test]
    fn test_parse_empty_streams_fails() {
        let result = parse_probe_output(br#"{"streams":[]}"#);
        assert!(matches!(result, Err(ProcessingError::NoStreamFound(_))));

        let result = parse_probe_output(br#"{}"#);
        assert!(matches!(result, Err(ProcessingError::NoStreamFound(_))));
    }

    #[test]
    fn test_parse_zero_dimensions_fails() {
        let json = br#"{"streams":[{"codec_type":"video","width":0,"height":720}]}"#;
        assert!(matches!(
            parse_probe_output(json),
            Err(ProcessingError::NoStreamFound(_))
        ));
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(matches!(
            parse_probe_output(b"not json"),
            Err(ProcessingError::NoStreamFound(_))
        ));
    }
}
