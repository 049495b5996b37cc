//! Fast-start remux (stream copy with the index moved to the front)

use std::ffi::OsString;
use std::path::{Path, PathBuf};

const REMUX_SUFFIX: &str = ".processing";

/// Where the remuxed copy of `input` is written: the input path plus `.processing`.
pub fn remux_output_path(input: &Path) -> PathBuf {
    let mut out = input.as_os_str().to_os_string();
    out.push(REMUX_SUFFIX);
    PathBuf::from(out)
}

/// Arguments for `ffmpeg`. Samples are copied untouched.
pub fn remux_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-i"),
        input.as_os_str().to_os_string(),
        OsString::from("-c"),
        OsString::from("copy"),
        OsString::from("-movflags"),
        OsString::from("faststart"),
        OsString::from("-f"),
        OsString::from("mp4"),
        output.as_os_str().to_os_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_appends_suffix() {
        let out = remux_output_path(Path::new("/tmp/tubely-upload-x/upload.mp4"));
        assert_eq!(out, PathBuf::from("/tmp/tubely-upload-x/upload.mp4.processing"));
    }

    #[test]
    fn test_remux_args() {
        let input = Path::new("/tmp/a.mp4");
        let output = remux_output_path(input);
        let args: Vec<String> = remux_args(input, &output)
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-i",
                "/tmp/a.mp4",
                "-c",
                "copy",
                "-movflags",
                "faststart",
                "-f",
                "mp4",
                "/tmp/a.mp4.processing"
            ]
        );
    }
}
