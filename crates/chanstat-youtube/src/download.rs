//! Video download via the external `yt-dlp` tool.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::error::YoutubeError;

pub const DEFAULT_PROGRAM: &str = "yt-dlp";
pub const DEFAULT_QUALITY: &str = "best";

/// Output file name template, relative to the output directory.
const OUTPUT_TEMPLATE: &str = "%(title)s-%(id)s.%(ext)s";

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Downloads one video into `output_dir` and returns that directory.
///
/// `quality` is passed verbatim to `-f`. `program` is the downloader
/// executable, normally [`DEFAULT_PROGRAM`]. The directory is created
/// (recursively) before the downloader runs.
///
/// # Errors
///
/// - [`YoutubeError::Io`] if the directory cannot be created or the program
///   cannot be started.
/// - [`YoutubeError::DownloadFailed`] with the captured stderr if the program
///   exits unsuccessfully.
pub async fn download_video(
    video_id: &str,
    output_dir: &Path,
    quality: &str,
    program: &str,
) -> Result<PathBuf, YoutubeError> {
    tokio::fs::create_dir_all(output_dir).await?;

    let template = output_dir.join(OUTPUT_TEMPLATE);
    let url = format!("{WATCH_URL}{video_id}");
    tracing::info!(video_id, program, quality, dir = %output_dir.display(), "starting download");

    let output = Command::new(program)
        .arg("-f")
        .arg(quality)
        .arg("-o")
        .arg(&template)
        .arg(&url)
        .stdin(Stdio::null())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        tracing::warn!(video_id, code = ?output.status.code(), "download failed");
        return Err(YoutubeError::DownloadFailed {
            code: output.status.code(),
            stderr,
        });
    }

    tracing::info!(video_id, "download finished");
    Ok(output_dir.to_path_buf())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("chanstat-download-{}-{name}", std::process::id()))
            .join("nested")
    }

    #[tokio::test]
    async fn creates_directory_and_returns_it_on_success() {
        let dir = scratch_dir("ok");
        let result = download_video("abc123", &dir, DEFAULT_QUALITY, "true").await;
        assert_eq!(result.unwrap(), dir);
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }

    #[tokio::test]
    async fn non_zero_exit_is_download_failed() {
        let dir = scratch_dir("fail");
        let result = download_video("abc123", &dir, DEFAULT_QUALITY, "false").await;
        assert!(
            matches!(result, Err(YoutubeError::DownloadFailed { code: Some(1), .. })),
            "expected DownloadFailed, got: {result:?}"
        );
        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }

    #[tokio::test]
    async fn failure_carries_stderr() {
        let dir = scratch_dir("stderr");
        // `sh -f best ...` treats `best` as a script path that does not exist.
        let result = download_video("abc123", &dir, DEFAULT_QUALITY, "sh").await;
        match result {
            Err(YoutubeError::DownloadFailed { stderr, .. }) => assert!(!stderr.is_empty()),
            other => panic!("expected DownloadFailed, got: {other:?}"),
        }
        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }

    #[tokio::test]
    async fn missing_program_is_io_error() {
        let dir = scratch_dir("missing");
        let result =
            download_video("abc123", &dir, DEFAULT_QUALITY, "chanstat-no-such-downloader").await;
        assert!(matches!(result, Err(YoutubeError::Io(_))));
        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }
}
