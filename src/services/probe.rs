//! Source video probing through ffprobe

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Build the ffprobe invocation that prints the container duration
pub fn build_probe_args(source: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-show_entries".to_string(),
        "format=duration".to_string(),
        "-of".to_string(),
        "default=noprint_wrappers=1:nokey=1".to_string(),
        source.to_string_lossy().to_string(),
    ]
}

/// Parse ffprobe's duration output (first non-empty line, seconds)
pub fn parse_duration(output: &str) -> Result<f64> {
    let line = output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .context("ffprobe printed no duration")?;

    let duration: f64 = line
        .parse()
        .with_context(|| format!("unexpected ffprobe output: {line}"))?;

    if !duration.is_finite() || duration <= 0.0 {
        bail!("source has no usable duration ({line})");
    }
    Ok(duration)
}

/// Duration of `source` in seconds
pub fn probe_duration(ffprobe: &str, source: &Path) -> Result<f64> {
    let output = Command::new(ffprobe)
        .args(build_probe_args(source))
        .output()
        .with_context(|| format!("failed to run {ffprobe}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{ffprobe} failed: {}", stderr.trim());
    }

    let duration = parse_duration(&String::from_utf8_lossy(&output.stdout))?;
    tracing::info!(source = %source.display(), duration, "probed source");
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("734.120000\n").unwrap(), 734.12);
        assert_eq!(parse_duration("\n  12.5  \n").unwrap(), 12.5);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("N/A").is_err());
        assert!(parse_duration("0").is_err());
        assert!(parse_duration("-4").is_err());
    }

    #[test]
    fn test_probe_args_end_with_source() {
        let args = build_probe_args(&PathBuf::from("/videos/talk.mp4"));
        assert_eq!(args.last().unwrap(), "/videos/talk.mp4");
        assert!(args.contains(&"format=duration".to_string()));
    }

    #[test]
    fn test_missing_binary_is_an_error() {
        let result = probe_duration("clipreel-no-such-ffprobe", &PathBuf::from("x.mp4"));
        assert!(result.is_err());
    }
}
