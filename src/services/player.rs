//! Clip preview via an external player

use crate::model::clip::Clip;
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Program and arguments that preview `clip`
///
/// A rendered clip plays its own file. Otherwise the source is played from
/// the clip start for the clip length, which needs an ffplay-style player.
pub fn build_player_command(
    player: &[String],
    clip: &Clip,
    source: Option<&Path>,
) -> Result<(String, Vec<String>)> {
    let Some((program, leading)) = player.split_first() else {
        bail!("No player command configured");
    };
    let mut args = leading.to_vec();

    if let Some(path) = &clip.path {
        args.push(path.to_string_lossy().to_string());
    } else if let Some(source) = source {
        args.extend([
            "-ss".to_string(),
            format!("{:.3}", clip.start_time.max(0.0)),
            "-t".to_string(),
            format!("{:.3}", clip.duration.max(0.0)),
            source.to_string_lossy().to_string(),
        ]);
    } else {
        bail!("\"{}\" has nothing to play yet", clip.title);
    }

    Ok((program.clone(), args))
}

/// Launch the player without waiting for it
pub fn launch(player: &[String], clip: &Clip, source: Option<&Path>) -> Result<()> {
    let (program, args) = build_player_command(player, clip, source)?;
    tracing::info!(clip = %clip.id, %program, "launching preview");

    Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to launch player '{}'", program))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::clip::sample_clip;
    use std::path::PathBuf;

    fn ffplay() -> Vec<String> {
        vec!["ffplay".to_string(), "-autoexit".to_string()]
    }

    #[test]
    fn test_rendered_clip_plays_its_file() {
        let mut clip = sample_clip(0);
        clip.path = Some(PathBuf::from("/r/a.mp4"));
        let (program, args) =
            build_player_command(&ffplay(), &clip, Some(Path::new("/src.mp4"))).unwrap();
        assert_eq!(program, "ffplay");
        assert_eq!(args, vec!["-autoexit".to_string(), "/r/a.mp4".to_string()]);
    }

    #[test]
    fn test_pending_clip_seeks_into_source() {
        let clip = sample_clip(2);
        let (_, args) =
            build_player_command(&ffplay(), &clip, Some(Path::new("/src.mp4"))).unwrap();
        assert_eq!(
            args,
            vec!["-autoexit", "-ss", "50.000", "-t", "30.000", "/src.mp4"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_nothing_to_play() {
        let clip = sample_clip(0);
        assert!(build_player_command(&ffplay(), &clip, None).is_err());
        assert!(build_player_command(&[], &clip, Some(Path::new("/src.mp4"))).is_err());
    }
}
