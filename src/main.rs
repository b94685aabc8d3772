//! clipreel - browse, preview and export short clips cut from a long video
//!
//! Usage: `clipreel [<video>] [--report <report.json>] [--duration <secs>]`

mod action;
mod app;
mod component;
mod components;
mod config;
mod dispatch;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::{load_report, ClipBackend, ClipServices, Source};
use crate::tui::{Tui, TuiEvent};
use anyhow::{bail, Context, Result};
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;

const USAGE: &str = "\
Usage: clipreel [<video>] [options]

Options:
  --report <file>     Load clips from a generator report instead of generating
  --duration <secs>   Source length in seconds (skips ffprobe)
  -h, --help          Show this message";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    source: Option<PathBuf>,
    report: Option<PathBuf>,
    duration: Option<f64>,
    help: bool,
}

fn parse_args<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--report" => {
                let value = args.next().context("--report needs a file")?;
                parsed.report = Some(PathBuf::from(value));
            }
            "--duration" => {
                let value = args.next().context("--duration needs a number of seconds")?;
                let secs: f64 = value
                    .parse()
                    .with_context(|| format!("invalid duration '{}'", value))?;
                if !secs.is_finite() || secs <= 0.0 {
                    bail!("duration must be positive, got {}", value);
                }
                parsed.duration = Some(secs);
            }
            flag if flag.starts_with('-') => bail!("unknown option '{}'", flag),
            path => {
                if parsed.source.is_some() {
                    bail!("only one source video can be given");
                }
                parsed.source = Some(PathBuf::from(path));
            }
        }
    }

    Ok(parsed)
}

fn main() -> Result<()> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {:#}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {:#}", e);
    }

    let config = Config::load_or_default();
    tracing::info!(source = ?args.source, report = ?args.report, "starting clipreel");

    // Imported clips are loaded before the terminal is taken over so a bad
    // report is reported on stderr
    let initial_clips = match &args.report {
        Some(report) => Some(load_report(report, config.clip_duration)?),
        None => None,
    };

    let source = args.source.map(|path| Source {
        path,
        known_duration: args.duration,
    });
    let services = ClipServices::new(&config, source).with_report(args.report);

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let mut app = App::new(&config, services, initial_clips);
    app.init()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        tracing::error!("fatal: {:#}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("bye");
    Ok(())
}

fn run_app<B: ClipBackend>(tui: &mut Tui, app: &mut App<B>) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!("draw failed: {:#}", e);
            }
        })?;

        let action = match tui.next_event()? {
            TuiEvent::Tick => Some(Action::Tick),
            TuiEvent::Input(Event::Key(key)) => app.handle_key_event(key)?,
            TuiEvent::Input(Event::Mouse(mouse)) => app.handle_mouse_event(mouse)?,
            TuiEvent::Input(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            TuiEvent::Input(_) => None,
        };

        // An action may produce a follow-up
        let mut current = action;
        while let Some(a) = current {
            current = app.update(a)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_source_and_options() {
        let args = parse(&["talk.mp4", "--duration", "95.5", "--report", "r.json"]).unwrap();
        assert_eq!(args.source, Some(PathBuf::from("talk.mp4")));
        assert_eq!(args.duration, Some(95.5));
        assert_eq!(args.report, Some(PathBuf::from("r.json")));
        assert!(!args.help);
    }

    #[test]
    fn test_parse_nothing_is_empty() {
        assert_eq!(parse(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse(&["--duration"]).is_err());
        assert!(parse(&["--duration", "-3"]).is_err());
        assert!(parse(&["--duration", "abc"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["a.mp4", "b.mp4"]).is_err());
    }

    #[test]
    fn test_parse_help() {
        assert!(parse(&["-h"]).unwrap().help);
    }
}
