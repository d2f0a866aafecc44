//! Defender headless runner
//!
//! Runs one session at the fixed tick rate without a window: the autopilot
//! flies the ship (unless disabled in settings), events are logged with their
//! audio cues and the final snapshot is printed as JSON.
//!
//! Usage: `defender [--seed N] [--ticks N] [--settings FILE]`

use std::path::PathBuf;
use std::process::ExitCode;

use defender::Settings;
use defender::audio::AudioQueue;
use defender::sim::{GameState, TickInput, tick};

#[derive(Debug, Default)]
struct Args {
    seed: Option<u64>,
    ticks: Option<u64>,
    settings: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .ok_or_else(|| format!("missing value for {}", flag))
        };
        match flag.as_str() {
            "--seed" => {
                let v = value()?;
                args.seed = Some(v.parse().map_err(|_| format!("invalid seed: {}", v))?);
            }
            "--ticks" => {
                let v = value()?;
                args.ticks = Some(v.parse().map_err(|_| format!("invalid tick count: {}", v))?);
            }
            "--settings" => args.settings = Some(PathBuf::from(value()?)),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(args)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: defender [--seed N] [--ticks N] [--settings FILE]");
            return ExitCode::FAILURE;
        }
    };

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        settings.demo_ticks = ticks;
    }

    log::info!("Defender (headless) starting with seed {}", settings.seed);

    let mut state = GameState::from_settings(&settings);
    let mut audio = AudioQueue::new();
    let input = TickInput {
        autopilot: settings.autopilot,
        ..Default::default()
    };

    for _ in 0..settings.demo_ticks {
        tick(&mut state, &input);
        audio.push_events(&state.events);
        for effect in audio.drain() {
            log::trace!("tick {}: {:?} {:?}", state.time_ticks, effect, effect.tones());
        }
        if state.is_over() {
            break;
        }
    }

    log::info!(
        "Session finished after {} ticks: score {}, lives {}, humanoids {}",
        state.time_ticks,
        state.score,
        state.player.lives,
        state.humanoids.len()
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}
