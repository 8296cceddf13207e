//! Typing Chase entry point
//!
//! Headless driver: runs a session at the fixed rate with the autopilot at
//! the keyboard, then prints the outcome and the leaderboard. A windowed
//! front end feeds the same `Session` from its own event loop.

use std::path::PathBuf;

use typing_chase::autopilot::Autopilot;
use typing_chase::consts::*;
use typing_chase::persistence::{DEFAULT_SCORE_FILE, JsonFileStore};
use typing_chase::platform::ManualClock;
use typing_chase::sim::{GameEvent, GamePhase, InputEvent};
use typing_chase::{Session, Tuning};

/// Ten simulated minutes
const DEFAULT_MAX_FRAMES: u64 = 10 * 60 * SIM_HZ as u64;

struct Args {
    seed: u64,
    scores: PathBuf,
    tuning: Option<PathBuf>,
    max_frames: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        seed: clock_seed(),
        scores: PathBuf::from(DEFAULT_SCORE_FILE),
        tuning: None,
        max_frames: DEFAULT_MAX_FRAMES,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--scores" => args.scores = iter.next().ok_or("--scores needs a path")?.into(),
            "--tuning" => args.tuning = Some(iter.next().ok_or("--tuning needs a path")?.into()),
            "--max-frames" => {
                let value = iter.next().ok_or("--max-frames needs a number")?;
                args.max_frames = value
                    .parse()
                    .map_err(|_| format!("bad frame count: {value}"))?;
            }
            "-h" | "--help" => {
                return Err(
                    "usage: typing-chase [SEED] [--scores PATH] [--tuning PATH] [--max-frames N]"
                        .to_string(),
                );
            }
            other => {
                args.seed = other
                    .parse()
                    .map_err(|_| format!("unknown argument: {other}"))?;
            }
        }
    }
    Ok(args)
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let tuning = args
        .tuning
        .as_deref()
        .map(Tuning::load)
        .unwrap_or_default();
    log::info!("Typing Chase (headless) starting, seed {}", args.seed);

    let clock = ManualClock::new();
    let store = JsonFileStore::new(&args.scores);
    let mut session = Session::new(args.seed, tuning, clock.clone(), store);
    let mut pilot = Autopilot::new(args.seed, 6.0, 0.04);

    let mut frames = 0;
    while frames < args.max_frames && !session.should_quit() {
        let mut input = pilot.next_inputs(&session.view(), SIM_DT);
        if session.phase().is_terminal() {
            input.push(InputEvent::Quit);
        }

        for event in session.update(&input, SIM_DT) {
            match event {
                GameEvent::LevelUp { level } => println!("level {level}"),
                GameEvent::Caught { .. } | GameEvent::Escaped { .. } => {
                    if let Ok(json) = serde_json::to_string(&session.view()) {
                        log::debug!("Final frame: {json}");
                    }
                }
                _ => {}
            }
        }

        clock.advance_secs(SIM_DT);
        frames += 1;
    }

    let state = session.state();
    let outcome = match state.phase {
        GamePhase::Victory => "VICTORY! You caught the runner!",
        GamePhase::GameOver => "GAME OVER! The runner escaped!",
        GamePhase::Playing | GamePhase::Paused => "Out of time, the chase goes on.",
    };
    println!("{outcome}");
    println!(
        "Final score: {}  level: {}  ({:.1}s simulated)",
        state.score,
        state.level,
        frames as f32 * SIM_DT
    );
    println!("High scores:");
    for (i, score) in session.high_scores().scores().iter().enumerate() {
        println!("{}. {}", i + 1, score);
    }
}
