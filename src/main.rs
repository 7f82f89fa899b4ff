//! Headless simulation runner (default binary).
//!
//! Drives a `FrameController` at a fixed timestep with a scripted input
//! pattern, prints lock events as they happen and a JSON summary at the end.
//!
//! Environment:
//! - `BLOCKFALL_SEED` (default 1)
//! - `BLOCKFALL_FRAMES` (default 3600)
//! - every `FrameConfig` override (`BLOCKFALL_DAS_MS`, ...)

use anyhow::{Context, Result};
use serde::Serialize;

use blockfall::engine::{FrameConfig, FrameController};
use blockfall::types::{Intent, TICK_MS};

const DEFAULT_SEED: u32 = 1;
const DEFAULT_FRAMES: u32 = 3600;

/// Frames each scripted intent is held for.
const HOLD_FRAMES: u32 = 6;

const SCRIPT: [Intent; 10] = [
    Intent::MoveLeft,
    Intent::RotateCw,
    Intent::MoveLeft,
    Intent::SoftDrop,
    Intent::HardDrop,
    Intent::MoveRight,
    Intent::RotateCcw,
    Intent::MoveRight,
    Intent::Hold,
    Intent::HardDrop,
];

#[derive(Debug, Serialize)]
struct Summary {
    seed: u32,
    frames: u32,
    elapsed_ms: u64,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    t_spins: u32,
    level: u32,
    gravity_ms: u32,
    game_over: bool,
    hold: Option<&'static str>,
    next: &'static str,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("[Sim] error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let seed = env_u32("BLOCKFALL_SEED")?.unwrap_or(DEFAULT_SEED);
    let frames = env_u32("BLOCKFALL_FRAMES")?.unwrap_or(DEFAULT_FRAMES);
    let config = FrameConfig::from_env()?;

    println!(
        "[Sim] seed={} frames={} das={}ms arr={}ms lock_delay={}ms gravity={}ms",
        seed, frames, config.das_ms, config.arr_ms, config.lock_delay_ms, config.gravity_ms
    );

    let mut frame = FrameController::new(seed, config);
    let mut t_spins = 0;
    let mut ran = 0;

    for i in 0..frames {
        let intent = SCRIPT[(i / HOLD_FRAMES) as usize % SCRIPT.len()];
        match i % HOLD_FRAMES {
            0 => {
                frame.press(intent);
            }
            n if n == HOLD_FRAMES - 1 => frame.release(intent),
            _ => {}
        }

        let report = frame.tick(TICK_MS);
        ran += 1;

        for lock in &report.locks {
            if lock.t_spin {
                t_spins += 1;
            }
            if lock.lines_cleared > 0 || lock.t_spin {
                println!(
                    "[Sim] frame {}: {} cleared {} line(s){} (+{})",
                    i,
                    lock.kind.map_or("?", |k| k.as_str()),
                    lock.lines_cleared,
                    if lock.t_spin { " with T-spin" } else { "" },
                    lock.line_clear_score
                );
            }
        }

        if report.game_over {
            println!("[Sim] game over at frame {}", i);
            break;
        }
    }

    let session = frame.session();
    let summary = Summary {
        seed,
        frames: ran,
        elapsed_ms: frame.play_ms(),
        score: session.score(),
        lines: session.lines(),
        pieces_locked: session.pieces_locked(),
        t_spins,
        level: frame.level(),
        gravity_ms: frame.gravity_ms(),
        game_over: session.game_over(),
        hold: session.held_piece().map(|k| k.as_str()),
        next: session.next_piece().as_str(),
    };
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn env_u32(name: &str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {name}: {raw:?}")),
        _ => Ok(None),
    }
}
