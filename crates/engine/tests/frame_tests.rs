//! Frame controller behaviour over longer synthetic timelines.

use blockfall_engine::core::{GameSession, Phase, RandomSource};
use blockfall_engine::types::{Intent, PieceKind, TICK_MS};
use blockfall_engine::{FrameConfig, FrameController};

struct ZeroRng;

impl RandomSource for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }
}

fn zero_controller(config: FrameConfig) -> FrameController<ZeroRng> {
    FrameController::with_session(GameSession::with_rng(ZeroRng), config)
}

#[test]
fn test_idle_piece_falls_and_locks_on_its_own() {
    let mut frame = zero_controller(FrameConfig::default());
    let mut descended = 0;
    let mut locks = Vec::new();

    // 20 rows at 800 ms plus the lock delay, with headroom.
    for _ in 0..(17_000 / TICK_MS) {
        let report = frame.tick(TICK_MS);
        descended += report.descended;
        locks.extend(report.locks);
        if !locks.is_empty() {
            break;
        }
    }

    assert_eq!(descended, 20);
    assert_eq!(locks.len(), 1);
    assert_eq!(locks[0].kind, Some(PieceKind::J));
    assert_eq!(locks[0].hard_drop_rows, None);
    assert_eq!(frame.session().score(), 20);
}

#[test]
fn test_soft_drop_hold_descends_every_repeat() {
    let mut frame = zero_controller(FrameConfig::default());
    let start = frame.session().active().unwrap().shape.bottom_row();

    assert!(frame.press(Intent::SoftDrop));
    // Immediate step, then one per 50 ms.
    frame.tick(100);
    let bottom = frame.session().active().unwrap().shape.bottom_row();
    assert_eq!(bottom, start - 3);
    assert_eq!(frame.session().score(), 3);

    frame.release(Intent::SoftDrop);
    frame.tick(100);
    assert_eq!(frame.session().active().unwrap().shape.bottom_row(), bottom);
}

#[test]
fn test_hold_resets_timers_and_swaps_piece() {
    let mut frame = zero_controller(FrameConfig::default());
    frame.tick(700);

    assert!(frame.press(Intent::Hold));
    frame.tick(16);
    assert_eq!(frame.session().held_piece(), Some(PieceKind::J));
    assert_eq!(frame.session().active().unwrap().kind, PieceKind::L);
    assert_eq!(frame.session().phase(), Phase::Spawned);

    // The gravity accumulator restarted with the new piece.
    assert_eq!(frame.tick(700).descended, 0);
    assert_eq!(frame.tick(100).descended, 1);
}

#[test]
fn test_sliding_on_floor_keeps_piece_alive() {
    let mut frame = zero_controller(FrameConfig::default());
    while frame.session_mut().advance_gravity() {}

    let mut locked = false;
    for intent in [Intent::MoveRight, Intent::MoveLeft]
        .into_iter()
        .cycle()
        .take(6)
    {
        locked |= !frame.tick(200).locks.is_empty();
        assert!(frame.press(intent));
        locked |= !frame.tick(10).locks.is_empty();
        frame.release(intent);
    }

    assert!(!locked);
    assert_eq!(frame.session().pieces_locked(), 0);
    assert_eq!(frame.session().lock_resets(), 6);
    assert_eq!(frame.session().phase(), Phase::Locking);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = || {
        let mut frame = FrameController::new(424242, FrameConfig::default());
        let pattern = [
            Intent::MoveLeft,
            Intent::RotateCw,
            Intent::MoveRight,
            Intent::HardDrop,
        ];
        for i in 0..400 {
            let intent = pattern[i % pattern.len()];
            frame.press(intent);
            frame.tick(TICK_MS);
            frame.release(intent);
        }
        frame.snapshot()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_snapshot_matches_session_state() {
    let mut frame = FrameController::new(7, FrameConfig::default());
    frame.press(Intent::HardDrop);
    frame.tick(TICK_MS);

    let snap = frame.snapshot();
    let session = frame.session();
    assert_eq!(snap.score, session.score());
    assert_eq!(snap.pieces_locked, 1);
    assert_eq!(snap.next, session.next_piece());
    assert_eq!(snap.active.map(|a| a.kind), session.active().map(|a| a.kind));
    assert!(snap.playable());
}
