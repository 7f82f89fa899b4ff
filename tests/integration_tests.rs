//! Integration tests for the facade: keys in, frames ticked, state out.

use blockfall::core::{GameSession, Phase, RandomSource};
use blockfall::engine::{FrameConfig, FrameController};
use blockfall::input::InputHandler;
use blockfall::types::{Block, Intent, PieceKind, TICK_MS, VISIBLE_HEIGHT};

struct ZeroRng;

impl RandomSource for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }
}

#[test]
fn test_game_lifecycle() {
    let mut frame = FrameController::new(12345, FrameConfig::default());
    assert_eq!(frame.session().phase(), Phase::Spawned);
    assert!(frame.snapshot().playable());

    for _ in 0..60 {
        frame.tick(TICK_MS);
    }
    assert_eq!(frame.session().phase(), Phase::Falling);

    frame.press(Intent::HardDrop);
    let report = frame.tick(TICK_MS);
    assert_eq!(report.locks.len(), 1);
    assert_eq!(frame.session().pieces_locked(), 1);
    assert_eq!(frame.session().phase(), Phase::Spawned);
}

#[test]
fn test_snapshot_shows_active_ghost_and_board() {
    let mut frame =
        FrameController::with_session(GameSession::with_rng(ZeroRng), FrameConfig::default());

    let snap = frame.snapshot();
    let active = snap.active.unwrap();
    assert_eq!(active.kind, PieceKind::J);
    for p in active.cells {
        assert_eq!(snap.grid[p.row as usize][p.col as usize], PieceKind::J.block());
    }
    // The ghost rests on the floor and is not painted into the grid.
    let ghost = snap.ghost.unwrap();
    assert_eq!(ghost.iter().map(|p| p.row).min(), Some(0));
    assert!(ghost.iter().all(|p| snap.grid[p.row as usize][p.col as usize] == Block::Empty));
    // The spawn buffer sits above the visible well.
    assert_eq!(snap.visible_rows().len(), VISIBLE_HEIGHT as usize);
    assert!(snap
        .visible_rows()
        .iter()
        .flatten()
        .all(|b| b.is_empty()));

    frame.press(Intent::HardDrop);
    frame.tick(TICK_MS);
    let snap = frame.snapshot();
    for p in ghost {
        assert_eq!(snap.grid[p.row as usize][p.col as usize], PieceKind::J.block());
    }
    assert_eq!(snap.active.unwrap().kind, PieceKind::L);
    assert_eq!(snap.next, PieceKind::O);
}

#[test]
fn test_standalone_input_handler_feeds_session() {
    let mut session = GameSession::with_rng(ZeroRng);
    let mut input = InputHandler::with_config(100, 20);

    let mut intents = Vec::new();
    intents.extend(input.handle_press(Intent::MoveRight));
    intents.extend(input.update(140));
    for intent in intents {
        session.apply_intent(intent);
    }

    // One immediate move plus two repeats after DAS.
    assert_eq!(session.active().unwrap().shape.left_col(), 3);
}

#[test]
fn test_long_run_stays_consistent() {
    let mut frame = FrameController::new(99, FrameConfig::default());
    let script = [
        Intent::MoveLeft,
        Intent::RotateCw,
        Intent::HardDrop,
        Intent::MoveRight,
        Intent::RotateCcw,
        Intent::Hold,
        Intent::HardDrop,
    ];

    let mut last_score = 0;
    for i in 0..2000 {
        let intent = script[(i / 4) % script.len()];
        if i % 4 == 0 {
            frame.press(intent);
        }
        let report = frame.tick(TICK_MS);
        if i % 4 == 3 {
            frame.release(intent);
        }

        let session = frame.session();
        assert!(session.score() >= last_score);
        last_score = session.score();
        if report.game_over {
            assert_eq!(session.phase(), Phase::GameOver);
            break;
        }
        let piece = session.active().unwrap();
        assert!(!session.board().check_collision(&piece.shape));
    }
}
