//! Integration tests - whole sessions driven through the public API

use tui_match3::core::{Board, ClickOutcome, GameConfig, GameSession};
use tui_match3::engine::{apply_hint, find_valid_swaps, hint, is_stuck, HintError};
use tui_match3::types::{
    GameStatus, IgnoreReason, Position, StepEvent, SwapStatus, GRID_SIZE, TILE_REWARD,
};

const SIZE: usize = GRID_SIZE as usize;

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col).unwrap()
}

fn calm_kinds() -> [[u8; SIZE]; SIZE] {
    let mut kinds = [[0u8; SIZE]; SIZE];
    for (r, row) in kinds.iter_mut().enumerate() {
        for (c, kind) in row.iter_mut().enumerate() {
            *kind = ((r + 2 * c) % 6) as u8;
        }
    }
    kinds
}

/// Calm board with exactly two valid swaps: (3,1)-(4,1) and (4,1)-(4,2).
fn one_move_board() -> Board {
    let mut kinds = calm_kinds();
    kinds[3][0] = 0;
    kinds[3][1] = 1;
    kinds[3][2] = 0;
    kinds[4][1] = 0;
    Board::from_kinds(kinds)
}

fn session_with(board: Board, config: GameConfig) -> GameSession {
    let mut session = GameSession::new(config);
    session.set_board(board);
    session
}

/// Play valid swaps until the budget runs out, shuffling past dead boards.
fn play_out(session: &mut GameSession) {
    let mut guard = 0;
    while !session.status().is_terminal() {
        guard += 1;
        assert!(guard < 1000, "session never finished");
        match apply_hint(session) {
            Ok(outcome) => {
                assert_eq!(outcome.status, SwapStatus::Accepted);
                session.drain_steps();
            }
            Err(HintError::NoValidSwap) => assert!(session.shuffle()),
            Err(HintError::Busy) => panic!("steps were drained"),
        }
    }
}

#[test]
fn test_new_session_is_playable() {
    let session = GameSession::new(GameConfig::default());
    let snap = session.snapshot();

    assert_eq!(snap.status, GameStatus::Playing);
    assert_eq!(snap.moves, 30);
    assert_eq!(snap.target_score, 1000);
    assert_eq!(snap.score, 0);
    assert!(snap.playable());
    assert!(snap.board.iter().flatten().all(|&code| code != 0));
}

#[test]
fn test_accepted_swap_accounting() {
    let mut session = session_with(one_move_board(), GameConfig::default());

    let outcome = session.attempt_swap(pos(3, 1), pos(4, 1));

    assert_eq!(outcome.status, SwapStatus::Accepted);
    assert_eq!(outcome.moves_remaining, 29);
    assert!(outcome.cascades >= 1);
    assert!(outcome.score_delta >= 3 * TILE_REWARD);
    assert_eq!(outcome.score_delta % TILE_REWARD, 0);
    assert_eq!(session.score(), outcome.score_delta);
    assert_eq!(session.moves(), 29);
}

#[test]
fn test_reverted_swap_costs_nothing() {
    let mut session = session_with(Board::from_kinds(calm_kinds()), GameConfig::default());
    let before = session.board().clone();

    let outcome = session.attempt_swap(pos(0, 0), pos(0, 1));

    assert_eq!(outcome.status, SwapStatus::Reverted);
    assert_eq!(session.moves(), 30);
    assert_eq!(session.score(), 0);
    assert_eq!(session.board(), &before);
    assert_eq!(
        session.drain_steps(),
        vec![
            StepEvent::Swapped {
                a: pos(0, 0),
                b: pos(0, 1)
            },
            StepEvent::Reverted {
                a: pos(0, 0),
                b: pos(0, 1)
            },
        ]
    );
}

#[test]
fn test_busy_until_steps_consumed() {
    let mut session = session_with(one_move_board(), GameConfig::default());
    session.attempt_swap(pos(3, 1), pos(4, 1));
    assert!(session.is_busy());

    let blocked = session.attempt_swap(pos(0, 0), pos(0, 1));
    assert_eq!(blocked.status, SwapStatus::Ignored(IgnoreReason::Busy));
    assert_eq!(session.moves(), 29);

    let mut seen = 0;
    while let Some(step) = session.next_step() {
        seen += 1;
        if seen == 1 {
            assert!(matches!(step, StepEvent::Swapped { .. }));
        }
    }
    assert!(seen >= 3);
    assert!(!session.is_busy());
    assert_eq!(session.pending_steps(), 0);
}

#[test]
fn test_click_selection_flow() {
    let mut session = session_with(one_move_board(), GameConfig::default());

    assert_eq!(session.click(pos(3, 1)), ClickOutcome::Armed(pos(3, 1)));
    assert_eq!(session.selection(), Some(pos(3, 1)));

    // Far click drops the selection.
    assert_eq!(session.click(pos(7, 7)), ClickOutcome::Cleared);
    assert_eq!(session.selection(), None);

    session.click(pos(3, 1));
    match session.click(pos(4, 1)) {
        ClickOutcome::Swapped(outcome) => assert_eq!(outcome.status, SwapStatus::Accepted),
        other => panic!("expected a swap, got {:?}", other),
    }
    assert_eq!(session.selection(), None);
}

#[test]
fn test_hint_agrees_with_search() {
    let board = one_move_board();
    let swaps = find_valid_swaps(&board);

    assert_eq!(swaps.len(), 2);
    let first = hint(&board).unwrap();
    assert_eq!((first.a, first.b), (pos(3, 1), pos(4, 1)));
    assert!(!is_stuck(&board));
    assert!(is_stuck(&Board::from_kinds(calm_kinds())));
}

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig::default().with_seed(2024).with_moves(5);
    let mut a = GameSession::new(config);
    let mut b = GameSession::new(config);
    assert_eq!(a.snapshot(), b.snapshot());

    play_out(&mut a);
    play_out(&mut b);

    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_session_reaches_terminal_status() {
    let config = GameConfig::default()
        .with_seed(7)
        .with_moves(3)
        .with_target_score(1);
    let mut session = GameSession::new(config);

    play_out(&mut session);

    assert_eq!(session.moves(), 0);
    assert_eq!(session.status(), GameStatus::Won);
    assert!(!session.snapshot().playable());
}

#[test]
fn test_high_target_is_lost() {
    let config = GameConfig::default()
        .with_seed(7)
        .with_moves(2)
        .with_target_score(u32::MAX);
    let mut session = GameSession::new(config);

    play_out(&mut session);

    assert_eq!(session.status(), GameStatus::Lost);
}

#[test]
fn test_restart_resets_progress() {
    let mut session = session_with(one_move_board(), GameConfig::default().with_moves(12));
    session.attempt_swap(pos(3, 1), pos(4, 1));
    session.restart(5);

    assert_eq!(session.seed(), 5);
    assert_eq!(session.moves(), 12);
    assert_eq!(session.score(), 0);
    assert!(!session.is_busy());
    assert_eq!(session.pending_steps(), 0);
}

#[test]
fn test_board_stays_full_and_settled_after_every_turn() {
    let mut session = GameSession::new(GameConfig::default().with_seed(31).with_moves(15));
    let mut guard = 0;
    while !session.status().is_terminal() && guard < 100 {
        guard += 1;
        if apply_hint(&mut session).is_err() {
            session.shuffle();
            continue;
        }
        session.drain_steps();
        assert!(session.board().is_full());
        assert!(!tui_match3::core::has_match(session.board()));
    }
}
