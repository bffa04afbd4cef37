use tui_match3::core::snapshot::fnv1a64_board;
use tui_match3::core::{GameConfig, GameSession, GameSnapshot};
use tui_match3::engine::apply_hint;

#[test]
fn snapshot_into_sets_board_hash() {
    let mut session = GameSession::new(GameConfig::default().with_seed(5));

    let mut snap = GameSnapshot::default();
    session.snapshot_into(&mut snap);
    assert_eq!(snap.board_hash, fnv1a64_board(&snap.board));
    let before = snap.board_hash;

    if apply_hint(&mut session).is_ok() {
        session.drain_steps();
        session.snapshot_into(&mut snap);
        assert_eq!(snap.board_hash, fnv1a64_board(&snap.board));
        assert_ne!(snap.board_hash, before);
    }
}

#[test]
fn snapshot_hash_ignores_counters() {
    let session = GameSession::new(GameConfig::default().with_seed(5).with_moves(3));
    let other = GameSession::new(GameConfig::default().with_seed(5).with_moves(9));

    let a = session.snapshot();
    let b = other.snapshot();
    assert_eq!(a.board, b.board);
    assert_eq!(a.board_hash, b.board_hash);
    assert_ne!(a, b);
}

#[test]
fn default_snapshot_hashes_empty_board() {
    let snap = GameSnapshot::default();
    assert!(snap.board.iter().flatten().all(|&c| c == 0));
    assert_eq!(snap.board_hash, fnv1a64_board(&snap.board));
}
