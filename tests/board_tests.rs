//! Board tests - layout primitives, match detection and cascade resolution

use tui_match3::core::{find_matches, has_match, removal_set, resolve, Board, SimpleRng};
use tui_match3::types::{Position, StepEvent, GRID_SIZE, TILE_KINDS, TILE_REWARD};

const SIZE: usize = GRID_SIZE as usize;

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col).unwrap()
}

/// Diagonal stripes: no three equal kinds in any row or column.
fn calm_kinds() -> [[u8; SIZE]; SIZE] {
    let mut kinds = [[0u8; SIZE]; SIZE];
    for (r, row) in kinds.iter_mut().enumerate() {
        for (c, kind) in row.iter_mut().enumerate() {
            *kind = ((r + 2 * c) % 6) as u8;
        }
    }
    kinds
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    for p in Position::all() {
        assert_eq!(board.get(p), None, "slot {:?} should be empty", p);
        assert!(!board.is_occupied(p));
    }
    assert!(!board.is_full());
    assert!(find_matches(&board).is_empty());
}

#[test]
fn test_initialized_board_is_full_and_match_free() {
    for seed in 0..200u32 {
        let mut rng = SimpleRng::new(seed);
        let board = Board::initialized(&mut rng);
        assert!(board.is_full(), "seed {} left a hole", seed);
        assert!(
            !has_match(&board),
            "seed {} produced a match:\n{}",
            seed,
            board.to_text()
        );
        for p in Position::all() {
            let tile = board.get(p).unwrap();
            assert!(tile.kind < TILE_KINDS);
            assert_eq!(tile.position(), p);
        }
    }
}

#[test]
fn test_same_seed_same_board() {
    let a = Board::initialized(&mut SimpleRng::new(99));
    let b = Board::initialized(&mut SimpleRng::new(99));
    let c = Board::initialized(&mut SimpleRng::new(100));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_swap_moves_tiles_and_coordinates() {
    let mut board = Board::from_kinds(calm_kinds());
    let (a, b) = (pos(2, 3), pos(2, 4));
    let (ka, kb) = (board.kind_at(a), board.kind_at(b));

    board.swap(a, b);

    assert_eq!(board.kind_at(a), kb);
    assert_eq!(board.kind_at(b), ka);
    assert_eq!(board.get(a).unwrap().position(), a);
    assert_eq!(board.get(b).unwrap().position(), b);
}

#[test]
fn test_find_matches_row_and_column() {
    let mut kinds = calm_kinds();
    kinds[0][0] = 5;
    kinds[0][1] = 5;
    kinds[0][2] = 5;
    kinds[5][7] = 4;
    kinds[6][7] = 4;
    kinds[7][7] = 4;
    let board = Board::from_kinds(kinds);

    let matches = find_matches(&board);
    let removal = removal_set(&matches);

    assert!(matches.contains(&[pos(0, 0), pos(0, 1), pos(0, 2)]));
    assert!(matches.contains(&[pos(5, 7), pos(6, 7), pos(7, 7)]));
    assert_eq!(removal.len(), 6);
}

#[test]
fn test_run_of_four_is_removed_once_per_tile() {
    let mut kinds = calm_kinds();
    for c in 0..4 {
        kinds[4][c] = 3;
    }
    let board = Board::from_kinds(kinds);
    let matches = find_matches(&board);

    // Two overlapping windows, four distinct tiles.
    assert_eq!(matches.len(), 2);
    assert_eq!(removal_set(&matches).len(), 4);
}

#[test]
fn test_compact_column_falls_then_spawns() {
    let mut board = Board::from_kinds(calm_kinds());
    let above = board.kind_at(pos(2, 3));
    board.remove_at(&[pos(5, 3), pos(6, 3)]);

    let mut rng = SimpleRng::new(4);
    let refill = board.compact_column(&mut rng, 3);

    assert!(board.is_full());
    assert_eq!(refill.spawned.len(), 2);
    assert_eq!(board.kind_at(pos(4, 3)), above);
    assert!(refill.falls.iter().all(|f| f.col == 3 && f.to_row > f.from_row));
    assert!(refill.spawned.iter().all(|t| t.row < 2));
}

#[test]
fn test_resolve_clears_and_scores() {
    let mut kinds = calm_kinds();
    kinds[7][0] = 2;
    kinds[7][1] = 2;
    kinds[7][2] = 2;
    let mut board = Board::from_kinds(kinds);
    let mut rng = SimpleRng::new(8);
    let mut steps: Vec<StepEvent> = Vec::new();

    let report = resolve(&mut board, &mut rng, &mut steps);

    assert!(report.steps >= 1);
    assert!(report.removed >= 3);
    assert_eq!(report.score_delta, report.removed * TILE_REWARD);
    assert!(board.is_full());
    assert!(!has_match(&board));
    assert!(matches!(steps.first(), Some(StepEvent::Removed { step: 1, .. })));
    assert!(matches!(steps.last(), Some(StepEvent::Settled { .. })));
}

#[test]
fn test_resolve_on_calm_board_only_settles() {
    let mut board = Board::from_kinds(calm_kinds());
    let before = board.clone();
    let mut steps: Vec<StepEvent> = Vec::new();

    let report = resolve(&mut board, &mut SimpleRng::new(1), &mut steps);

    assert_eq!(report.steps, 0);
    assert_eq!(board, before);
    assert_eq!(steps, vec![StepEvent::Settled { steps: 0 }]);
}

#[test]
fn test_solid_board_always_terminates() {
    for seed in 0..20u32 {
        let mut board = Board::from_kinds([[1u8; SIZE]; SIZE]);
        let mut steps: Vec<StepEvent> = Vec::new();
        resolve(&mut board, &mut SimpleRng::new(seed), &mut steps);
        assert!(!has_match(&board), "seed {}:\n{}", seed, board.to_text());
        assert!(board.is_full());
    }
}
