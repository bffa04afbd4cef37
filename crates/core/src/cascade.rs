//! Cascade resolution - the remove -> compact -> refill loop
//!
//! Each iteration removes every matched tile, lets each column fall and
//! refill, then rescans. The loop ends when a scan finds nothing.
//!
//! Refills are random, so a chain of fresh matches could in principle go on
//! forever. After [`MAX_CASCADE_STEPS`] iterations any remaining matched
//! tiles are re-rolled in place with [`Board::break_matches`] instead, which
//! always leaves a settled board.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::board::Board;
use crate::matcher::{find_matches, removal_set};
use crate::rng::SimpleRng;
use crate::types::{StepEvent, GRID_SIZE, MAX_CASCADE_STEPS, TILE_REWARD};

/// Receiver for the step events of a turn.
pub trait StepSink {
    fn push_step(&mut self, step: StepEvent);
}

impl StepSink for Vec<StepEvent> {
    fn push_step(&mut self, step: StepEvent) {
        self.push(step);
    }
}

impl StepSink for VecDeque<StepEvent> {
    fn push_step(&mut self, step: StepEvent) {
        self.push_back(step);
    }
}

/// Summary of one resolved cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Remove cycles executed
    pub steps: u32,
    /// Distinct tiles removed across all cycles
    pub removed: u32,
    /// Points earned (`removed * TILE_REWARD`)
    pub score_delta: u32,
    /// The step cap tripped and leftover matches were re-rolled
    pub capped: bool,
}

/// Run the cascade until the board is match-free.
///
/// Emits one `Removed` per cycle, one `Refilled` per column that changed,
/// an optional `Rerolled`, and a final `Settled`.
pub fn resolve(board: &mut Board, rng: &mut SimpleRng, sink: &mut impl StepSink) -> CascadeReport {
    resolve_capped(board, rng, sink, MAX_CASCADE_STEPS)
}

/// [`resolve`] with an explicit cap on remove cycles.
pub fn resolve_capped(
    board: &mut Board,
    rng: &mut SimpleRng,
    sink: &mut impl StepSink,
    max_steps: u32,
) -> CascadeReport {
    let mut report = CascadeReport::default();

    loop {
        let matches = find_matches(board);
        if matches.is_empty() {
            break;
        }
        let removal = removal_set(&matches);

        if report.steps >= max_steps {
            warn!(
                steps = report.steps,
                remaining = removal.len(),
                "cascade cap reached, re-rolling leftover matches"
            );
            let tiles = board.break_matches(rng, &removal);
            sink.push_step(StepEvent::Rerolled { tiles });
            report.capped = true;
            break;
        }

        report.steps += 1;
        let removed = board.remove_at(&removal);
        let score_delta = removed * TILE_REWARD;
        report.removed += removed;
        report.score_delta += score_delta;
        debug!(step = report.steps, removed, score_delta, "cascade step");

        sink.push_step(StepEvent::Removed {
            step: report.steps,
            positions: removal.to_vec(),
            score_delta,
        });

        for col in 0..GRID_SIZE {
            let refill = board.compact_column(rng, col);
            if refill.is_empty() {
                continue;
            }
            sink.push_step(StepEvent::Refilled {
                step: report.steps,
                col,
                falls: refill.falls.to_vec(),
                spawned: refill.spawned.to_vec(),
            });
        }
    }

    sink.push_step(StepEvent::Settled {
        steps: report.steps,
    });
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::has_match;
    use crate::types::Position;

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

    #[test]
    fn test_settled_board_emits_only_settled() {
        let mut board = Board::from_kinds(calm_kinds());
        let mut rng = SimpleRng::new(1);
        let mut steps = Vec::new();

        let report = resolve(&mut board, &mut rng, &mut steps);
        assert_eq!(report, CascadeReport::default());
        assert_eq!(steps, vec![StepEvent::Settled { steps: 0 }]);
    }

    #[test]
    fn test_single_match_scores_and_settles() {
        let mut kinds = calm_kinds();
        // Row 7, columns 0..3 become kind 5.
        for col in 0..3 {
            kinds[7][col] = 5;
        }
        let mut board = Board::from_kinds(kinds);
        assert!(has_match(&board));

        let mut rng = SimpleRng::new(42);
        let mut steps = Vec::new();
        let report = resolve(&mut board, &mut rng, &mut steps);

        assert!(report.steps >= 1);
        assert!(report.removed >= 3);
        assert_eq!(report.score_delta, report.removed * TILE_REWARD);
        assert!(!has_match(&board));
        assert!(board.is_full());

        match &steps[0] {
            StepEvent::Removed {
                step,
                positions,
                score_delta,
            } => {
                assert_eq!(*step, 1);
                assert!(positions.contains(&pos(7, 0)));
                assert!(positions.contains(&pos(7, 2)));
                assert_eq!(*score_delta, positions.len() as u32 * TILE_REWARD);
            }
            other => panic!("expected Removed first, got {:?}", other),
        }
        assert!(matches!(steps.last(), Some(StepEvent::Settled { .. })));
    }

    #[test]
    fn test_refill_events_cover_changed_columns_only() {
        // Column 6, rows 0..3 become kind 0: one vertical run, nothing else.
        let mut kinds = calm_kinds();
        for row in kinds.iter_mut().take(3) {
            row[6] = 0;
        }
        let mut board = Board::from_kinds(kinds);
        let mut rng = SimpleRng::new(3);
        let mut steps = Vec::new();
        resolve(&mut board, &mut rng, &mut steps);

        let first_step_cols: Vec<u8> = steps
            .iter()
            .filter_map(|s| match s {
                StepEvent::Refilled { step: 1, col, .. } => Some(*col),
                _ => None,
            })
            .collect();
        assert!(first_step_cols.contains(&6));
        // A purely vertical removal in column 6 leaves other columns untouched in step 1.
        assert_eq!(first_step_cols, vec![6]);
    }

    #[test]
    fn test_score_matches_removed_positions_per_step() {
        for seed in 1..30 {
            let mut board = Board::from_kinds([[2u8; SIZE]; SIZE]);
            let mut rng = SimpleRng::new(seed);
            let mut steps = Vec::new();
            let report = resolve(&mut board, &mut rng, &mut steps);

            let mut total = 0;
            for step in &steps {
                if let StepEvent::Removed {
                    positions,
                    score_delta,
                    ..
                } = step
                {
                    assert_eq!(*score_delta, positions.len() as u32 * TILE_REWARD);
                    total += score_delta;
                }
            }
            assert_eq!(total, report.score_delta);
            assert!(!has_match(&board));
        }
    }

    #[test]
    fn test_solid_board_first_step_clears_everything() {
        let mut board = Board::from_kinds([[3u8; SIZE]; SIZE]);
        let mut rng = SimpleRng::new(9);
        let mut steps = VecDeque::new();
        resolve(&mut board, &mut rng, &mut steps);

        match steps.front() {
            Some(StepEvent::Removed { positions, .. }) => {
                assert_eq!(positions.len(), SIZE * SIZE)
            }
            other => panic!("unexpected first step {:?}", other),
        }
        let refills = steps
            .iter()
            .filter(|s| matches!(s, StepEvent::Refilled { step: 1, .. }))
            .count();
        assert_eq!(refills, SIZE);
    }
    #[test]
    fn test_step_cap_rerolls_without_score() {
        for seed in 0..20u32 {
            let mut board = Board::from_kinds([[1u8; SIZE]; SIZE]);
            let mut rng = SimpleRng::new(seed);
            let mut steps: Vec<StepEvent> = Vec::new();

            let report = resolve_capped(&mut board, &mut rng, &mut steps, 0);

            assert!(report.capped);
            assert_eq!(report.steps, 0);
            assert_eq!(report.removed, 0);
            assert_eq!(report.score_delta, 0);
            assert_eq!(steps.len(), 2);
            match &steps[0] {
                StepEvent::Rerolled { tiles } => assert_eq!(tiles.len(), SIZE * SIZE),
                other => panic!("expected reroll, got {:?}", other),
            }
            assert_eq!(steps[1], StepEvent::Settled { steps: 0 });
            assert!(board.is_full());
            assert!(!has_match(&board), "seed {}:\n{}", seed, board.to_text());
        }
    }

    #[test]
    fn test_cap_after_one_step_keeps_first_step_score() {
        let mut board = Board::from_kinds([[1u8; SIZE]; SIZE]);
        let mut steps: Vec<StepEvent> = Vec::new();

        let report = resolve_capped(&mut board, &mut SimpleRng::new(3), &mut steps, 1);

        assert_eq!(report.steps, 1);
        assert_eq!(report.score_delta, (SIZE * SIZE) as u32 * TILE_REWARD);
        assert!(!has_match(&board));
        let rerolls = steps
            .iter()
            .filter(|s| matches!(s, StepEvent::Rerolled { .. }))
            .count();
        assert_eq!(rerolls, usize::from(report.capped));
        assert!(matches!(steps.last(), Some(StepEvent::Settled { steps: 1 })));
    }
}
