//! Property tests for the grid, rotation, line clearing and scoring laws.

use std::time::Duration;

use blockfall_engine::{
    Cell, GameConfig, GameSession, GameStats, Grid, Piece, PieceKind, PiecePosition, PieceSeed,
    ROTATION_KICKS, drop_interval_for_level,
};
use proptest::prelude::*;

const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    (0..PieceKind::LEN).prop_map(|i| PieceKind::ALL[i])
}

/// Rows of color ids. Roughly half of the rows are forced full so that
/// multi-line and adjacent clears show up often.
fn rows_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (4usize..=10, 4usize..=16).prop_flat_map(|(width, height)| {
        prop::collection::vec(
            (any::<bool>(), prop::collection::vec(0u8..=7, width)),
            height,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .map(|(full, row)| {
                    if full {
                        row.into_iter().map(|id| id.max(1)).collect()
                    } else {
                        row
                    }
                })
                .collect()
        })
    })
}

fn grid_from_rows(rows: &[Vec<u8>]) -> Grid {
    let mut grid = Grid::new(rows[0].len(), rows.len());
    for (y, row) in rows.iter().enumerate() {
        for (x, &id) in row.iter().enumerate() {
            if let Some(kind) = PieceKind::from_color_id(id) {
                grid.set_cell(x, y, Cell::Piece(kind));
            }
        }
    }
    grid
}

fn grid_to_rows(grid: &Grid) -> Vec<Vec<u8>> {
    grid.rows()
        .map(|row| row.iter().map(|cell| cell.color_id()).collect())
        .collect()
}

/// Reference line clear: scan bottom-up, remove a full row, insert an empty
/// row on top and look at the same index again.
fn reference_clear(mut rows: Vec<Vec<u8>>) -> (Vec<Vec<u8>>, usize) {
    let width = rows[0].len();
    let mut cleared = 0;
    let mut y = rows.len();
    while y > 0 {
        if rows[y - 1].iter().all(|&id| id != 0) {
            rows.remove(y - 1);
            rows.insert(0, vec![0; width]);
            cleared += 1;
        } else {
            y -= 1;
        }
    }
    (rows, cleared)
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap()
}

proptest! {
    #[test]
    fn collides_iff_some_cell_is_out_of_bounds_or_on_a_block(
        rows in rows_strategy(),
        kind in kind_strategy(),
        rotations in 0usize..4,
        x in -4i32..14,
        y in -5i32..18,
        dx in -2i32..=2,
        dy in -2i32..=2,
    ) {
        let grid = grid_from_rows(&rows);
        let mut piece = Piece::new(kind, PiecePosition::new(x, y));
        for _ in 0..rotations {
            piece = piece.rotated_right();
        }

        let expected = piece.occupied_positions().any(|(cx, cy)| {
            let (cx, cy) = (cx + dx, cy + dy);
            if cx < 0 || cx >= to_i32(grid.width()) || cy >= to_i32(grid.height()) {
                return true;
            }
            cy >= 0 && rows[cy as usize][cx as usize] != 0
        });
        prop_assert_eq!(grid.collides(&piece, dx, dy), expected);
    }

    #[test]
    fn four_rotations_restore_the_piece(kind in kind_strategy(), x in 0i32..6, y in 0i32..16) {
        // A 10x20 empty grid is wide enough that no kick is ever needed.
        let grid = Grid::new(10, 20);
        let piece = Piece::new(kind, PiecePosition::new(x, y));
        let mut rotated = piece;
        for _ in 0..4 {
            rotated = rotated.super_rotated_right(&grid).unwrap();
        }
        prop_assert_eq!(rotated, piece);
    }

    #[test]
    fn accepted_rotation_uses_first_free_kick(
        rows in rows_strategy(),
        kind in kind_strategy(),
        x in -1i32..8,
        y in -1i32..12,
    ) {
        let grid = grid_from_rows(&rows);
        let piece = Piece::new(kind, PiecePosition::new(x, y));
        let rotated = piece.rotated_right();
        let expected = ROTATION_KICKS
            .iter()
            .map(|&(dx, dy)| rotated.moved(dx, dy))
            .find(|candidate| !grid.is_colliding(candidate));
        prop_assert_eq!(piece.super_rotated_right(&grid), expected);
    }

    #[test]
    fn clear_lines_matches_rescan_model(rows in rows_strategy()) {
        let mut grid = grid_from_rows(&rows);
        let (expected_rows, expected_cleared) = reference_clear(rows.clone());

        let cleared = grid.clear_lines();
        prop_assert_eq!(cleared, expected_cleared);
        prop_assert_eq!(grid_to_rows(&grid), expected_rows);
        prop_assert!(grid.rows().all(|row| row.iter().any(|cell| cell.is_empty())));
    }

    #[test]
    fn level_and_interval_follow_total_lines(clears in prop::collection::vec(0usize..=4, 1..200)) {
        let mut stats = GameStats::new();
        let mut previous_interval = stats.drop_interval();
        for lines in clears {
            let level = stats.level();
            let score = stats.score();
            stats.complete_piece_drop(lines);

            prop_assert_eq!(stats.score() - score, SCORE_TABLE[lines] * level);
            prop_assert_eq!(stats.level(), stats.total_cleared_lines() / 10 + 1);
            prop_assert_eq!(stats.drop_interval(), drop_interval_for_level(stats.level()));
            prop_assert!(stats.drop_interval() <= previous_interval);
            previous_interval = stats.drop_interval();
        }
    }

    #[test]
    fn interval_after_ten_k_lines(k in 0u64..40) {
        let mut stats = GameStats::new();
        for _ in 0..k * 10 {
            stats.complete_piece_drop(1);
        }
        prop_assert_eq!(stats.level(), usize::try_from(k).unwrap() + 1);
        let millis = 1000u64.saturating_sub(50 * k).max(100);
        prop_assert_eq!(stats.drop_interval(), Duration::from_millis(millis));
    }

    #[test]
    fn hard_drop_distance_equals_possible_soft_drops(
        seed in any::<[u8; 16]>(),
        moves in prop::collection::vec(-3i32..=3, 1..12),
    ) {
        let mut session = GameSession::with_seed(GameConfig::default(), PieceSeed::from_bytes(seed));
        session.start();

        for shift in moves {
            if !session.session_state().is_running() {
                break;
            }
            for _ in 0..shift.unsigned_abs() {
                if shift < 0 {
                    session.move_left();
                } else {
                    session.move_right();
                }
            }
            if shift % 2 == 0 {
                session.rotate();
            }

            let mut probe = session.clone();
            let mut steps = 0;
            while probe.soft_drop() {
                steps += 1;
            }

            let score = session.stats().score();
            let distance = session.hard_drop().unwrap();
            prop_assert_eq!(distance, steps);
            let cleared_points = session.stats().score() - score - 2 * distance;
            prop_assert_eq!(cleared_points % 100, 0);
        }
    }
}
