//! End-to-end gameplay scenarios through the public API

use blockfall::{
    Action, Board, Cell, GameLogic, Phase, Piece, RotationState, SequenceSource, Shape, ShapeKind,
};
use ratatui::style::Color;
use std::sync::Arc;

fn single_cell(x: i32, y: i32) -> Piece {
    let shape = Shape::new("dot", vec![RotationState::from_rows(&[&[1]])], Color::White).unwrap();
    Piece::new(Arc::new(shape), x, y)
}

#[test]
fn completing_bottom_row_clears_it_and_shifts_rows_down() {
    let mut board = Board::new(4, 4).unwrap();
    // Row 3 full except the last slot, one block resting on top of it
    for x in 0..3 {
        board.set(x, 3, Cell::Filled);
    }
    board.set(1, 2, Cell::Filled);

    let piece = single_cell(3, 3);
    assert!(board.is_valid_position(&piece, 0, 0));
    board.lock_piece(&piece);

    assert_eq!(board.clear_completed_lines(), 1);
    let grid = board.grid_snapshot();
    assert_eq!(grid.len(), 4);
    assert_eq!(grid[3].iter().filter(|c| c.is_filled()).count(), 1);
    assert_eq!(grid[3][1], Cell::Filled);
    assert!(grid[0].iter().all(|c| c.is_empty()));
}

#[test]
fn move_left_against_wall_is_reverted() {
    // A 2-wide board spawns the O piece flush against the left wall
    let mut game =
        GameLogic::with_dimensions(2, 6, SequenceSource::repeat(ShapeKind::O)).unwrap();
    let before = game.current_piece().cloned().unwrap();
    assert_eq!(before.x, 0);

    game.handle_input_action(Action::MoveLeft);
    assert_eq!(game.current_piece(), Some(&before));
}

#[test]
fn repeated_hard_drops_stack_until_game_over() {
    let mut game = GameLogic::with_source(Board::standard(), SequenceSource::repeat(ShapeKind::O));

    for drop in 1..=9 {
        game.handle_input_action(Action::HardDrop);
        let landed_y = 20 - 2 * drop;
        assert_eq!(game.board().get(4, landed_y), Some(Cell::Filled), "drop {}", drop);
        assert_eq!(game.phase(), Phase::Falling);
        let next = game.current_piece().unwrap();
        assert_eq!((next.x, next.y), (4, 0));
    }

    // The tenth O lands in rows 0-1 and fills the top row
    game.handle_input_action(Action::HardDrop);
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.state().game_over);
    assert!(game.current_piece().is_none());
    assert!(game.board().is_game_over());
    assert_eq!(game.board().filled_count(), 40);

    // Terminal: nothing moves any more
    let frozen = game.snapshot();
    game.handle_input_action(Action::HardDrop);
    game.handle_input_action(Action::Pause);
    game.update(10.0);
    assert_eq!(game.snapshot(), frozen);
    assert!(!frozen.paused);
}

#[test]
fn paired_clears_advance_score_and_level() {
    let mut game = GameLogic::with_dimensions(4, 8, SequenceSource::repeat(ShapeKind::O)).unwrap();
    // Two O pieces side by side complete two rows of a 4-wide board
    for _ in 0..5 {
        assert_eq!(game.current_piece().unwrap().x, 1);
        game.handle_input_action(Action::MoveLeft);
        game.handle_input_action(Action::HardDrop);
        game.handle_input_action(Action::MoveRight);
        game.handle_input_action(Action::HardDrop);
        assert!(game.board().is_empty());
    }
    let state = game.state();
    assert_eq!(state.lines_cleared, 10);
    assert_eq!(state.level, 2);
    assert_eq!(state.lines_to_next_level, 10);
    assert_eq!(state.score, 100 * 5);
    assert!((state.fall_speed() - 0.9).abs() < 1e-9);
}

#[test]
fn timer_driven_fall_locks_piece() {
    let mut game = GameLogic::with_dimensions(4, 4, SequenceSource::repeat(ShapeKind::O)).unwrap();
    // O spawns at y=0 and can fall twice on a 4-high board
    game.update(1.0);
    game.update(1.0);
    assert_eq!(game.current_piece().unwrap().y, 2);
    assert!(game.board().is_empty());

    game.update(1.0);
    assert_eq!(game.board().filled_count(), 4);
    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.current_piece().unwrap().y, 0);
}

#[test]
fn action_tokens_drive_the_game() {
    let mut game = GameLogic::with_source(Board::standard(), SequenceSource::repeat(ShapeKind::T));
    for token in ["MOVE_LEFT", "MOVE_LEFT", "ROTATE", "SOFT_DROP"] {
        game.handle_input_action(token.parse().unwrap());
    }
    let piece = game.current_piece().unwrap();
    assert_eq!((piece.x, piece.y, piece.rotation), (2, 1, 1));

    game.handle_input_action("PAUSE".parse().unwrap());
    assert_eq!(game.phase(), Phase::Paused);
    assert!("QUIT".parse::<Action>().is_err());
}

#[test]
fn preview_tracks_the_piece_just_spawned() {
    let source = SequenceSource::new([ShapeKind::I, ShapeKind::Z, ShapeKind::L]).unwrap();
    let mut game = GameLogic::with_source(Board::standard(), source);
    assert_eq!(game.snapshot().preview.as_deref(), Some("I"));
    game.handle_input_action(Action::HardDrop);
    assert_eq!(game.snapshot().preview.as_deref(), Some("Z"));
    assert_eq!(game.current_piece().unwrap().name(), "Z");
}
