//! Integration tests for goban-ai
//!
//! Whole-game scenarios through the public API: rules, undo, evaluator
//! purity, and the AI's behaviour across difficulty tiers.

use pretty_assertions::assert_eq;

use goban_ai::board::{Color, Grid, Point, format_vertex, parse_vertex};
use goban_ai::eval::Heuristic;
use goban_ai::game::{AiTurn, Game};
use goban_ai::position::{BoardState, MoveReport};
use goban_ai::problem::{Attempt, Problem, ProblemSession};
use goban_ai::profile::Difficulty;
use goban_ai::remote::AiService;
use goban_ai::rules::MoveError;
use goban_ai::selector::{Decision, MoveSelector};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Play a sequence of vertices alternately, starting with Black.
/// "pass" can be used to pass.
fn setup_position(size: usize, moves: &[&str]) -> BoardState {
    let mut board = BoardState::new(size);
    for mv in moves {
        match parse_vertex(mv, size).unwrap() {
            Some(pt) => {
                board
                    .place_stone(pt)
                    .unwrap_or_else(|e| panic!("illegal move {mv} in setup: {e}"));
            }
            None => board.pass(),
        }
    }
    board
}

/// Place stones directly, with no history, and give the turn to `to_move`.
fn setpos(size: usize, black: &[Point], white: &[Point], to_move: Color) -> BoardState {
    let mut grid = Grid::new(size);
    for &p in black {
        grid.set(p, Some(Color::Black));
    }
    for &p in white {
        grid.set(p, Some(Color::White));
    }
    BoardState::from_grid(grid, to_move)
}

// =============================================================================
// Coordinates
// =============================================================================

#[test]
fn test_vertex_corners() {
    assert_eq!(parse_vertex("A1", 9), Ok(Some((8, 0))));
    assert_eq!(parse_vertex("J9", 9), Ok(Some((0, 8))));
    assert_eq!(parse_vertex("T19", 19), Ok(Some((0, 18))));
    assert_eq!(format_vertex((0, 8), 9), "J9");
    assert!(parse_vertex("I5", 9).is_err());
    assert!(parse_vertex("K1", 9).is_err());
}

#[test]
fn test_setup_position_with_pass() {
    // White passes, so Black plays again
    let board = setup_position(9, &["E5", "pass", "D5"]);
    assert_eq!(board.get((4, 4)), Some(Color::Black));
    assert_eq!(board.get((4, 3)), Some(Color::Black));
    assert_eq!(board.to_move(), Color::White);
    assert_eq!(board.moves_played(), 2);

    let board = setup_position(9, &["E5", "pass", "pass", "D5"]);
    assert_eq!(board.get((4, 3)), Some(Color::White));
    assert_eq!(board.to_move(), Color::Black);
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn test_occupied_placement_leaves_board_unchanged() {
    let mut board = setup_position(9, &["E5"]);
    let before = board.view();

    let result = board.place_stone((4, 4));
    assert_eq!(result, Err(MoveError::Occupied));
    assert_eq!(board.view(), before);
    assert_eq!(board.moves_played(), 1);

    let report = MoveReport::from(&result);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::json!({"legal": false, "reason": "occupied"})
    );
}

#[test]
fn test_capture_updates_counters() {
    // Black surrounds the white stone at (4,4) on three sides, then closes it.
    let mut board = setpos(9, &[(3, 4), (5, 4), (4, 3)], &[(4, 4)], Color::Black);
    let placement = board.place_stone((4, 5)).unwrap();

    assert_eq!(placement.captured, vec![(4, 4)]);
    assert_eq!(board.get((4, 4)), None);
    assert_eq!(board.captures().black, 1);
    assert_eq!(board.captures().white, 0);
    assert_eq!(board.to_move(), Color::White);
}

#[test]
fn test_multi_stone_capture() {
    let mut board = setpos(
        9,
        &[(0, 2), (1, 1), (1, 2)],
        &[(0, 0), (0, 1), (1, 0)],
        Color::Black,
    );
    let placement = board.place_stone((2, 0)).unwrap();
    let mut captured = placement.captured.clone();
    captured.sort();
    assert_eq!(captured, vec![(0, 0), (0, 1), (1, 0)]);
    assert_eq!(board.captures().black, 3);
}

#[test]
fn test_one_move_captures_two_groups() {
    // White (0,0) and (0,2) are separate stones sharing the last liberty (0,1)
    let mut board = setpos(5, &[(1, 0), (1, 2), (0, 3)], &[(0, 0), (0, 2)], Color::Black);
    let placement = board.place_stone((0, 1)).unwrap();

    let mut captured = placement.captured.clone();
    captured.sort();
    assert_eq!(captured, vec![(0, 0), (0, 2)]);
    assert_eq!(board.get((0, 0)), None);
    assert_eq!(board.get((0, 2)), None);
    assert_eq!(board.captures().black, 2);
    assert_eq!(board.captures().white, 0);
    // Two stones taken, so no ko
    assert_eq!(board.ko_point(), None);
}

#[test]
fn test_suicide_rejected() {
    let mut board = setpos(9, &[], &[(0, 1), (1, 0)], Color::Black);
    assert_eq!(board.place_stone((0, 0)), Err(MoveError::SuicideMove));
    assert_eq!(board.get((0, 0)), None);
    assert_eq!(board.to_move(), Color::Black);
}

#[test]
fn test_ko_cycle() {
    // White (1,1) sits in a black mouth; Black (1,2) will sit in a white one.
    let mut board = setpos(
        9,
        &[(0, 1), (1, 0), (2, 1)],
        &[(1, 1), (0, 2), (2, 2), (1, 3)],
        Color::Black,
    );

    let take = board.place_stone((1, 2)).unwrap();
    assert_eq!(take.captured, vec![(1, 1)]);
    assert_eq!(board.ko_point(), Some((1, 1)));

    // Immediate recapture is forbidden.
    assert_eq!(board.place_stone((1, 1)), Err(MoveError::KoViolation));
    assert_eq!(board.to_move(), Color::White);

    // After an exchange elsewhere the ko is gone.
    board.place_stone((8, 8)).unwrap();
    board.place_stone((8, 0)).unwrap();
    assert_eq!(board.ko_point(), None);

    let retake = board.place_stone((1, 1)).unwrap();
    assert_eq!(retake.captured, vec![(1, 2)]);
    assert_eq!(board.captures().white, 1);
}

#[test]
fn test_nine_by_nine_occupied() {
    let mut board = BoardState::new(9);
    board.place_stone((4, 4)).unwrap();
    board.place_stone((4, 5)).unwrap();
    assert_eq!(board.place_stone((4, 4)), Err(MoveError::Occupied));
    assert_eq!(board.to_move(), Color::Black);
}

// =============================================================================
// Undo
// =============================================================================

#[test]
fn test_deep_undo_chain() {
    let empty = BoardState::new(9);
    let mut board = setup_position(
        9,
        &[
            "C3", "G7", "C7", "G3", "E5", "D5", "E4", "D4", "F5", "E6", "E3", "D6", "A1", "J9",
        ],
    );
    let mut views = Vec::new();
    let mut replay = BoardState::new(9);
    for &pt in &[(6, 2), (2, 6), (2, 2), (6, 6), (4, 4), (4, 3), (5, 4)] {
        views.push(replay.view());
        replay.place_stone(pt).unwrap();
    }
    while replay.undo() {
        assert_eq!(replay.view(), views.pop().unwrap());
    }
    assert!(views.is_empty());

    let played = board.moves_played();
    assert_eq!(played, 14);
    for _ in 0..played {
        assert!(board.undo());
    }
    assert!(!board.undo());
    assert_eq!(board.view(), empty.view());
}

#[test]
fn test_undo_restores_captures_and_ko() {
    let mut board = setpos(
        9,
        &[(0, 1), (1, 0), (2, 1)],
        &[(1, 1), (0, 2), (2, 2), (1, 3)],
        Color::Black,
    );
    let before = board.view();
    board.place_stone((1, 2)).unwrap();
    board.place_stone((6, 6)).unwrap();

    assert!(board.undo());
    assert_eq!(board.ko_point(), Some((1, 1)));
    assert!(board.undo());
    assert_eq!(board.view(), before);
    assert_eq!(board.captures().black, 0);
}

// =============================================================================
// Evaluators and the selector
// =============================================================================

#[test]
fn test_evaluators_do_not_mutate() {
    let board = setup_position(9, &["C3", "D3", "D4", "C4", "E5", "B3", "C2"]);
    let before = board.grid().clone();
    for h in Heuristic::ALL {
        for pt in board.empty_points() {
            h.evaluate(board.grid(), pt, board.to_move());
        }
        assert_eq!(board.grid(), &before, "{h} wrote to the grid");
    }
}

#[test]
fn test_selector_returns_legal_move() {
    for level in Difficulty::ALL {
        let board = setup_position(9, &["C3", "G7", "E5", "D5", "E4"]);
        let mut ai = MoveSelector::with_seed(level.profile(), 99);
        match ai.choose(&board) {
            Decision::Move(c) => assert!(board.is_legal(c.point), "{level}: {:?}", c.point),
            Decision::NoLegalMove => panic!("{level}: no move on an open board"),
        }
        assert_eq!(board.moves_played(), 5);
    }
}

#[test]
fn test_hard_captures_at_least_as_often_as_easy() {
    let board = setpos(9, &[(3, 4), (5, 4), (4, 3)], &[(4, 4)], Color::Black);
    let capture_point = (4, 5);

    let count = |level: Difficulty| {
        (0..100)
            .filter(|&seed| {
                let mut ai = MoveSelector::with_seed(level.profile(), seed);
                matches!(ai.choose(&board), Decision::Move(c) if c.point == capture_point)
            })
            .count()
    };
    let easy = count(Difficulty::Easy);
    let hard = count(Difficulty::Hard);
    assert!(hard >= easy, "hard {hard} < easy {easy}");
    assert!(hard > 50);
}

// =============================================================================
// Drivers
// =============================================================================

#[test]
fn test_ai_vs_ai_game_stays_legal() {
    let ai = AiService::new(MoveSelector::with_seed(Difficulty::Hard.profile(), 3)).without_delay();
    let mut game = Game::new(9, ai, Color::White);
    game.play_human((4, 4)).unwrap_err();

    for i in 0..30 {
        if i == 15 {
            game.ai_mut()
                .selector_mut()
                .set_profile(Difficulty::Easy.profile());
        }
        match game.play_ai().unwrap() {
            AiTurn::Played { placement, .. } => {
                assert_eq!(game.board().get(placement.point), Some(placement.color));
            }
            AiTurn::NoLegalMove => break,
        }
    }
    assert_eq!(game.board().moves_played(), 30);
}

#[test]
fn test_problem_session_end_to_end() {
    let problem = Problem::from_json(
        r#"{
            "name": "Edge capture",
            "size": 9,
            "initialBoard": [
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0],
                [0, 0, 0, 1, 2, 0, 0, 0, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0]
            ],
            "currentPlayer": 1,
            "solution": [{"row": 4, "col": 5}],
            "explanation": "Fill the last liberty."
        }"#,
    )
    .unwrap();
    let mut session = ProblemSession::new(problem).unwrap();
    assert!(matches!(session.attempt((0, 0)), Attempt::Wrong { attempts: 1 }));
    assert!(matches!(session.attempt((4, 5)), Attempt::Solved { .. }));
    assert_eq!(session.board().captures().black, 1);
}
