use proptest::prelude::*;

use super::board::Board;
use super::rules::{evaluate_terminal, Outcome};
use super::seat::Seat;
use super::state::SessionState;

fn shuffled_cells() -> impl Strategy<Value = Vec<i64>> {
    Just((0..9i64).collect::<Vec<_>>()).prop_shuffle()
}

fn arbitrary_cells() -> impl Strategy<Value = Vec<Option<Seat>>> {
    prop::collection::vec(
        prop::option::of(prop_oneof![Just(Seat::A), Just(Seat::B)]),
        9,
    )
}

fn board_from(cells: &[Option<Seat>]) -> Board {
    let mut board = Board::new();
    for (idx, cell) in cells.iter().enumerate() {
        if let Some(seat) = cell {
            board.place(idx, *seat);
        }
    }
    board
}

proptest! {
    // Play out a full random game and check the structural invariants hold
    // after every accepted move.
    #[test]
    fn random_games_preserve_invariants(order in shuffled_cells()) {
        let mut state = SessionState::new();
        let mut moves = 0usize;

        for cell in order {
            if state.outcome.is_terminal() {
                break;
            }
            let seat = match state.current_turn {
                Some(seat) => seat,
                None => return Err(TestCaseError::fail("undecided game with no turn holder")),
            };
            let before = *state.board.cells();

            prop_assert!(state.apply_move(seat, cell).is_ok());
            moves += 1;

            // Exactly the target cell changed, to the mover's mark
            let after = *state.board.cells();
            for idx in 0..9 {
                if idx == cell as usize {
                    prop_assert_eq!(before[idx], None);
                    prop_assert_eq!(after[idx], Some(seat));
                } else {
                    prop_assert_eq!(before[idx], after[idx]);
                }
            }

            if state.outcome.is_terminal() {
                prop_assert_eq!(state.current_turn, None);
            } else {
                prop_assert_eq!(state.current_turn, Some(seat.opponent()));
            }
        }

        // Filling the whole board always reaches a terminal outcome
        prop_assert!(moves <= 9);
        if moves == 9 {
            prop_assert!(state.outcome.is_terminal());
        }
        prop_assert_eq!(evaluate_terminal(&state.board), state.outcome);
    }

    #[test]
    fn storage_round_trip_for_arbitrary_positions(cells in arbitrary_cells()) {
        let board = board_from(&cells);
        let stored = board.to_stored();
        prop_assert_eq!(stored.len(), 9);
        prop_assert_eq!(Board::from_stored(&stored), Some(board));
    }

    // The outcome depends only on the final position, never on the order
    // the marks were placed in.
    #[test]
    fn terminal_evaluation_is_placement_order_independent(
        cells in arbitrary_cells(),
        order in shuffled_cells(),
    ) {
        let natural = board_from(&cells);

        let mut shuffled = Board::new();
        for cell in order {
            if let Some(seat) = cells[cell as usize] {
                shuffled.place(cell as usize, seat);
            }
        }

        prop_assert_eq!(shuffled, natural);
        prop_assert_eq!(evaluate_terminal(&shuffled), evaluate_terminal(&natural));
    }

    // A reported winner must actually hold a completed line.
    #[test]
    fn reported_wins_are_backed_by_a_line(cells in arbitrary_cells()) {
        let board = board_from(&cells);
        if let Outcome::Win(seat) = evaluate_terminal(&board) {
            let has_line = super::rules::WIN_LINES.iter().any(|line| {
                line.iter().all(|&idx| board.cell(idx) == Some(seat))
            });
            prop_assert!(has_line);
        }
    }
}
