//! Tests for headless simulation.

use strictly_solo::{GameStatus, RandomSelector, play_one, simulate};

#[test]
fn test_every_game_finishes() {
    let mut human = RandomSelector::from_seed(1);
    let mut computer = RandomSelector::from_seed(2);
    for _ in 0..100 {
        let state = play_one(&mut human, &mut computer);
        assert!(state.status().is_terminal());
        assert_eq!(state.pending(), None);
        if *state.status() == GameStatus::Draw {
            assert!(state.board().empty_positions().is_empty());
        }
    }
}

#[test]
fn test_tally_totals_and_determinism() {
    let tally = simulate(300, 42);
    assert_eq!(tally.total(), 300);
    assert_eq!(tally, simulate(300, 42));
}
