//! Autoplay move pool tests

use std::collections::HashSet;

use tictactoe_mqtt::core::MovePool;
use tictactoe_mqtt::types::Move;

fn canonical() -> HashSet<String> {
    let mut set = HashSet::new();
    for row in 1..=3 {
        for col in 1..=3 {
            set.insert(format!("{},{}", row, col));
        }
    }
    set
}

#[test]
fn test_each_generation_covers_all_cells_once() {
    let expected = canonical();
    for seed in 0..1000u32 {
        let mut pool = MovePool::new(seed.wrapping_mul(2654435761));
        let drawn: Vec<String> = (0..9).map(|_| pool.next_move().to_string()).collect();
        let unique: HashSet<String> = drawn.iter().cloned().collect();
        assert_eq!(drawn.len(), 9);
        assert_eq!(unique, expected, "seed {}", seed);
    }
}

#[test]
fn test_tenth_move_comes_from_new_pool() {
    let mut pool = MovePool::new(2024);
    let first_pool: Vec<Move> = pool.remaining().to_vec();

    let drawn: Vec<Move> = (0..9).map(|_| pool.next_move()).collect();
    assert_eq!(drawn, first_pool);
    assert!(pool.is_exhausted());

    let tenth = pool.next_move();
    assert!((1..=3).contains(&tenth.row()));
    assert!((1..=3).contains(&tenth.col()));
    assert_eq!(pool.remaining().len(), 8);
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = MovePool::new(99);
    let mut b = MovePool::new(99);
    for _ in 0..30 {
        assert_eq!(a.next_move(), b.next_move());
    }
}
