use super::grid::Grid;
use super::snake::Snake;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;

/// Pick a uniformly random cell of `grid` that is not occupied by `snake`.
/// Returns `None` if the snake fills the whole board.
pub(crate) fn spawn_food<R: Rng>(grid: Grid, snake: &Snake, rng: &mut R) -> Option<Position> {
    if snake.len() >= grid.cell_count() {
        return None;
    }
    grid.positions()
        .filter(|&p| !snake.occupies(p))
        .choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[test]
    fn never_on_snake() {
        let grid = Grid::new(4);
        let snake = Snake::new([
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
            Position::new(3, 0),
            Position::new(3, 1),
            Position::new(2, 1),
            Position::new(1, 1),
            Position::new(0, 1),
        ])
        .unwrap();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        for _ in 0..200 {
            let food = spawn_food(grid, &snake, &mut rng).unwrap();
            assert!(grid.contains(food));
            assert!(!snake.occupies(food));
        }
    }

    #[test]
    fn single_free_cell() {
        let grid = Grid::new(2);
        let snake = Snake::new([
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
        ])
        .unwrap();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        assert_eq!(spawn_food(grid, &snake, &mut rng), Some(Position::new(0, 1)));
    }

    #[test]
    fn full_board() {
        let grid = Grid::new(2);
        let snake = Snake::new([
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
        ])
        .unwrap();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        assert_eq!(spawn_food(grid, &snake, &mut rng), None);
    }

    #[test]
    fn covers_every_free_cell() {
        let grid = Grid::new(3);
        let snake = Snake::horizontal(Position::new(1, 1), 2);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.extend(spawn_food(grid, &snake, &mut rng));
        }
        assert_eq!(seen.len(), grid.cell_count() - snake.len());
    }
}
