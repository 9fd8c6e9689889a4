use super::grid::Grid;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction, or `None` if
    /// that would leave `grid`.
    pub(crate) fn advance(self, pos: Position, grid: Grid) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = y.checked_sub(1)?,
            Direction::Down => y = y.checked_add(1)?,
            Direction::Left => x = x.checked_sub(1)?,
            Direction::Right => x = x.checked_add(1)?,
        }
        let pos = Position { x, y };
        grid.contains(pos).then_some(pos)
    }

    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Up, Position::new(2, 7), Some(Position::new(2, 6)))]
    #[case(Direction::Down, Position::new(2, 7), Some(Position::new(2, 8)))]
    #[case(Direction::Left, Position::new(2, 7), Some(Position::new(1, 7)))]
    #[case(Direction::Right, Position::new(2, 7), Some(Position::new(3, 7)))]
    #[case(Direction::Up, Position::new(2, 0), None)]
    #[case(Direction::Down, Position::new(2, 9), None)]
    #[case(Direction::Left, Position::new(0, 7), None)]
    #[case(Direction::Right, Position::new(9, 7), None)]
    fn test_direction_advance(
        #[case] d: Direction,
        #[case] pos: Position,
        #[case] r: Option<Position>,
    ) {
        assert_eq!(d.advance(pos, Grid::new(10)), r);
    }

    #[rstest]
    #[case(Direction::Up, Direction::Down)]
    #[case(Direction::Down, Direction::Up)]
    #[case(Direction::Left, Direction::Right)]
    #[case(Direction::Right, Direction::Left)]
    fn test_opposite(#[case] d: Direction, #[case] opp: Direction) {
        assert_eq!(d.opposite(), opp);
        assert_eq!(d.opposite().opposite(), d);
    }
}
