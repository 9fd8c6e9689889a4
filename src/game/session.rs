use super::clock::Simulation;
use super::direction::Direction;
use super::food::spawn_food;
use super::grid::Grid;
use super::input::{InputRouter, InputSource};
use super::snake::Snake;
use crate::consts;
use rand::Rng;
use ratatui::layout::Position;
use std::time::Duration;

/// Where a session is in its lifecycle
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    NotStarted,
    Running,
    Paused,
    GameOver(Ending),
}

/// Why a session ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    /// The snake ran into something at the given cell.  For wall crashes,
    /// this is the head's last position inside the board.
    Crashed(Collision, Position),

    /// The snake filled the board, leaving nowhere to put food
    BoardFilled,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    SelfHit,
}

/// What happened during a single tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The session was not running, so nothing happened
    Idle,
    Moved,
    Ate,
    Crashed(Collision),
    BoardFilled,
}

/// The state of one game, from start to game over
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session<R> {
    rng: R,
    grid: Grid,
    snake: Snake,
    food: Option<Position>,
    input: InputRouter,
    score: u32,
    tick_interval: Duration,
    phase: Phase,
}

impl<R: Rng> Session<R> {
    /// Create a session in the `NotStarted` phase with a three-segment snake
    /// in the middle of the board heading right
    pub(crate) fn new(grid: Grid, rng: R) -> Session<R> {
        let snake = Snake::horizontal(grid.center(), consts::INITIAL_SNAKE_LENGTH);
        Session::with_snake(grid, snake, Direction::Right, rng)
    }

    pub(crate) fn with_snake(
        grid: Grid,
        snake: Snake,
        direction: Direction,
        mut rng: R,
    ) -> Session<R> {
        let food = spawn_food(grid, &snake, &mut rng);
        Session {
            rng,
            grid,
            snake,
            food,
            input: InputRouter::new(direction),
            score: 0,
            tick_interval: consts::BASE_TICK_INTERVAL,
            phase: Phase::NotStarted,
        }
    }

    /// Advance the snake one cell
    pub(crate) fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }
        let direction = self.input.commit();
        let head = self.snake.head();
        let Some(new_head) = direction.advance(head, self.grid) else {
            return self.crash(Collision::Wall, head);
        };
        if self.snake.occupies(new_head) {
            return self.crash(Collision::SelfHit, new_head);
        }
        self.snake.push_head(new_head);
        if self.food == Some(new_head) {
            self.score = self.score.saturating_add(consts::FOOD_REWARD);
            self.tick_interval = tick_interval_for(self.score);
            self.food = spawn_food(self.grid, &self.snake, &mut self.rng);
            if self.food.is_none() {
                tracing::info!(score = self.score, "Snake filled the board");
                self.phase = Phase::GameOver(Ending::BoardFilled);
                return TickOutcome::BoardFilled;
            }
            TickOutcome::Ate
        } else {
            self.snake.pop_tail();
            TickOutcome::Moved
        }
    }

    /// Throw away all session state and begin a new game on the same board
    pub(crate) fn restart(&mut self) {
        let snake = Snake::horizontal(self.grid.center(), consts::INITIAL_SNAKE_LENGTH);
        self.food = spawn_food(self.grid, &snake, &mut self.rng);
        self.snake = snake;
        self.input = InputRouter::new(Direction::Right);
        self.score = 0;
        self.tick_interval = consts::BASE_TICK_INTERVAL;
        self.phase = Phase::Running;
    }

    fn crash(&mut self, collision: Collision, at: Position) -> TickOutcome {
        tracing::info!(score = self.score, ?collision, "Snake crashed");
        self.phase = Phase::GameOver(Ending::Crashed(collision, at));
        TickOutcome::Crashed(collision)
    }
}

impl<R> Session<R> {
    /// Begin play.  Only has an effect on a session that has not started yet.
    pub(crate) fn start(&mut self) {
        if self.phase == Phase::NotStarted {
            self.phase = Phase::Running;
        }
    }

    /// Switch between running and paused.  Has no effect before the session
    /// starts or after it ends.
    pub(crate) fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => other,
        };
    }

    /// Queue a change of direction for the next tick.  Refused unless the
    /// session is running; see [`InputRouter::set_pending_direction()`] for
    /// the other rules.
    pub(crate) fn steer(&mut self, direction: Direction, source: InputSource) -> bool {
        self.phase == Phase::Running && self.input.set_pending_direction(direction, source)
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub(crate) fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    #[cfg(test)]
    pub(crate) fn direction(&self) -> Direction {
        self.input.current()
    }

    #[cfg(test)]
    pub(crate) fn pending_direction(&self) -> Direction {
        self.input.pending()
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Option<Position>) {
        self.food = food;
    }
}

impl<R: Rng> Simulation for Session<R> {
    fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    fn advancing(&self) -> bool {
        self.phase == Phase::Running
    }

    type Outcome = TickOutcome;

    fn tick(&mut self) -> TickOutcome {
        Session::tick(self)
    }
}

/// The tick interval in effect once the player has `score` points:
/// [`BASE_TICK_INTERVAL`][consts::BASE_TICK_INTERVAL] minus one
/// [`TICK_INTERVAL_DECREMENT`][consts::TICK_INTERVAL_DECREMENT] per
/// [`SPEED_STEP_SCORE`][consts::SPEED_STEP_SCORE] points, but never less than
/// [`MIN_TICK_INTERVAL`][consts::MIN_TICK_INTERVAL]
pub(crate) fn tick_interval_for(score: u32) -> Duration {
    let steps = score / consts::SPEED_STEP_SCORE;
    consts::TICK_INTERVAL_DECREMENT
        .checked_mul(steps)
        .and_then(|d| consts::BASE_TICK_INTERVAL.checked_sub(d))
        .map_or(consts::MIN_TICK_INTERVAL, |d| d.max(consts::MIN_TICK_INTERVAL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn session(segments: &[(u16, u16)], direction: Direction) -> Session<ChaCha12Rng> {
        let snake = Snake::new(segments.iter().map(|&(x, y)| Position::new(x, y))).unwrap();
        let mut s = Session::with_snake(
            Grid::new(20),
            snake,
            direction,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        s.start();
        s
    }

    fn cells(snake: &Snake) -> VecDeque<Position> {
        snake.segments().clone()
    }

    #[rstest]
    #[case(0, 150)]
    #[case(10, 150)]
    #[case(49, 150)]
    #[case(50, 148)]
    #[case(100, 146)]
    #[case(500, 130)]
    #[case(1250, 100)]
    #[case(2500, 50)]
    #[case(5000, 50)]
    #[case(6000, 50)]
    #[case(u32::MAX, 50)]
    fn test_tick_interval_for(#[case] score: u32, #[case] millis: u64) {
        assert_eq!(tick_interval_for(score), Duration::from_millis(millis));
    }

    #[test]
    fn new_session() {
        let s = Session::new(Grid::new(20), ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(s.phase(), Phase::NotStarted);
        assert_eq!(
            cells(s.snake()),
            VecDeque::from([
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ])
        );
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.score(), 0);
        assert_eq!(s.tick_interval(), Duration::from_millis(150));
        let food = s.food().unwrap();
        assert!(!s.snake().occupies(food));
    }

    #[test]
    fn not_started_does_not_tick() {
        let mut s = Session::new(Grid::new(20), ChaCha12Rng::seed_from_u64(RNG_SEED));
        let before = s.clone();
        assert_eq!(s.tick(), TickOutcome::Idle);
        assert_eq!(s, before);
    }

    #[test]
    fn move_without_food() {
        let mut s = session(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        s.food = Some(Position::new(0, 0));
        assert_eq!(s.tick(), TickOutcome::Moved);
        assert_eq!(
            cells(s.snake()),
            VecDeque::from([
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ])
        );
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.score(), 0);
        assert_eq!(s.food(), Some(Position::new(0, 0)));
    }

    #[test]
    fn hit_wall() {
        let mut s = session(&[(19, 5), (18, 5), (17, 5)], Direction::Right);
        s.score = 30;
        s.food = Some(Position::new(0, 0));
        let snake_before = cells(s.snake());
        assert_eq!(s.tick(), TickOutcome::Crashed(Collision::Wall));
        assert_eq!(
            s.phase(),
            Phase::GameOver(Ending::Crashed(Collision::Wall, Position::new(19, 5)))
        );
        assert_eq!(s.score(), 30);
        assert_eq!(cells(s.snake()), snake_before);
        // No further mutation once over
        assert_eq!(s.tick(), TickOutcome::Idle);
        assert_eq!(cells(s.snake()), snake_before);
        assert_eq!(s.score(), 30);
    }

    #[rstest]
    #[case(&[(0, 5), (1, 5)], Direction::Left)]
    #[case(&[(5, 0), (5, 1)], Direction::Up)]
    #[case(&[(5, 19), (5, 18)], Direction::Down)]
    fn hit_other_walls(#[case] segments: &[(u16, u16)], #[case] direction: Direction) {
        let mut s = session(segments, direction);
        assert_eq!(s.tick(), TickOutcome::Crashed(Collision::Wall));
        assert!(s.is_over());
    }

    #[test]
    fn hit_self() {
        let mut s = session(
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6), (4, 5)],
            Direction::Up,
        );
        s.food = Some(Position::new(0, 0));
        assert!(s.steer(Direction::Right, InputSource::Keyboard));
        // Heading right from (5, 5) lands on (6, 5)
        assert_eq!(s.tick(), TickOutcome::Crashed(Collision::SelfHit));
        assert_eq!(
            s.phase(),
            Phase::GameOver(Ending::Crashed(Collision::SelfHit, Position::new(6, 5)))
        );
        assert_eq!(s.snake().len(), 6);
    }

    #[test]
    fn tail_cell_counts_as_collision() {
        // The tail has not moved away yet when the new head is checked
        let mut s = session(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Left);
        s.food = Some(Position::new(0, 0));
        assert!(s.steer(Direction::Down, InputSource::Keyboard));
        assert_eq!(s.tick(), TickOutcome::Crashed(Collision::SelfHit));
    }

    #[test]
    fn eat_food() {
        let mut s = session(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        s.score = 40;
        s.food = Some(Position::new(11, 10));
        assert_eq!(s.tick(), TickOutcome::Ate);
        assert_eq!(s.score(), 50);
        assert_eq!(s.tick_interval(), Duration::from_millis(148));
        assert_eq!(
            cells(s.snake()),
            VecDeque::from([
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ])
        );
        let food = s.food().unwrap();
        assert!(!s.snake().occupies(food));
    }

    #[test]
    fn fill_board() {
        let snake = Snake::new([Position::new(1, 0), Position::new(1, 1), Position::new(0, 1)])
            .unwrap();
        let mut s = Session::with_snake(
            Grid::new(2),
            snake,
            Direction::Left,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        s.start();
        assert_eq!(s.food(), Some(Position::new(0, 0)));
        assert_eq!(s.tick(), TickOutcome::BoardFilled);
        assert_eq!(s.phase(), Phase::GameOver(Ending::BoardFilled));
        assert_eq!(s.snake().len(), 4);
        assert_eq!(s.food(), None);
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn length_invariant_over_random_play() {
        let mut s = Session::new(Grid::new(12), ChaCha12Rng::seed_from_u64(RNG_SEED));
        s.start();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED + 1);
        let dirs = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        for _ in 0..500 {
            if s.is_over() {
                break;
            }
            let dir = dirs[rng.random_range(0..dirs.len())];
            let before_dir = s.direction();
            if s.steer(dir, InputSource::Keyboard) {
                assert_ne!(dir, before_dir.opposite());
            }
            let before_len = s.snake().len();
            match s.tick() {
                TickOutcome::Ate => assert_eq!(s.snake().len(), before_len + 1),
                TickOutcome::Moved => assert_eq!(s.snake().len(), before_len),
                _ => assert_eq!(s.snake().len(), before_len),
            }
            if let Some(food) = s.food() {
                assert!(!s.snake().occupies(food));
            }
            let segs = s.snake().segments();
            let unique = segs.iter().collect::<std::collections::HashSet<_>>();
            assert_eq!(unique.len(), segs.len());
        }
    }

    #[test]
    fn steering_commits_on_tick() {
        let mut s = session(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        s.food = Some(Position::new(0, 0));
        assert!(s.steer(Direction::Up, InputSource::Keyboard));
        assert!(!s.steer(Direction::Down, InputSource::Keyboard));
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.pending_direction(), Direction::Up);
        assert_eq!(s.tick(), TickOutcome::Moved);
        assert_eq!(s.direction(), Direction::Up);
        assert_eq!(s.snake().head(), Position::new(10, 9));
        assert!(s.steer(Direction::Left, InputSource::Keyboard));
    }

    #[test]
    fn no_steering_unless_running() {
        let mut s = Session::new(Grid::new(20), ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert!(!s.steer(Direction::Up, InputSource::Keyboard));
        assert!(!s.steer(Direction::Up, InputSource::Pointer));
        s.start();
        s.toggle_pause();
        assert!(!s.steer(Direction::Up, InputSource::Keyboard));
        assert!(!s.steer(Direction::Up, InputSource::Pointer));
        s.toggle_pause();
        assert!(s.steer(Direction::Up, InputSource::Pointer));
    }

    #[test]
    fn lifecycle() {
        let mut s = Session::new(Grid::new(20), ChaCha12Rng::seed_from_u64(RNG_SEED));
        s.toggle_pause();
        assert_eq!(s.phase(), Phase::NotStarted);
        s.start();
        assert_eq!(s.phase(), Phase::Running);
        s.toggle_pause();
        assert_eq!(s.phase(), Phase::Paused);
        assert_eq!(s.tick(), TickOutcome::Idle);
        s.start();
        assert_eq!(s.phase(), Phase::Paused);
        s.toggle_pause();
        assert_eq!(s.phase(), Phase::Running);
        s.phase = Phase::GameOver(Ending::BoardFilled);
        s.toggle_pause();
        s.start();
        assert_eq!(s.phase(), Phase::GameOver(Ending::BoardFilled));
    }
}
