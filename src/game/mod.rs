mod clock;
mod direction;
mod food;
mod grid;
mod input;
mod pad;
mod paused;
mod session;
mod snake;
pub(crate) use self::grid::Grid;
use self::clock::GameClock;
use self::direction::Direction;
use self::input::{swipe_direction, InputSource};
use self::pad::ControlPad;
use self::paused::{PauseOpt, Paused};
use self::session::{Collision, Ending, Phase, Session, TickOutcome};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::highscore::HighScore;
use crate::logo::Banner;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    session: Session<R>,
    clock: GameClock,
    high_score: HighScore,
    banner: Banner,
    menu: Paused,
    new_record: bool,
    /// Where the current left-button drag began, if one is in progress
    drag_start: Option<Position>,
    /// The terminal area the game was last drawn in
    area: Rect,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(grid: Grid, high_score: HighScore, banner: Banner) -> Self {
        Game::new_with_rng(grid, high_score, banner, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(grid: Grid, high_score: HighScore, banner: Banner, rng: R) -> Game<R> {
        Game {
            session: Session::new(grid, rng),
            clock: GameClock::new(),
            high_score,
            banner,
            menu: Paused::new(),
            new_record: false,
            drag_start: None,
            area: Rect::ZERO,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if poll(consts::FRAME_PERIOD)? {
            if let Some(screen) = self.handle_event(read()?) {
                return Ok(Some(screen));
            }
        }
        self.advance_frame(Instant::now());
        Ok(None)
    }

    fn advance_frame(&mut self, now: Instant) {
        if self.session.phase() != Phase::Running {
            self.clock.reset_reference();
            return;
        }
        let elapsed = self.clock.frame(now);
        let advance = self.clock.advance(elapsed, &mut self.session);
        if advance.ticks > 1 {
            tracing::debug!(ticks = advance.ticks, ?elapsed, "Ran several ticks in one frame");
        }
        if let Some(TickOutcome::Crashed(_) | TickOutcome::BoardFilled) = advance.last {
            self.finish();
        }
    }

    fn finish(&mut self) {
        tracing::info!(
            score = self.session.score(),
            length = self.session.snake().len(),
            "Game over"
        );
        self.new_record = self.high_score.record(self.session.score());
    }

    fn restart(&mut self) {
        tracing::info!("Restarting game");
        self.session.restart();
        self.clock = GameClock::new();
        self.menu = Paused::new();
        self.new_record = false;
        self.drag_start = None;
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match event {
            Event::FocusLost => {
                if self.session.phase() == Phase::Running {
                    self.toggle_pause();
                }
                None
            }
            Event::Mouse(ev) => {
                self.handle_mouse(ev);
                None
            }
            event => self.handle_command(Command::from_key_event(event.as_key_press_event()?)?),
        }
    }

    fn handle_command(&mut self, cmd: Command) -> Option<Screen> {
        match self.session.phase() {
            Phase::NotStarted => match cmd {
                Command::Enter | Command::Space => {
                    tracing::info!(tile_count = self.session.grid().tile_count(), "Starting game");
                    self.session.start();
                }
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            },
            Phase::Running => match cmd {
                Command::Up => self.steer(Direction::Up, InputSource::Keyboard),
                Command::Down => self.steer(Direction::Down, InputSource::Keyboard),
                Command::Left => self.steer(Direction::Left, InputSource::Keyboard),
                Command::Right => self.steer(Direction::Right, InputSource::Keyboard),
                Command::Space | Command::P | Command::Esc => self.toggle_pause(),
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            },
            Phase::Paused => match self.menu.handle_command(cmd)? {
                PauseOpt::Resume => self.toggle_pause(),
                PauseOpt::Restart => self.restart(),
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            Phase::GameOver(_) => match cmd {
                Command::Enter | Command::R => self.restart(),
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            },
        }
        None
    }

    fn handle_mouse(&mut self, ev: MouseEvent) {
        let pos = Position::new(ev.column, ev.row);
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let pad = GameLayout::new(self.area, self.session.grid()).pad;
                if let Some(direction) = ControlPad::hit(pad, pos) {
                    self.steer(direction, InputSource::Pointer);
                    self.drag_start = None;
                } else {
                    self.drag_start = Some(pos);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(direction) = self
                    .drag_start
                    .take()
                    .and_then(|start| swipe_direction(start, pos))
                {
                    self.steer(direction, InputSource::Pointer);
                }
            }
            _ => (),
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&mut self, frame: &mut Frame<'_>) {
        self.area = frame.area();
        frame.render_widget(&*self, self.area);
    }

    fn steer(&mut self, direction: Direction, source: InputSource) {
        if !self.session.steer(direction, source) {
            tracing::trace!(?direction, ?source, "Ignored steering request");
        }
    }

    fn toggle_pause(&mut self) {
        self.session.toggle_pause();
        self.menu = Paused::new();
    }
}

/// Where each part of the game screen goes within a terminal area
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct GameLayout {
    score_bar: Rect,
    board: Rect,
    level: Rect,
    pad: Rect,
    help: Rect,
    status: Rect,
}

impl GameLayout {
    fn new(area: Rect, grid: Grid) -> GameLayout {
        let display = get_display_area(area);
        let [score_bar, main, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        let board_size = Size {
            width: grid
                .tile_count()
                .saturating_mul(consts::TILE_WIDTH)
                .saturating_add(2),
            height: grid.tile_count().saturating_add(2),
        };
        let [board_column, panel] =
            Layout::horizontal([Constraint::Length(board_size.width), Constraint::Fill(1)])
                .areas(main);
        let board = center_rect(board_column, board_size);
        let level = board.inner(Margin::new(1, 1));
        let [pad_row, help] = Layout::vertical([
            Constraint::Length(ControlPad::HEIGHT.saturating_add(2)),
            Constraint::Fill(1),
        ])
        .areas(panel);
        let pad = center_rect(pad_row, Size::new(ControlPad::WIDTH, ControlPad::HEIGHT));
        GameLayout {
            score_bar,
            board,
            level,
            pad,
            help,
            status,
        }
    }
}

static HELP: &[&str] = &[
    "Steer:  ← ↓ ↑ →",
    "   or:  a s w d",
    "   or:  h j k l",
    "   or:  click/swipe",
    "",
    "Pause:  Space / Esc",
    " Quit:  q",
];

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = GameLayout::new(area, self.session.grid());
        Line::styled(
            format!(
                " Score: {:04}    High Score: {:04}",
                self.session.score(),
                self.high_score.best().max(self.session.score())
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(layout.score_bar, buf);

        Block::bordered()
            .border_style(consts::BORDER_STYLE)
            .render(layout.board, buf);
        let mut level = Canvas {
            area: layout.level,
            buf,
        };
        if let Some(food) = self.session.food() {
            level.draw_tile(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        let snake = self.session.snake();
        for pos in snake.body() {
            level.draw_tile(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_BODY_STYLE);
        }
        // Draw the head (or the crash site) last so that it overwrites
        // whatever is underneath
        match self.session.phase() {
            Phase::GameOver(Ending::Crashed(_, at)) => {
                level.draw_tile(at, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            }
            _ => level.draw_tile(
                snake.head(),
                consts::SNAKE_HEAD_SYMBOL,
                consts::SNAKE_HEAD_STYLE,
            ),
        }

        ControlPad.render(layout.pad, buf);
        Text::from_iter(HELP.iter().copied()).render(layout.help.inner(Margin::new(2, 0)), buf);

        match self.session.phase() {
            Phase::NotStarted => {
                (&self.banner).render(center_rect(layout.level, self.banner.size()), buf);
            }
            Phase::Running => (),
            Phase::Paused => {
                let pause_area = center_rect(layout.level, Size::new(Paused::WIDTH, Paused::HEIGHT));
                self.menu.render(pause_area, buf);
            }
            Phase::GameOver(ending) => {
                let headline = match ending {
                    Ending::Crashed(Collision::Wall, _) => "GAME OVER: crashed into a wall.",
                    Ending::Crashed(Collision::SelfHit, _) => "GAME OVER: bit your own tail.",
                    Ending::BoardFilled => "YOU WIN: the board is full.",
                };
                let mut line = Line::from_iter([
                    Span::raw(headline),
                    Span::raw(format!(" Final score: {}", self.session.score())),
                ]);
                if self.new_record {
                    line.push_span(Span::styled(" NEW HIGH SCORE!", consts::FOOD_STYLE));
                }
                line.push_span("  Restart (");
                line.push_span(Span::styled("r", consts::KEY_STYLE));
                line.push_span(") Quit (");
                line.push_span(Span::styled("q", consts::KEY_STYLE));
                line.push_span(")");
                line.render(layout.status, buf);
            }
        }
    }
}

/// Draws tiles of the level into a buffer, translating from level
/// coordinates to terminal coordinates
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_tile(&mut self, pos: Position, symbol: &str, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::TILE_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        for (x, ch) in (x..).zip(symbol.chars().take(usize::from(consts::TILE_WIDTH))) {
            if !self.area.contains(Position::new(x, y)) {
                break;
            }
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game() -> Game<ChaCha12Rng> {
        Game::new_with_rng(
            Grid::new(consts::DEFAULT_TILE_COUNT),
            HighScore::default(),
            Banner::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn started_game() -> Game<ChaCha12Rng> {
        let mut game = new_game();
        game.area = Rect::new(0, 0, 80, 24);
        assert!(game.handle_event(key(KeyCode::Enter)).is_none());
        assert_eq!(game.session.phase(), Phase::Running);
        game
    }

    #[test]
    fn layout() {
        let layout = GameLayout::new(Rect::new(0, 0, 80, 24), Grid::new(20));
        assert_eq!(layout.score_bar, Rect::new(0, 0, 80, 1));
        assert_eq!(layout.board, Rect::new(0, 1, 42, 22));
        assert_eq!(layout.level, Rect::new(1, 2, 40, 20));
        assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.pad.y, 2);
        assert_eq!(layout.pad.as_size(), Size::new(21, 9));
        assert!(layout.pad.x >= 42);
        assert!(layout.pad.right() <= 80);
    }

    #[test]
    fn frames_drive_ticks() {
        let mut game = started_game();
        let head = game.session.snake().head();
        let start = Instant::now();
        game.advance_frame(start);
        game.advance_frame(start + Duration::from_millis(100));
        assert_eq!(game.session.snake().head(), head);
        game.advance_frame(start + Duration::from_millis(160));
        assert_eq!(game.session.snake().head(), Position::new(head.x + 1, head.y));
    }

    #[test]
    fn paused_time_is_not_caught_up() {
        let mut game = started_game();
        let head = game.session.snake().head();
        let start = Instant::now();
        game.advance_frame(start);
        game.advance_frame(start + Duration::from_millis(100));
        assert!(game.handle_event(key(KeyCode::Char(' '))).is_none());
        assert_eq!(game.session.phase(), Phase::Paused);
        game.advance_frame(start + Duration::from_secs(30));
        assert!(game.handle_event(key(KeyCode::Char(' '))).is_none());
        assert_eq!(game.session.phase(), Phase::Running);
        game.advance_frame(start + Duration::from_secs(31));
        assert_eq!(game.session.snake().head(), head);
        game.advance_frame(start + Duration::from_millis(31_060));
        assert_eq!(game.session.snake().head(), Position::new(head.x + 1, head.y));
    }

    #[test]
    fn crash_records_high_score() {
        let mut game = started_game();
        game.session.set_food(Some(Position::new(0, 0)));
        game.session.set_score(120);
        let start = Instant::now();
        game.advance_frame(start);
        // Ten cells to the right wall, so this is more than enough time
        game.advance_frame(start + Duration::from_secs(5));
        assert!(game.session.is_over());
        assert!(game.new_record);
        assert_eq!(game.high_score.best(), 120);
        assert!(game.handle_event(key(KeyCode::Char('r'))).is_none());
        assert_eq!(game.session.phase(), Phase::Running);
        assert_eq!(game.session.score(), 0);
        assert!(!game.new_record);
        assert_eq!(game.high_score.best(), 120);
    }

    #[test]
    fn quit() {
        let mut game = started_game();
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('q'))),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn pause_menu_restart() {
        let mut game = started_game();
        assert!(game.handle_event(key(KeyCode::Esc)).is_none());
        assert_eq!(game.session.phase(), Phase::Paused);
        assert!(game.handle_event(key(KeyCode::Down)).is_none());
        assert!(game.handle_event(key(KeyCode::Enter)).is_none());
        assert_eq!(game.session.phase(), Phase::Running);
    }

    #[test]
    fn click_pad_button() {
        let mut game = started_game();
        // Middle of the "up" button
        assert!(game
            .handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 60, 3))
            .is_none());
        assert_eq!(game.session.pending_direction(), Direction::Up);
    }

    #[test]
    fn pad_bypasses_keyboard_lock() {
        let mut game = started_game();
        assert!(game.handle_event(key(KeyCode::Up)).is_none());
        assert!(game.handle_event(key(KeyCode::Down)).is_none());
        assert_eq!(game.session.pending_direction(), Direction::Up);
        // Middle of the "down" button
        assert!(game
            .handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 60, 9))
            .is_none());
        assert_eq!(game.session.pending_direction(), Direction::Down);
    }

    #[test]
    fn swipe() {
        let mut game = started_game();
        assert!(game
            .handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 20, 10))
            .is_none());
        assert!(game
            .handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 21, 14))
            .is_none());
        assert_eq!(game.session.pending_direction(), Direction::Down);
    }

    #[test]
    fn render_running() {
        let mut game = started_game();
        game.session.set_food(Some(Position::new(2, 3)));
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&game).render(area, &mut buffer);
        let cell = |x: u16, y: u16| buffer[(x, y)].symbol().to_owned();
        // Level starts at (1, 2); each tile is two columns wide
        assert_eq!(cell(21, 12), "█");
        assert_eq!(cell(22, 12), "█");
        assert_eq!(cell(19, 12), "▓");
        assert_eq!(cell(17, 12), "▓");
        assert_eq!(cell(5, 5), "(");
        assert_eq!(cell(6, 5), ")");
        assert_eq!(cell(0, 1), "┌");
        assert_eq!(cell(41, 22), "┘");
        assert_eq!(buffer[(21, 12)].style().fg, consts::SNAKE_HEAD_STYLE.fg);
        let score_bar = (0..34).map(|x| cell(x, 0)).collect::<String>();
        assert_eq!(score_bar, " Score: 0000    High Score: 0000  ");
    }

    #[test]
    fn render_wall_crash() {
        let mut game = started_game();
        game.session.set_food(Some(Position::new(0, 0)));
        let start = Instant::now();
        game.advance_frame(start);
        game.advance_frame(start + Duration::from_secs(5));
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&game).render(area, &mut buffer);
        // The head stopped at (19, 10), the last cell before the wall
        assert_eq!(buffer[(39, 12)].symbol(), ">");
        assert_eq!(buffer[(40, 12)].symbol(), "<");
        let status = (0..31).map(|x| buffer[(x, 23)].symbol().to_owned()).collect::<String>();
        assert_eq!(status, "GAME OVER: crashed into a wall.");
    }
}
