use super::direction::Direction;
use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::Line,
    widgets::{Block, Widget},
};

/// On-screen arrow buttons that can be clicked to steer the snake
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ControlPad;

impl ControlPad {
    const BUTTON_WIDTH: u16 = 7;
    const BUTTON_HEIGHT: u16 = 3;

    /// The width that should be used for the `Rect` passed to
    /// `ControlPad::render()`
    pub(crate) const WIDTH: u16 = Self::BUTTON_WIDTH * 3;

    /// The height that should be used for the `Rect` passed to
    /// `ControlPad::render()`
    pub(crate) const HEIGHT: u16 = Self::BUTTON_HEIGHT * 3;

    /// The area of each button when the pad is drawn in `area`
    fn buttons(area: Rect) -> [(Direction, Rect); 4] {
        let button = |col: u16, row: u16| {
            Rect::new(
                area.x.saturating_add(col * Self::BUTTON_WIDTH),
                area.y.saturating_add(row * Self::BUTTON_HEIGHT),
                Self::BUTTON_WIDTH,
                Self::BUTTON_HEIGHT,
            )
            .intersection(area)
        };
        [
            (Direction::Up, button(1, 0)),
            (Direction::Left, button(0, 1)),
            (Direction::Right, button(2, 1)),
            (Direction::Down, button(1, 2)),
        ]
    }

    /// Return the direction of the button at `pos` when the pad is drawn in
    /// `area`, if any
    pub(crate) fn hit(area: Rect, pos: Position) -> Option<Direction> {
        Self::buttons(area)
            .into_iter()
            .find_map(|(d, rect)| rect.contains(pos).then_some(d))
    }
}

fn arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲",
        Direction::Down => "▼",
        Direction::Left => "◀",
        Direction::Right => "▶",
    }
}

impl Widget for ControlPad {
    /*
     *        ┌─────┐
     *        │  ▲  │
     *        └─────┘
     * ┌─────┐       ┌─────┐
     * │  ◀  │       │  ▶  │
     * └─────┘       └─────┘
     *        ┌─────┐
     *        │  ▼  │
     *        └─────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        for (direction, rect) in Self::buttons(area) {
            if rect.is_empty() {
                continue;
            }
            let block = Block::bordered().border_style(consts::PAD_STYLE);
            let inner = block.inner(rect);
            block.render(rect, buf);
            Line::styled(arrow(direction), consts::PAD_STYLE)
                .centered()
                .render(inner, buf);
        }
    }
}
