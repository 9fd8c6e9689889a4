use ratatui::layout::{Position, Positions, Rect, Size};

/// The square board the snake moves on.  Cells are addressed by
/// `Position`s relative to the top-left corner, with both coordinates in
/// `0..tile_count`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    tile_count: u16,
}

impl Grid {
    pub(crate) fn new(tile_count: u16) -> Grid {
        Grid { tile_count }
    }

    pub(crate) fn tile_count(self) -> u16 {
        self.tile_count
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.tile_count,
            height: self.tile_count,
        }
    }

    /// Total number of cells on the board
    pub(crate) fn cell_count(self) -> usize {
        usize::from(self.tile_count) * usize::from(self.tile_count)
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.tile_count && pos.y < self.tile_count
    }

    /// Iterate over every cell on the board in row-major order
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    /// The cell in the middle of the board
    pub(crate) fn center(self) -> Position {
        Position::new(self.tile_count / 2, self.tile_count / 2)
    }
}
