use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// All positions are relative to the top-left corner of the board.  The
/// segments are stored head first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    segments: VecDeque<Position>,
}

impl Snake {
    /// Create a snake from its segments, head first.  Returns `None` if
    /// `segments` is empty.
    #[cfg(test)]
    pub(crate) fn new<I: IntoIterator<Item = Position>>(segments: I) -> Option<Snake> {
        let segments = segments.into_iter().collect::<VecDeque<_>>();
        (!segments.is_empty()).then_some(Snake { segments })
    }

    /// Create a horizontal snake of length `len` with its head at `head`,
    /// trailing off to the left.  The tail is cut short if it would run off
    /// the board.
    pub(crate) fn horizontal(head: Position, len: u16) -> Snake {
        let segments = (0..len.max(1))
            .map_while(|i| head.x.checked_sub(i).map(|x| Position::new(x, head.y)))
            .collect();
        Snake { segments }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        // A Snake always has at least one segment.
        self.segments.front().copied().unwrap_or_default()
    }

    /// Return the positions of all segments, head first
    #[cfg(test)]
    pub(crate) fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    /// Iterate over the segments after the head
    pub(crate) fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().skip(1).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Add a new head in front of the current one
    pub(crate) fn push_head(&mut self, pos: Position) {
        self.segments.push_front(pos);
    }

    /// Remove the last segment.  The head is never removed.
    pub(crate) fn pop_tail(&mut self) {
        if self.segments.len() > 1 {
            let _ = self.segments.pop_back();
        }
    }
}
