use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;

/// Where a steering request came from
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InputSource {
    /// Key presses.  Subject to the one-change-per-tick lock.
    Keyboard,

    /// On-screen buttons and swipe gestures.  These set the pending direction
    /// directly without taking or honoring the lock.
    Pointer,
}

/// Holds the committed direction of travel and the direction queued for the
/// next tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct InputRouter {
    current: Direction,
    pending: Direction,
    locked: bool,
}

impl InputRouter {
    pub(crate) fn new(direction: Direction) -> InputRouter {
        InputRouter {
            current: direction,
            pending: direction,
            locked: false,
        }
    }

    /// The direction the snake last moved in
    #[cfg(test)]
    pub(crate) fn current(&self) -> Direction {
        self.current
    }

    /// The direction that will be committed on the next tick
    #[cfg(test)]
    pub(crate) fn pending(&self) -> Direction {
        self.pending
    }

    #[cfg(test)]
    pub(crate) fn locked(&self) -> bool {
        self.locked
    }

    /// Request that the snake turn to `requested` on the next tick.  Returns
    /// `true` if the request was accepted.
    ///
    /// Reversing onto the snake's own body is always refused.  Keyboard
    /// requests are further refused while locked or if they would not change
    /// the direction, and an accepted keyboard request locks out further
    /// keyboard changes until the next tick.
    pub(crate) fn set_pending_direction(
        &mut self,
        requested: Direction,
        source: InputSource,
    ) -> bool {
        if requested == self.current.opposite() {
            return false;
        }
        match source {
            InputSource::Keyboard => {
                if self.locked || requested == self.current {
                    return false;
                }
                self.pending = requested;
                self.locked = true;
            }
            InputSource::Pointer => self.pending = requested,
        }
        true
    }

    /// Make the pending direction the current one and release the lock.
    /// Returns the newly-committed direction.
    pub(crate) fn commit(&mut self) -> Direction {
        self.current = self.pending;
        self.locked = false;
        self.current
    }
}

/// Interpret a drag from `start` to `end` (in terminal cells) as a swipe.
/// Returns `None` if the drag was too short on both axes.
pub(crate) fn swipe_direction(start: Position, end: Position) -> Option<Direction> {
    let dx = i32::from(end.x) - i32::from(start.x);
    let dy = i32::from(end.y) - i32::from(start.y);
    // Scale rows up so that a drag covers comparable distance on both axes
    let scaled_dy = dy * i32::from(consts::SWIPE_MIN_COLUMNS) / i32::from(consts::SWIPE_MIN_ROWS);
    if dx.unsigned_abs() < u32::from(consts::SWIPE_MIN_COLUMNS)
        && dy.unsigned_abs() < u32::from(consts::SWIPE_MIN_ROWS)
    {
        None
    } else if dx.abs() > scaled_dy.abs() {
        Some(if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}
