use std::time::{Duration, Instant};

/// Something that advances in discrete ticks of a (possibly changing) fixed
/// length
pub(crate) trait Simulation {
    /// Length of the next tick
    fn tick_interval(&self) -> Duration;

    /// Whether simulated time should currently accrue
    fn advancing(&self) -> bool;

    /// What a tick reports back, e.g. whether it ended the simulation
    type Outcome;

    fn tick(&mut self) -> Self::Outcome;
}

/// The result of [`GameClock::advance()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Advance<O> {
    /// Number of ticks run
    pub(crate) ticks: u32,

    /// Outcome of the last tick run, if any
    pub(crate) last: Option<O>,
}

/// Fixed-timestep accumulator that turns frames of arbitrary length into
/// whole simulation ticks.  Leftover time is carried over to the next frame.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct GameClock {
    accumulator: Duration,
    last_frame: Option<Instant>,
}

impl GameClock {
    pub(crate) fn new() -> GameClock {
        GameClock::default()
    }

    /// Record a frame at `now` and return the time elapsed since the previous
    /// one.  The first frame after creation or a call to
    /// [`reset_reference()`][GameClock::reset_reference] yields zero.
    pub(crate) fn frame(&mut self, now: Instant) -> Duration {
        let elapsed = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_frame = Some(now);
        elapsed
    }

    /// Forget the previous frame so that time spent paused is not caught up
    pub(crate) fn reset_reference(&mut self) {
        self.last_frame = None;
    }

    /// Leftover time not yet consumed by a tick
    #[cfg(test)]
    pub(crate) fn accumulated(&self) -> Duration {
        self.accumulator
    }

    /// Add `elapsed` to the accumulator and run as many ticks of `sim` as fit.
    /// The interval is re-read after every tick, so a speed change applies
    /// from the next tick onwards.  Returns the number of ticks run along with
    /// the outcome of the final one.
    ///
    /// Nothing accrues while `sim` is not advancing, and ticking stops as soon
    /// as it stops advancing (e.g., on game over).
    pub(crate) fn advance<S: Simulation>(
        &mut self,
        elapsed: Duration,
        sim: &mut S,
    ) -> Advance<S::Outcome> {
        let mut ticks = 0;
        let mut last = None;
        if !sim.advancing() {
            return Advance { ticks, last };
        }
        self.accumulator = self.accumulator.saturating_add(elapsed);
        loop {
            let interval = sim.tick_interval();
            if interval.is_zero() || self.accumulator < interval {
                break;
            }
            last = Some(sim.tick());
            self.accumulator -= interval;
            ticks += 1;
            if !sim.advancing() {
                self.accumulator = Duration::ZERO;
                break;
            }
        }
        Advance { ticks, last }
    }
}
