use std::time::{Duration, Instant};

use crate::config::BOOST_RELEASE_TIMEOUT;
use crate::game::{GameState, GameStatus, TickOutcome};

/// Deadline of the single next tick.
///
/// After every tick the deadline is re-armed from `current_speed()`, so speed
/// and boost changes only ever affect the next wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickScheduler {
    next_tick_at: Option<Instant>,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms exactly one future tick `interval_ms` after `now`.
    pub fn schedule_after(&mut self, now: Instant, interval_ms: u64) {
        self.next_tick_at = Some(now + Duration::from_millis(interval_ms));
    }

    pub fn cancel(&mut self) {
        self.next_tick_at = None;
    }

    #[must_use]
    pub fn next_tick_at(&self) -> Option<Instant> {
        self.next_tick_at
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_tick_at.is_some_and(|deadline| now >= deadline)
    }

    /// Runs at most one tick when the deadline has passed.
    ///
    /// A game that is not running holds no deadline; the first call after it
    /// starts or resumes arms a full interval instead of firing at once.
    pub fn drive(&mut self, state: &mut GameState, now: Instant) -> Option<TickOutcome> {
        if state.status != GameStatus::Running {
            self.cancel();
            return None;
        }

        if self.next_tick_at.is_none() {
            self.schedule_after(now, state.current_speed());
            return None;
        }

        if !self.is_due(now) {
            return None;
        }

        let outcome = state.tick();
        self.schedule_after(now, state.current_speed());
        Some(outcome)
    }

    /// How long the input poll may block, never past the next deadline.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant, frame_interval: Duration) -> Duration {
        match self.next_tick_at {
            Some(deadline) => deadline.saturating_duration_since(now).min(frame_interval),
            None => frame_interval,
        }
    }
}

/// Tracks whether the boost key is held down.
#[derive(Debug, Clone, Copy)]
pub struct BoostHold {
    pressed_at: Option<Instant>,
    release_reported: bool,
}

impl BoostHold {
    /// `release_reported` is true when the terminal sends key-release events.
    #[must_use]
    pub fn new(release_reported: bool) -> Self {
        Self {
            pressed_at: None,
            release_reported,
        }
    }

    /// Records a press or auto-repeat of the boost key.
    pub fn press(&mut self, now: Instant) {
        self.pressed_at = Some(now);
    }

    pub fn release(&mut self) {
        self.pressed_at = None;
    }

    #[must_use]
    pub fn is_held(&self, now: Instant) -> bool {
        match self.pressed_at {
            None => false,
            Some(_) if self.release_reported => true,
            Some(pressed_at) => now.saturating_duration_since(pressed_at) <= BOOST_RELEASE_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::{BOOST_RELEASE_TIMEOUT, GameConfig};
    use crate::food::Food;
    use crate::game::{GameState, TickOutcome};
    use crate::grid::WallMode;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{BoostHold, TickScheduler};

    fn running_state(speed_ms: u64) -> GameState {
        let mut state =
            GameState::new_with_seed(GameConfig::default(), WallMode::Open, speed_ms, 5);
        state.snake = Snake::new(Position::new(5, 5), Direction::Right);
        state.food = Some(Food::new(Position::new(0, 0)));
        state.start();
        state
    }

    #[test]
    fn first_drive_arms_a_full_interval() {
        let start = Instant::now();
        let mut state = running_state(100);
        let mut scheduler = TickScheduler::new();

        assert_eq!(scheduler.drive(&mut state, start), None);
        assert_eq!(
            scheduler.next_tick_at(),
            Some(start + Duration::from_millis(100))
        );
        assert_eq!(scheduler.drive(&mut state, start + Duration::from_millis(99)), None);
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn due_deadline_ticks_once_and_rearms_from_fresh_speed() {
        let start = Instant::now();
        let mut state = running_state(100);
        let mut scheduler = TickScheduler::new();
        scheduler.drive(&mut state, start);

        state.set_boost(true);
        let fired_at = start + Duration::from_millis(100);
        assert_eq!(
            scheduler.drive(&mut state, fired_at),
            Some(TickOutcome::Continued)
        );
        assert_eq!(state.tick_count, 1);
        assert_eq!(
            scheduler.next_tick_at(),
            Some(fired_at + Duration::from_millis(50))
        );

        // Still before the new deadline: nothing more happens.
        assert_eq!(scheduler.drive(&mut state, fired_at + Duration::from_millis(10)), None);
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn pause_drops_the_deadline() {
        let start = Instant::now();
        let mut state = running_state(100);
        let mut scheduler = TickScheduler::new();
        scheduler.drive(&mut state, start);

        state.toggle_pause();
        assert_eq!(scheduler.drive(&mut state, start + Duration::from_secs(5)), None);
        assert_eq!(scheduler.next_tick_at(), None);

        state.toggle_pause();
        let resumed = start + Duration::from_secs(6);
        assert_eq!(scheduler.drive(&mut state, resumed), None);
        assert_eq!(
            scheduler.next_tick_at(),
            Some(resumed + Duration::from_millis(100))
        );
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn poll_timeout_never_passes_the_deadline() {
        let start = Instant::now();
        let frame = Duration::from_millis(16);
        let mut scheduler = TickScheduler::new();

        assert_eq!(scheduler.poll_timeout(start, frame), frame);

        scheduler.schedule_after(start, 10);
        assert_eq!(scheduler.poll_timeout(start, frame), Duration::from_millis(10));
        assert_eq!(
            scheduler.poll_timeout(start + Duration::from_millis(30), frame),
            Duration::ZERO
        );
    }

    #[test]
    fn boost_hold_times_out_without_release_events() {
        let start = Instant::now();
        let mut hold = BoostHold::new(false);

        assert!(!hold.is_held(start));
        hold.press(start);
        assert!(hold.is_held(start + BOOST_RELEASE_TIMEOUT));
        assert!(!hold.is_held(start + BOOST_RELEASE_TIMEOUT + Duration::from_millis(1)));
    }

    #[test]
    fn boost_hold_waits_for_release_when_reported() {
        let start = Instant::now();
        let mut hold = BoostHold::new(true);

        hold.press(start);
        assert!(hold.is_held(start + Duration::from_secs(10)));

        hold.release();
        assert!(!hold.is_held(start + Duration::from_secs(10)));
    }
}
