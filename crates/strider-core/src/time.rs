//! Time system for Strider
//!
//! Frame delta handling with a fixed-timestep accumulator, and a one-shot
//! timer queue used for deferred callbacks such as the landing lock.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for simulation frames (in seconds, must be positive)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Game time tracking
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Simulated time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Feed the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.frame_count += 1;
        self.delta_time = raw_delta.min(self.config.max_delta_time) * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Number of fixed steps to run this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }
}

/// Cancel token for a scheduled timer. Never reused within one manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct PendingTimer<T> {
    handle: TimerHandle,
    deadline: f64,
    payload: T,
}

/// One-shot timer queue.
///
/// Timers fire at most once, in deadline order, when `advance` moves the
/// clock past their deadline. A cancelled timer never fires.
#[derive(Debug)]
pub struct TimerManager<T> {
    now: f64,
    next_id: u64,
    pending: Vec<PendingTimer<T>>,
}

impl<T> Default for TimerManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerManager<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Seconds elapsed on this manager's clock
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `payload` to be delivered once after `delay` seconds
    pub fn schedule_once(&mut self, delay: f32, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            handle,
            deadline: self.now + delay.max(0.0) as f64,
            payload,
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle != handle);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|timer| timer.handle == handle)
    }

    /// Number of timers still waiting to fire
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance the clock and return every timer that came due
    pub fn advance(&mut self, dt: f32) -> Vec<(TimerHandle, T)> {
        self.now += dt.max(0.0) as f64;
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|timer| timer.deadline <= now);
        self.pending = waiting;

        due.sort_by(|a, b| {
            a.deadline
                .total_cmp(&b.deadline)
                .then_with(|| a.handle.cmp(&b.handle))
        });
        due.into_iter()
            .map(|timer| (timer.handle, timer.payload))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);

        time.config.time_scale = 0.5;
        time.update(0.016);
        assert!((time.delta_time - 0.008).abs() < 1.0e-6);
        assert_eq!(time.frame_count, 2);
    }

    #[test]
    fn test_fixed_steps() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.25,
            ..Default::default()
        });
        time.update(0.6);
        // Clamped to max_delta_time (0.25)
        assert_eq!(time.fixed_steps(), 1);
        assert_eq!(time.fixed_steps(), 0);
    }

    #[test]
    fn test_timer_fires_once() {
        let mut timers = TimerManager::new();
        let handle = timers.schedule_once(0.1, "lock");

        assert!(timers.advance(0.05).is_empty());
        assert!(timers.is_pending(handle));

        let fired = timers.advance(0.06);
        assert_eq!(fired, vec![(handle, "lock")]);
        assert!(!timers.is_pending(handle));
        assert!(timers.advance(1.0).is_empty());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timers = TimerManager::new();
        let handle = timers.schedule_once(0.1, 1);
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(timers.advance(1.0).is_empty());
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let mut timers = TimerManager::new();
        let late = timers.schedule_once(0.3, "late");
        let early = timers.schedule_once(0.1, "early");
        let tie = timers.schedule_once(0.1, "tie");

        let fired = timers.advance(0.5);
        assert_eq!(fired, vec![(early, "early"), (tie, "tie"), (late, "late")]);
        assert!(timers.is_empty());
    }
}
