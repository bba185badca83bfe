/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::time::Duration;

use tokio::time::Instant;

/// Interval between keep-alive wake-ups.
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// An actor's keep-alive schedule: at most one pending wake-up.
///
/// Requests arm the timer if nothing is pending; a firing timer re-arms itself
/// unconditionally. None of this touches the counter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAlive {
    interval: Duration,
    next_wake: Option<Instant>,
    fires: u64,
}

impl Default for KeepAlive {
    fn default() -> Self {
        Self::new(KEEP_ALIVE_INTERVAL)
    }
}

impl KeepAlive {
    /// Creates an unarmed schedule.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_wake: None,
            fires: 0,
        }
    }

    /// Schedules a wake-up at `now + interval` unless one is already pending.
    ///
    /// Returns `true` if a new wake-up was scheduled.
    pub fn arm(&mut self, now: Instant) -> bool {
        if self.next_wake.is_some() {
            return false;
        }
        self.next_wake = Some(now + self.interval);
        true
    }

    /// Records a wake-up and schedules the next one at `now + interval`.
    pub fn fire(&mut self, now: Instant) {
        self.fires += 1;
        self.next_wake = Some(now + self.interval);
    }

    /// When the pending wake-up is due, if any.
    #[inline]
    #[must_use]
    pub const fn next_wake(&self) -> Option<Instant> {
        self.next_wake
    }

    /// How many times the timer has fired.
    #[inline]
    #[must_use]
    pub const fn fires(&self) -> u64 {
        self.fires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_is_a_no_op_while_pending() {
        let start = Instant::now();
        let mut keep_alive = KeepAlive::default();
        assert!(keep_alive.arm(start));
        assert!(!keep_alive.arm(start + Duration::from_secs(10)));
        assert_eq!(keep_alive.next_wake(), Some(start + KEEP_ALIVE_INTERVAL));
    }

    #[test]
    fn firing_reschedules_from_the_fire_time() {
        let start = Instant::now();
        let mut keep_alive = KeepAlive::default();
        keep_alive.arm(start);
        let fired_at = start + KEEP_ALIVE_INTERVAL;
        keep_alive.fire(fired_at);
        assert_eq!(keep_alive.next_wake(), Some(fired_at + KEEP_ALIVE_INTERVAL));
        assert_eq!(keep_alive.fires(), 1);
        assert!(!keep_alive.arm(fired_at));
    }
}
