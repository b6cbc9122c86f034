//! Fixed timestep clock
//!
//! Converts variable frame deltas into whole simulation ticks. Each `start` opens a new
//! generation; ticks released under an older generation are stale and must be dropped, so a
//! restart never interleaves with the previous run's backlog.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS};

/// Ticks due for a given generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTicks {
    pub generation: u64,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickClock {
    tick_ms: u32,
    accumulator_ms: u32,
    running: bool,
    generation: u64,
    /// Ticks released since the last start
    elapsed_ticks: u64,
}

impl TickClock {
    pub fn new(tick_ms: u32) -> Self {
        Self {
            tick_ms: tick_ms.max(1),
            accumulator_ms: 0,
            running: false,
            generation: 0,
            elapsed_ticks: 0,
        }
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Begin a fresh sequence. Any backlog from a previous run is discarded.
    pub fn start(&mut self) -> u64 {
        self.generation += 1;
        self.accumulator_ms = 0;
        self.elapsed_ticks = 0;
        self.running = true;
        self.generation
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator_ms = 0;
    }

    /// True while `generation` is the live, running sequence
    pub fn is_current(&self, generation: u64) -> bool {
        self.running && self.generation == generation
    }

    /// Feed wall time; returns the ticks now due
    pub fn advance(&mut self, elapsed_ms: u32) -> DueTicks {
        let mut due = DueTicks {
            generation: self.generation,
            count: 0,
        };
        if !self.running {
            return due;
        }

        // Clamp long stalls (tab switch, debugger) instead of fast-forwarding through them
        self.accumulator_ms += elapsed_ms.min(MAX_FRAME_MS);

        while self.accumulator_ms >= self.tick_ms && due.count < MAX_SUBSTEPS {
            self.accumulator_ms -= self.tick_ms;
            due.count += 1;
        }
        // Drop what the substep cap could not release
        self.accumulator_ms = self.accumulator_ms.min(self.tick_ms - 1);

        self.elapsed_ticks += due.count as u64;
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_clock_releases_nothing() {
        let mut clock = TickClock::new(16);
        assert_eq!(clock.advance(1000).count, 0);
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = TickClock::new(16);
        clock.start();
        assert_eq!(clock.advance(10).count, 0);
        assert_eq!(clock.advance(10).count, 1);
        assert_eq!(clock.advance(12).count, 1);
        assert_eq!(clock.elapsed_ticks(), 2);
    }

    #[test]
    fn test_substep_cap() {
        let mut clock = TickClock::new(16);
        clock.start();
        assert_eq!(clock.advance(200).count, MAX_SUBSTEPS);
        // Backlog beyond the cap is dropped
        assert_eq!(clock.advance(0).count, 0);
    }

    #[test]
    fn test_stop_discards_backlog() {
        let mut clock = TickClock::new(16);
        clock.start();
        clock.advance(15);
        clock.stop();
        assert_eq!(clock.advance(100).count, 0);
    }

    #[test]
    fn test_restart_is_a_fresh_generation() {
        let mut clock = TickClock::new(16);
        let first = clock.start();
        clock.advance(40);
        let second = clock.start();
        assert_ne!(first, second);
        assert!(!clock.is_current(first));
        assert!(clock.is_current(second));
        assert_eq!(clock.elapsed_ticks(), 0);
        // The 8ms left over from the first run is gone
        assert_eq!(clock.advance(8).count, 0);
    }
}
