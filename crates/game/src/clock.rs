use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Millisecond time source for enemy attack cadence.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Monotonic wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock. Clones share the same reading, so a test can keep one
/// handle while the game state owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_reading() {
        let clock = ManualClock::new(100);
        let handle = clock.clone();

        handle.advance(250);

        assert_eq!(clock.now_ms(), 350);
        clock.set(5);
        assert_eq!(handle.now_ms(), 5);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now_ms();
        let second = clock.now_ms();

        assert!(second >= first);
    }
}
