use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub ups: f32,
    pub frame_time_ms: f32,
    pub worst_frame_ms: f32,
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    interval_start: Instant,
    interval: Duration,
    frames: u32,
    updates: u32,
    frame_time_sum: Duration,
    worst_frame: Duration,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval: Duration) -> Self {
        Self::starting_at(Instant::now(), interval)
    }

    fn starting_at(interval_start: Instant, interval: Duration) -> Self {
        Self {
            interval_start,
            interval,
            frames: 0,
            updates: 0,
            frame_time_sum: Duration::ZERO,
            worst_frame: Duration::ZERO,
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration) {
        self.frames = self.frames.saturating_add(1);
        self.frame_time_sum = self.frame_time_sum.saturating_add(frame_dt);
        self.worst_frame = self.worst_frame.max(frame_dt);
    }

    pub(crate) fn record_update(&mut self) {
        self.updates = self.updates.saturating_add(1);
    }

    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < self.interval {
            return None;
        }

        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let frame_time_ms = if self.frames == 0 {
            0.0
        } else {
            (self.frame_time_sum.as_secs_f32() / self.frames as f32) * 1000.0
        };

        let snapshot = LoopMetricsSnapshot {
            fps: self.frames as f32 / elapsed_seconds,
            ups: self.updates as f32 / elapsed_seconds,
            frame_time_ms,
            worst_frame_ms: self.worst_frame.as_secs_f32() * 1000.0,
        };

        *self = Self::starting_at(now, self.interval);
        Some(snapshot)
    }
}
