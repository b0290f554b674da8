//! Deferred UI bookkeeping: message auto-dismiss and debounce windows. Timers
//! are advanced by frame time, never by the simulation.

use std::collections::{HashSet, VecDeque};

use crate::notify::{Notification, Severity, UiSink};

pub const MESSAGE_LIFETIME_SECONDS: f32 = 5.0;
pub const DEDUPE_WINDOW_SECONDS: f32 = 3.0;
pub const MAX_VISIBLE_MESSAGES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    id: TimerId,
    remaining: f32,
    payload: T,
}

/// Cancellable one-shot timers. Firing order follows due time, with ties in
/// scheduling order.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    tasks: Vec<ScheduledTask<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn schedule(&mut self, delay_seconds: f32, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.tasks.push(ScheduledTask {
            id,
            remaining: delay_seconds.max(0.0),
            payload,
        });
        id
    }

    /// Returns `false` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn advance(&mut self, dt_seconds: f32) -> Vec<T> {
        for task in &mut self.tasks {
            task.remaining -= dt_seconds;
        }
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| task.remaining <= 0.0);
        self.tasks = pending;
        due.sort_by(|a, b| a.remaining.total_cmp(&b.remaining).then(a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|task| task.payload).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub text: String,
    pub severity: Severity,
    id: u64,
    dismiss: TimerId,
}

#[derive(Debug, Clone, Copy)]
enum MessageTimer {
    Dismiss(u64),
    ReleaseKey(&'static str),
}

/// On-screen message stack. Each message disappears after
/// [`MESSAGE_LIFETIME_SECONDS`]; keyed notifications are dropped while an
/// earlier one with the same key is inside its debounce window.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: VecDeque<LogMessage>,
    timers: TimerQueue<MessageTimer>,
    held_keys: HashSet<&'static str>,
    next_id: u64,
}

impl MessageLog {
    pub fn advance(&mut self, dt_seconds: f32) {
        for fired in self.timers.advance(dt_seconds) {
            match fired {
                MessageTimer::Dismiss(id) => self.messages.retain(|message| message.id != id),
                MessageTimer::ReleaseKey(key) => {
                    self.held_keys.remove(key);
                }
            }
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &LogMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.held_keys.clear();
        self.timers = TimerQueue::default();
    }
}

impl UiSink for MessageLog {
    fn notify(&mut self, notification: Notification) {
        if let Some(key) = notification.dedupe_key {
            if !self.held_keys.insert(key) {
                return;
            }
            self.timers
                .schedule(DEDUPE_WINDOW_SECONDS, MessageTimer::ReleaseKey(key));
        }

        let id = self.next_id;
        self.next_id += 1;
        let dismiss = self
            .timers
            .schedule(MESSAGE_LIFETIME_SECONDS, MessageTimer::Dismiss(id));
        self.messages.push_back(LogMessage {
            text: notification.text,
            severity: notification.severity,
            id,
            dismiss,
        });
        while self.messages.len() > MAX_VISIBLE_MESSAGES {
            if let Some(evicted) = self.messages.pop_front() {
                self.timers.cancel(evicted.dismiss);
            }
        }
    }
}
