//! One-way notification channel from the simulation to whatever displays
//! transient messages.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
    /// Notifications sharing a key are collapsed by the sink while an earlier
    /// one is still inside its debounce window.
    pub dedupe_key: Option<&'static str>,
}

impl Notification {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity,
            dedupe_key: None,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Severity::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text)
    }

    pub fn deduped(mut self, key: &'static str) -> Self {
        self.dedupe_key = Some(key);
        self
    }
}

pub trait UiSink {
    fn notify(&mut self, notification: Notification);
}

impl UiSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_keeps_order() {
        let mut sink: Vec<Notification> = Vec::new();

        sink.notify(Notification::info("first"));
        sink.notify(Notification::error("second").deduped("key"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].text, "first");
        assert_eq!(sink[1].severity, Severity::Error);
        assert_eq!(sink[1].dedupe_key, Some("key"));
    }
}
