use std::time::{Duration, Instant};

/// Trailing-edge debounce for content-change notification.
///
/// Hosts report every micro-edit; surrounding UI (outline sidebars and the
/// like) only wants a notification once edits quiet down. Each recorded
/// change restarts the window, so the notification fires `debounce` after
/// the *last* edit of a burst.
///
/// This is a latency tradeoff, not a correctness mechanism: consumers must
/// re-derive whatever they need from a fresh snapshot when notified, so
/// coalescing arbitrarily many edits into one notification is always safe.
#[derive(Debug)]
pub struct ChangeNotifier {
    debounce: Duration,
    last_change: Option<Instant>,
}

impl ChangeNotifier {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            last_change: None,
        }
    }

    /// Record a document mutation, restarting the quiet window.
    pub fn record_change(&mut self, at: Instant) {
        self.last_change = Some(at);
    }

    /// True when a notification is pending and the quiet window has passed.
    pub fn due(&self, now: Instant) -> bool {
        match self.last_change {
            Some(last) => now.saturating_duration_since(last) >= self.debounce,
            None => false,
        }
    }

    /// Consume a due notification. Returns false (and consumes nothing)
    /// while the window is still open.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if self.due(now) {
            self.last_change = None;
            true
        } else {
            false
        }
    }
}
