//! Debounced search scheduling.
//!
//! Every search restarts the window; only the last query is submitted once
//! the window elapses without another search.

use std::time::Duration;
use tokio::time::Instant;

use crate::command::ScreenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub screen: ScreenKind,
    pub query: String,
}

#[derive(Debug)]
pub struct SearchDebounce {
    delay: Duration,
    pending: Option<(PendingSearch, Instant)>,
}

impl SearchDebounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `query`, replacing any search still waiting.
    pub fn push(&mut self, screen: ScreenKind, query: impl Into<String>) {
        let search = PendingSearch {
            screen,
            query: query.into(),
        };
        self.pending = Some((search, Instant::now() + self.delay));
    }

    /// When the pending search becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Takes the pending search if its window has elapsed at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<PendingSearch> {
        match &self.pending {
            Some((_, at)) if *at <= now => self.pending.take().map(|(search, _)| search),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_query_is_due() {
        let mut debounce = SearchDebounce::new(Duration::from_millis(500));
        debounce.push(ScreenKind::Users, "j");
        tokio::time::advance(Duration::from_millis(200)).await;
        debounce.push(ScreenKind::Users, "jo");
        tokio::time::advance(Duration::from_millis(200)).await;
        debounce.push(ScreenKind::Users, "john");

        tokio::time::advance(Duration::from_millis(499)).await;
        assert_eq!(debounce.take_due(Instant::now()), None);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(
            debounce.take_due(Instant::now()),
            Some(PendingSearch {
                screen: ScreenKind::Users,
                query: "john".to_string()
            })
        );
        assert_eq!(debounce.deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let mut debounce = SearchDebounce::new(Duration::from_millis(500));
        debounce.push(ScreenKind::Alarms, "fuel");
        debounce.cancel();
        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(debounce.take_due(Instant::now()), None);
    }
}
