use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an instant falls relative to a discount's activity window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowState {
    NotStarted,
    Open,
    Ended,
}

/// Optional `[start, end]` bounds, both inclusive. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityWindow {
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl ActivityWindow {
    pub fn new(starts_at: Option<DateTime<Utc>>, ends_at: Option<DateTime<Utc>>) -> Self {
        Self { starts_at, ends_at }
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> WindowState {
        if self.starts_at.is_some_and(|start| now < start) {
            WindowState::NotStarted
        } else if self.ends_at.is_some_and(|end| now > end) {
            WindowState::Ended
        } else {
            WindowState::Open
        }
    }

    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == WindowState::Open
    }
}
