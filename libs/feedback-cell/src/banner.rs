use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

/// Lifetime of the banner reporting the outcome of a save or delete.
pub const ACTION_RESULT_LIFETIME: Duration = Duration::from_millis(1000);

/// Lifetime of the generic alert helper's banner.
pub const ALERT_LIFETIME: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Danger,
}

impl BannerKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerKind::Success => "custom-alert-success",
            BannerKind::Danger => "custom-alert-danger",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub id: Uuid,
    pub message: String,
    pub kind: BannerKind,
    pub lifetime: Duration,
    shown_at: Instant,
}

impl Banner {
    pub fn new(message: impl Into<String>, kind: BannerKind, lifetime: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            lifetime,
            shown_at: Instant::now(),
        }
    }

    pub fn expires_at(&self) -> Instant {
        self.shown_at + self.lifetime
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}
