use std::collections::HashSet;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::banner::{Banner, BannerKind, ACTION_RESULT_LIFETIME, ALERT_LIFETIME};

/// Element id of the full-page spinner.
pub const PAGE_SPINNER: &str = "spinner";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

/// Loading and result feedback for one page.
#[derive(Debug, Default)]
pub struct Feedback {
    banners: Vec<Banner>,
    skeletons: HashSet<String>,
    spinners: HashSet<String>,
    rendering: bool,
    load_error: bool,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_banner(&mut self, message: impl Into<String>, kind: BannerKind, lifetime: Duration) -> Uuid {
        let banner = Banner::new(message, kind, lifetime);
        let id = banner.id;
        debug!("Banner {:?} for {:?}: {}", kind, lifetime, banner.message);
        self.banners.push(banner);
        id
    }

    /// Banner reporting the outcome of a save or delete.
    pub fn action_result(&mut self, message: impl Into<String>, kind: BannerKind) -> Uuid {
        self.show_banner(message, kind, ACTION_RESULT_LIFETIME)
    }

    /// The generic alert helper.
    pub fn alert(&mut self, message: impl Into<String>, kind: BannerKind) -> Uuid {
        self.show_banner(message, kind, ALERT_LIFETIME)
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.banners.retain(|banner| banner.id != id);
    }

    /// Drops every banner whose lifetime has run out; returns how many.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.banners.len();
        self.banners.retain(|banner| !banner.is_expired(now));
        before - self.banners.len()
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn visible_banners(&mut self) -> &[Banner] {
        self.expire(Instant::now());
        &self.banners
    }

    pub fn toggle_skeleton(&mut self, container: &str, toggle: Toggle) {
        match toggle {
            Toggle::On => {
                self.skeletons.insert(container.to_string());
            }
            Toggle::Off => {
                self.skeletons.remove(container);
            }
        }
    }

    pub fn is_skeleton(&self, container: &str) -> bool {
        self.skeletons.contains(container)
    }

    /// Shows or hides the inline loader inside a button. The button stays
    /// enabled either way.
    pub fn toggle_spinner(&mut self, element: &str, toggle: Toggle) {
        match toggle {
            Toggle::On => {
                self.spinners.insert(element.to_string());
            }
            Toggle::Off => {
                self.spinners.remove(element);
            }
        }
    }

    pub fn is_spinning(&self, element: &str) -> bool {
        self.spinners.contains(element)
    }

    /// Hides the table filter and shows the page spinner.
    pub fn pre_render(&mut self) {
        self.rendering = true;
    }

    pub fn post_render(&mut self) {
        self.rendering = false;
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    pub fn filter_visible(&self) -> bool {
        !self.rendering
    }

    /// Replaces the table with the error illustration. Inserted once no
    /// matter how often the load fails.
    pub fn show_load_error(&mut self) {
        self.rendering = false;
        self.load_error = true;
    }

    pub fn has_load_error(&self) -> bool {
        self.load_error
    }
}
