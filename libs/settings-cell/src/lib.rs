//! Tenant settings panel: fetch, validate and save the pickup windows.

pub mod api;
pub mod cache;
pub mod handlers;
pub mod models;
pub mod panel;
pub mod router;
pub mod state;
pub mod views;

pub use api::SettingsApi;
pub use cache::SettingsCache;
pub use models::{Setting, SettingValues, MIN_PERIOD, SETTING_NAMES};
pub use panel::{PanelState, SettingsError, SettingsPanel, SettingsSave};
pub use router::settings_routes;
pub use state::SettingsState;
