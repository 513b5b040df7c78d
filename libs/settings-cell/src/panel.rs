// libs/settings-cell/src/panel.rs
use thiserror::Error;
use tracing::{debug, error, warn};

use feedback_cell::{BannerKind, Feedback, Toggle};
use shared_backend::ResourceError;
use shared_utils::generation::{RequestGeneration, Ticket};

use crate::cache::SettingsCache;
use crate::models::{known_values, values_valid, Setting, SettingValues, SETTING_NAMES};

pub const SETTINGS_FORM: &str = "settingsForm";
pub const SAVE_BUTTON: &str = "settings-form-submit-btn";
pub const SAVED: &str = "Settings has been Updated Successfully";
pub const SAVE_FAILED: &str = "Error Updating Settings";
pub const LOAD_FAILED: &str = "Error Loading Settings";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("a save is already in flight")]
    InFlight,

    #[error("settings panel is not open")]
    NotOpen,

    #[error("settings are still loading")]
    Loading,

    #[error("completion belongs to a panel that was closed or reopened")]
    Stale,

    #[error("every period must be a whole number of at least 15")]
    Invalid,

    #[error("unknown setting {0}")]
    UnknownSetting(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Loading { ticket: Ticket },
    /// `labels` are the `<name>_text` values, which follow the inputs only
    /// while the inputs are valid.
    Open { inputs: SettingValues, labels: SettingValues },
    Saving { ticket: Ticket, inputs: SettingValues },
}

/// A started save: the caller posts `changes` and reports back with `ticket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSave {
    pub ticket: Ticket,
    pub changes: Vec<Setting>,
}

#[derive(Debug)]
pub struct SettingsPanel {
    state: PanelState,
    cache: SettingsCache,
    requests: RequestGeneration,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self {
            state: PanelState::Closed,
            cache: SettingsCache::Invalid,
            requests: RequestGeneration::new(),
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn cache(&self) -> &SettingsCache {
        &self.cache
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, PanelState::Closed)
    }

    pub fn inputs(&self) -> Option<&SettingValues> {
        match &self.state {
            PanelState::Open { inputs, .. } | PanelState::Saving { inputs, .. } => Some(inputs),
            _ => None,
        }
    }

    pub fn labels(&self) -> Option<&SettingValues> {
        match &self.state {
            PanelState::Open { labels, .. } => Some(labels),
            PanelState::Saving { inputs, .. } => Some(inputs),
            _ => None,
        }
    }

    pub fn save_enabled(&self) -> bool {
        match &self.state {
            PanelState::Open { inputs, .. } => values_valid(inputs),
            _ => false,
        }
    }

    /// Opens the panel. Returns a ticket when the settings have to be fetched;
    /// a fresh cache fills the form without a request.
    pub fn open(&mut self, feedback: &mut Feedback) -> Option<Ticket> {
        if self.is_open() {
            return None;
        }

        if let Some(values) = self.cache.values() {
            debug!("Settings served from cache");
            self.state = PanelState::Open {
                inputs: values.clone(),
                labels: values.clone(),
            };
            return None;
        }

        let ticket = self.requests.begin();
        feedback.toggle_skeleton(SETTINGS_FORM, Toggle::On);
        self.state = PanelState::Loading { ticket };
        Some(ticket)
    }

    /// Closing by toggle keeps the cache.
    pub fn toggle(&mut self, feedback: &mut Feedback) -> Option<Ticket> {
        if self.is_open() {
            self.hide(feedback);
            None
        } else {
            self.open(feedback)
        }
    }

    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Setting>, ResourceError>,
        feedback: &mut Feedback,
    ) -> Result<(), SettingsError> {
        match self.state {
            PanelState::Loading { ticket: pending } if pending == ticket && self.requests.is_current(ticket) => {}
            _ => {
                warn!("Discarding stale settings load (ticket {})", ticket.generation());
                return Err(SettingsError::Stale);
            }
        }

        feedback.toggle_skeleton(SETTINGS_FORM, Toggle::Off);

        match result {
            Ok(settings) => {
                let values = known_values(&settings);
                self.cache.fill(values.clone());
                self.state = PanelState::Open {
                    inputs: values.clone(),
                    labels: values,
                };
                Ok(())
            }
            Err(e) => {
                error!("Failed to load settings: {}", e);
                feedback.alert(LOAD_FAILED, BannerKind::Danger);
                self.state = PanelState::Closed;
                Ok(())
            }
        }
    }

    /// Edits one input. Returns whether save is now enabled.
    pub fn set_input(&mut self, name: &str, value: impl Into<String>) -> Result<bool, SettingsError> {
        if !SETTING_NAMES.contains(&name) {
            return Err(SettingsError::UnknownSetting(name.to_string()));
        }

        match &mut self.state {
            PanelState::Open { inputs, labels } => {
                inputs.insert(name.to_string(), value.into());
                let valid = values_valid(inputs);
                if valid {
                    *labels = inputs.clone();
                }
                Ok(valid)
            }
            PanelState::Saving { .. } => Err(SettingsError::InFlight),
            PanelState::Loading { .. } => Err(SettingsError::Loading),
            PanelState::Closed => Err(SettingsError::NotOpen),
        }
    }

    /// Settings whose input differs from what was fetched; all of them when
    /// nothing fresh is cached.
    pub fn changes(&self) -> Vec<Setting> {
        let Some(inputs) = self.inputs() else {
            return Vec::new();
        };

        inputs
            .iter()
            .filter(|(name, value)| {
                self.cache
                    .values()
                    .and_then(|cached| cached.get(*name))
                    .map_or(true, |cached| cached != *value)
            })
            .map(|(name, value)| Setting::new(name.clone(), value.clone()))
            .collect()
    }

    pub fn submit(&mut self, feedback: &mut Feedback) -> Result<SettingsSave, SettingsError> {
        let inputs = match &self.state {
            PanelState::Open { inputs, .. } if values_valid(inputs) => inputs.clone(),
            PanelState::Open { .. } => return Err(SettingsError::Invalid),
            PanelState::Saving { .. } => return Err(SettingsError::InFlight),
            PanelState::Loading { .. } => return Err(SettingsError::Loading),
            PanelState::Closed => return Err(SettingsError::NotOpen),
        };

        let changes = self.changes();
        let ticket = self.requests.begin();
        feedback.toggle_spinner(SAVE_BUTTON, Toggle::On);
        debug!("Saving {} setting(s)", changes.len());
        self.state = PanelState::Saving { ticket, inputs };
        Ok(SettingsSave { ticket, changes })
    }

    /// Success closes the panel and drops the cache so the next open refetches.
    pub fn finish_save(
        &mut self,
        ticket: Ticket,
        result: Result<(), ResourceError>,
        feedback: &mut Feedback,
    ) -> Result<(), SettingsError> {
        let inputs = match &self.state {
            PanelState::Saving { ticket: pending, inputs } if *pending == ticket && self.requests.is_current(ticket) => {
                inputs.clone()
            }
            _ => {
                warn!("Discarding stale settings save (ticket {})", ticket.generation());
                return Err(SettingsError::Stale);
            }
        };

        feedback.toggle_spinner(SAVE_BUTTON, Toggle::Off);

        match result {
            Ok(()) => {
                self.cache.invalidate();
                self.state = PanelState::Closed;
                feedback.alert(SAVED, BannerKind::Success);
            }
            Err(e) => {
                error!("Failed to save settings: {}", e);
                feedback.alert(SAVE_FAILED, BannerKind::Danger);
                self.state = PanelState::Open {
                    labels: inputs.clone(),
                    inputs,
                };
            }
        }
        Ok(())
    }

    /// The explicit close button. Also drops the cache.
    pub fn close(&mut self, feedback: &mut Feedback) {
        self.cache.invalidate();
        self.hide(feedback);
    }

    fn hide(&mut self, feedback: &mut Feedback) {
        self.requests.invalidate();
        feedback.toggle_skeleton(SETTINGS_FORM, Toggle::Off);
        feedback.toggle_spinner(SAVE_BUTTON, Toggle::Off);
        self.state = PanelState::Closed;
    }
}
