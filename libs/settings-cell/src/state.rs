use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use shared_backend::ResourceClient;
use shared_config::AppConfig;

use crate::api::SettingsApi;
use crate::panel::SettingsPanel;

pub type SharedPanel = Arc<Mutex<SettingsPanel>>;

/// Router state: configuration plus one settings panel per signed-in user,
/// so the panel's cache and its in-flight save outlive a single request.
#[derive(Clone)]
pub struct SettingsState {
    pub config: Arc<AppConfig>,
    panels: Arc<RwLock<HashMap<String, SharedPanel>>>,
}

impl SettingsState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            panels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn api(&self) -> SettingsApi {
        SettingsApi::new(ResourceClient::new(&self.config))
    }

    /// The user's panel, created closed on first use. Stays in the map while
    /// the caller works on it.
    pub async fn panel(&self, subject: &str) -> SharedPanel {
        let mut panels = self.panels.write().await;
        Arc::clone(panels.entry(subject.to_string()).or_default())
    }

    /// Drops the user's entry once it is closed with nothing cached and no
    /// other request holds it.
    pub async fn release(&self, subject: &str, panel: SharedPanel) {
        let idle = {
            let panel = panel.lock().await;
            !panel.is_open() && !panel.cache().is_fresh()
        };
        if !idle {
            return;
        }

        let mut panels = self.panels.write().await;
        let unshared = panels
            .get(subject)
            .is_some_and(|entry| Arc::ptr_eq(entry, &panel) && Arc::strong_count(entry) == 2);
        if unshared {
            panels.remove(subject);
        }
    }

    pub async fn len(&self) -> usize {
        self.panels.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.panels.read().await.is_empty()
    }
}
