use tracing::info;

use shared_backend::{ApiResource, ResourceClient, ResourceError};

use crate::models::Setting;

#[derive(Debug, Clone)]
pub struct SettingsApi {
    client: ResourceClient,
}

impl SettingsApi {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, token: &str) -> Result<Vec<Setting>, ResourceError> {
        self.client.get(&ApiResource::Settings, token).await
    }

    /// One POST per setting, in order. Stops at the first failure.
    pub async fn save(&self, token: &str, changes: &[Setting]) -> Result<(), ResourceError> {
        for setting in changes {
            self.client
                .post(&ApiResource::Setting(setting.name.clone()), token, setting)
                .await?;
            info!("Saved setting {} = {}", setting.name, setting.value);
        }
        Ok(())
    }
}
