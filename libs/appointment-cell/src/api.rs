use tracing::{debug, info};

use shared_backend::{ApiResource, ResourceClient, ResourceError};

use crate::models::{AppointmentDetail, AppointmentPayload, AppointmentSummary, EditTarget, PatientOption};

/// Appointment and patient resources of the backend.
#[derive(Debug, Clone)]
pub struct AppointmentApi {
    client: ResourceClient,
}

impl AppointmentApi {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Patient picker options, sorted by name.
    pub async fn patients(&self, token: &str) -> Result<Vec<PatientOption>, ResourceError> {
        let mut patients: Vec<PatientOption> = self.client.get(&ApiResource::Patients, token).await?;
        patients.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        debug!("Loaded {} patients", patients.len());
        Ok(patients)
    }

    pub async fn list(&self, token: &str) -> Result<Vec<AppointmentSummary>, ResourceError> {
        self.client.get(&ApiResource::Appointments, token).await
    }

    pub async fn get(&self, token: &str, id: &str) -> Result<AppointmentDetail, ResourceError> {
        self.client.get(&ApiResource::Appointment(id.to_string()), token).await
    }

    /// POST for new records, PUT for existing ones.
    pub async fn save(
        &self,
        token: &str,
        target: &EditTarget,
        payload: &AppointmentPayload,
    ) -> Result<(), ResourceError> {
        match target {
            EditTarget::Create => {
                self.client.post(&ApiResource::Appointments, token, payload).await?;
            }
            EditTarget::Update(id) => {
                self.client.put(&ApiResource::Appointment(id.clone()), token, payload).await?;
            }
        }
        info!("Saved {}", target);
        Ok(())
    }

    pub async fn delete(&self, token: &str, id: &str) -> Result<(), ResourceError> {
        self.client.delete(&ApiResource::Appointment(id.to_string()), token).await?;
        info!("Deleted appointment {}", id);
        Ok(())
    }
}
