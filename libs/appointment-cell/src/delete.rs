use tracing::{error, warn};

use feedback_cell::{BannerKind, Feedback, PageEffect, Toggle, ACTION_RESULT_LIFETIME, PAGE_SPINNER};
use shared_backend::ResourceError;
use shared_utils::generation::{RequestGeneration, Ticket};

use crate::form::FormError;

pub const DELETED: &str = "Appointment Deleted successfully";
pub const DELETE_FAILED: &str = "Error Deleting Appointment";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    Deleting { ticket: Ticket, id: String },
}

/// Row deletion. The page spinner runs while the request is out.
#[derive(Debug)]
pub struct DeleteFlow {
    state: DeleteState,
    requests: RequestGeneration,
}

impl Default for DeleteFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteFlow {
    pub fn new() -> Self {
        Self {
            state: DeleteState::Idle,
            requests: RequestGeneration::new(),
        }
    }

    pub fn state(&self) -> &DeleteState {
        &self.state
    }

    pub fn begin(&mut self, id: impl Into<String>, feedback: &mut Feedback) -> Result<Ticket, FormError> {
        if matches!(self.state, DeleteState::Deleting { .. }) {
            return Err(FormError::InFlight);
        }

        let ticket = self.requests.begin();
        feedback.toggle_spinner(PAGE_SPINNER, Toggle::On);
        self.state = DeleteState::Deleting { ticket, id: id.into() };
        Ok(ticket)
    }

    pub fn finish(
        &mut self,
        ticket: Ticket,
        result: Result<(), ResourceError>,
        feedback: &mut Feedback,
    ) -> Result<PageEffect, FormError> {
        let id = match &self.state {
            DeleteState::Deleting { ticket: pending, id } if *pending == ticket && self.requests.is_current(ticket) => {
                id.clone()
            }
            _ => {
                warn!("Discarding stale delete completion (ticket {})", ticket.generation());
                return Err(FormError::Stale);
            }
        };

        feedback.toggle_spinner(PAGE_SPINNER, Toggle::Off);
        self.state = DeleteState::Idle;

        match result {
            Ok(()) => {
                feedback.action_result(DELETED, BannerKind::Success);
                Ok(PageEffect::Reload { after: ACTION_RESULT_LIFETIME })
            }
            Err(e) => {
                error!("Failed to delete appointment {}: {}", id, e);
                feedback.action_result(DELETE_FAILED, BannerKind::Danger);
                Ok(PageEffect::Stay)
            }
        }
    }
}
