pub mod api;
pub mod delete;
pub mod form;
pub mod handlers;
pub mod models;
pub mod page;
pub mod router;
pub mod state;
pub mod views;

pub use api::AppointmentApi;
pub use delete::DeleteFlow;
pub use form::{AppointmentForm, Field, FormError, FormFields, FormState};
pub use page::AppointmentsPage;
pub use router::appointment_routes;
pub use state::AppointmentState;
