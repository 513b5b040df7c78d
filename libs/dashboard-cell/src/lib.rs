//! Read-only join of appointments and their rides.

pub mod handlers;
pub mod models;
pub mod page;
pub mod router;
pub mod rows;

pub use page::{dashboard_table, DashboardPage};
pub use router::dashboard_routes;
pub use rows::{DashboardRow, RideDetails};
