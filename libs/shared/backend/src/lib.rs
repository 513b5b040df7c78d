pub mod client;
pub mod resource;

pub use client::{ResourceClient, ResourceError};
pub use resource::ApiResource;
