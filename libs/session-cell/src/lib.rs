pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod provider;
pub mod router;

pub use identity::{IdentityClient, IdentityError};
pub use provider::{CognitoSessionProvider, SessionProvider, SignOut};
pub use router::session_routes;
