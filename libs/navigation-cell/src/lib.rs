pub mod capabilities;
pub mod guard;
pub mod layout;
pub mod nav;

pub use capabilities::{Capability, CapabilitySet};
pub use guard::{guard_page, AccessDenied, Page, PageExit};
pub use layout::{render_page, PageShell};
pub use nav::{apply_role_visibility, NavEntry, NavItem};
