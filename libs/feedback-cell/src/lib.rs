//! Transient banners, skeleton placeholders and inline spinners shared by
//! every page.

pub mod banner;
pub mod effect;
pub mod render;
pub mod surface;

pub use banner::{Banner, BannerKind, ACTION_RESULT_LIFETIME, ALERT_LIFETIME};
pub use effect::PageEffect;
pub use surface::{Feedback, Toggle, PAGE_SPINNER};
