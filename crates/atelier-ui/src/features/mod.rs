//! Page-level feature slices built on the listing core.

pub mod cosmetic_shop;
pub mod images;
pub mod onboarding;
pub mod profile;
pub mod vault;
