//! Request handlers organized by resource.

pub mod features;
pub mod health;
pub mod legacy;
pub mod license;
