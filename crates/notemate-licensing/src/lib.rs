//! KeyMint license activation and feature gating for NoteMate.

pub mod gate;
pub mod keymint;

pub use gate::{Authorized, LicenseGate};
pub use keymint::{KeymintClient, KeymintConfig};
