//! NoteMate Core
//!
//! Entitlement types, the tier feature table, error handling and the
//! activation port shared by the licensing, API and CLI crates.

pub mod entitlement;
pub mod error;
pub mod ports;

pub use entitlement::{
    ActivationSummary, EntitlementRecord, Feature, LicenseState, Tier, features_for,
};
pub use error::{ActivationError, DeniedReason, Error, Result};
pub use ports::{ActivationPayload, ActivationRequest, ActivationService};
