//! Port traits (hexagonal architecture).
//!
//! The licensing gate talks to the remote activation service only through
//! these types, so transport details stay in the adapter.

use crate::error::ActivationError;
use async_trait::async_trait;

/// A single activation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationRequest {
    pub product_id: String,
    pub license_key: String,
    pub host_id: String,
    pub device_tag: Option<String>,
}

/// What the licensing service tells us about the licensee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationPayload {
    pub licensee_name: Option<String>,
    pub licensee_email: Option<String>,
}

/// Remote service that redeems license keys.
#[async_trait]
pub trait ActivationService: Send + Sync {
    /// Perform one activation attempt. Implementations must not retry.
    async fn activate(
        &self,
        request: &ActivationRequest,
    ) -> std::result::Result<ActivationPayload, ActivationError>;
}
