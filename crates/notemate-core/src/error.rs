//! Error types for NoteMate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Activation(#[from] ActivationError),

    #[error(transparent)]
    Denied(#[from] DeniedReason),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Normalized failure of a remote activation attempt.
///
/// `status_code` mirrors the licensing service's HTTP status when it answered,
/// and is [`ActivationError::TRANSPORT_STATUS`] when it could not be reached or
/// returned something unreadable. `raw` carries the service's JSON body, if any.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Activation failed ({status_code}): {message}")]
pub struct ActivationError {
    pub status_code: u16,
    pub message: String,
    pub raw: Option<serde_json::Value>,
}

impl ActivationError {
    pub const TRANSPORT_STATUS: u16 = 500;

    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            raw: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(Self::TRANSPORT_STATUS, message)
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }
}

/// Why a feature gate refused access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeniedReason {
    #[error("No active license")]
    NoActiveLicense { feature: String },

    #[error("Feature not available: {feature}")]
    FeatureNotEntitled { feature: String },
}

impl DeniedReason {
    /// The feature identifier that was requested.
    pub fn feature(&self) -> &str {
        match self {
            Self::NoActiveLicense { feature } | Self::FeatureNotEntitled { feature } => feature,
        }
    }
}
