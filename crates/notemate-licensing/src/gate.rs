//! License gate: owns the active entitlement and answers feature checks.

use notemate_core::{
    ActivationRequest, ActivationService, ActivationSummary, DeniedReason, EntitlementRecord,
    Error, LicenseState, Result,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Proof that a feature check passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorized {
    pub feature: String,
}

/// Holder of the single entitlement record.
///
/// The write lock is only taken to swap a fully-built record in or out, never
/// across the remote call, so readers always see either the previous record or
/// the new one. Concurrent activations race and the last to finish wins.
pub struct LicenseGate {
    service: Arc<dyn ActivationService>,
    product_id: String,
    record: RwLock<Option<Arc<EntitlementRecord>>>,
}

fn generate_host_id() -> String {
    format!("host-{}", Uuid::new_v4().simple())
}

impl LicenseGate {
    pub fn new(service: Arc<dyn ActivationService>, product_id: impl Into<String>) -> Self {
        Self {
            service,
            product_id: product_id.into(),
            record: RwLock::new(None),
        }
    }

    /// Redeem `license_key` and, on success, replace the current record.
    ///
    /// A missing or empty `host_id` is replaced by a freshly generated one.
    /// Remote failures are returned unchanged and leave the record untouched.
    pub async fn activate(
        &self,
        license_key: &str,
        host_id: Option<&str>,
        device_tag: Option<&str>,
    ) -> Result<ActivationSummary> {
        if license_key.trim().is_empty() {
            return Err(Error::Validation(
                "licenseKey must be a non-empty string".to_string(),
            ));
        }

        let host_id = match host_id.filter(|h| !h.trim().is_empty()) {
            Some(h) => h.to_string(),
            None => generate_host_id(),
        };

        let request = ActivationRequest {
            product_id: self.product_id.clone(),
            license_key: license_key.to_string(),
            host_id,
            device_tag: device_tag.map(str::to_string),
        };

        let payload = self.service.activate(&request).await.map_err(|e| {
            warn!(
                status = e.status_code,
                host_id = %request.host_id,
                "Activation failed, keeping current license state"
            );
            Error::Activation(e)
        })?;

        let record = Arc::new(EntitlementRecord::activated(
            request.license_key,
            request.host_id,
            payload,
        ));
        let summary = record.summary();

        *self.record.write().await = Some(record);

        info!(host_id = %summary.host_id, tier = ?summary.tier, "License activated");
        Ok(summary)
    }

    /// Drop the current record. Clearing an already free state is a no-op.
    pub async fn clear(&self) -> LicenseState {
        if self.record.write().await.take().is_some() {
            info!("License cleared");
        }
        LicenseState::Free
    }

    pub async fn current_state(&self) -> LicenseState {
        match self.record.read().await.as_ref() {
            Some(record) => LicenseState::Active(Arc::clone(record)),
            None => LicenseState::Free,
        }
    }

    /// Check whether the current record grants `feature_id`.
    pub async fn authorize(&self, feature_id: &str) -> std::result::Result<Authorized, DeniedReason> {
        let guard = self.record.read().await;
        let Some(record) = guard.as_ref() else {
            debug!(feature = feature_id, "Feature denied: no active license");
            return Err(DeniedReason::NoActiveLicense {
                feature: feature_id.to_string(),
            });
        };

        if !record.has_feature(feature_id) {
            debug!(feature = feature_id, tier = ?record.tier(), "Feature denied: not entitled");
            return Err(DeniedReason::FeatureNotEntitled {
                feature: feature_id.to_string(),
            });
        }

        Ok(Authorized {
            feature: feature_id.to_string(),
        })
    }
}
