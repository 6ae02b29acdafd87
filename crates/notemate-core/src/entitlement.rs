//! Entitlement types and the tier feature table.

use crate::ports::ActivationPayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Coarse license level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    #[default]
    Free,
    Pro,
}

/// Premium capability gated behind a license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "exportPDF")]
    ExportPdf,
    #[serde(rename = "darkMode")]
    DarkMode,
}

impl Feature {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExportPdf => "exportPDF",
            Self::DarkMode => "darkMode",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Features unlocked by each tier, in response order.
const TIER_FEATURES: &[(Tier, &[Feature])] = &[
    (Tier::Free, &[]),
    (Tier::Pro, &[Feature::ExportPdf, Feature::DarkMode]),
];

/// Look up the features a tier unlocks.
pub fn features_for(tier: Tier) -> &'static [Feature] {
    TIER_FEATURES
        .iter()
        .find(|(t, _)| *t == tier)
        .map(|(_, features)| *features)
        .unwrap_or(&[])
}

/// The activated license held by the gate.
///
/// Only constructible through [`EntitlementRecord::activated`], so the feature
/// set always matches the tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementRecord {
    license_key: String,
    host_id: String,
    tier: Tier,
    features: Vec<Feature>,
    activated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    licensee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    licensee_email: Option<String>,
}

impl EntitlementRecord {
    /// Build the PRO record for a successful remote activation.
    pub fn activated(
        license_key: impl Into<String>,
        host_id: impl Into<String>,
        payload: ActivationPayload,
    ) -> Self {
        let tier = Tier::Pro;
        Self {
            license_key: license_key.into(),
            host_id: host_id.into(),
            tier,
            features: features_for(tier).to_vec(),
            activated_at: Utc::now(),
            licensee_name: payload.licensee_name,
            licensee_email: payload.licensee_email,
        }
    }

    pub fn license_key(&self) -> &str {
        &self.license_key
    }

    pub fn host_id(&self) -> &str {
        &self.host_id
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn licensee_name(&self) -> Option<&str> {
        self.licensee_name.as_deref()
    }

    /// Whether `feature_id` is in this record's feature set.
    pub fn has_feature(&self, feature_id: &str) -> bool {
        self.features.iter().any(|f| f.as_str() == feature_id)
    }

    pub fn summary(&self) -> ActivationSummary {
        ActivationSummary {
            tier: self.tier,
            features: self.features.clone(),
            host_id: self.host_id.clone(),
        }
    }
}

/// Public projection of the gate's record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LicenseState {
    #[default]
    Free,
    Active(Arc<EntitlementRecord>),
}

#[derive(Serialize)]
struct TierView {
    tier: Tier,
    features: &'static [Feature],
}

impl Serialize for LicenseState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Free => TierView {
                tier: Tier::Free,
                features: features_for(Tier::Free),
            }
            .serialize(serializer),
            Self::Active(record) => record.as_ref().serialize(serializer),
        }
    }
}

impl LicenseState {
    pub fn tier(&self) -> Tier {
        match self {
            Self::Free => Tier::Free,
            Self::Active(record) => record.tier(),
        }
    }

    pub fn features(&self) -> &[Feature] {
        match self {
            Self::Free => features_for(Tier::Free),
            Self::Active(record) => record.features(),
        }
    }

    pub fn record(&self) -> Option<&EntitlementRecord> {
        match self {
            Self::Free => None,
            Self::Active(record) => Some(record.as_ref()),
        }
    }
}

/// Result of a successful activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationSummary {
    pub tier: Tier,
    pub features: Vec<Feature>,
    pub host_id: String,
}
