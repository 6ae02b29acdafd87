//! Wire-format tests for notemate-core types.

use notemate_core::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_tier_serialization() {
    assert_eq!(serde_json::to_value(Tier::Free).unwrap(), json!("FREE"));
    assert_eq!(serde_json::to_value(Tier::Pro).unwrap(), json!("PRO"));
    assert_eq!(Tier::default(), Tier::Free);
}

#[test]
fn test_feature_identifiers() {
    assert_eq!(
        serde_json::to_value(Feature::ExportPdf).unwrap(),
        json!("exportPDF")
    );
    assert_eq!(Feature::DarkMode.to_string(), "darkMode");

    let parsed: Feature = serde_json::from_value(json!("darkMode")).unwrap();
    assert_eq!(parsed, Feature::DarkMode);
    assert!(serde_json::from_value::<Feature>(json!("sync")).is_err());
}

#[test]
fn test_activation_summary_shape() {
    let summary = ActivationSummary {
        tier: Tier::Pro,
        features: features_for(Tier::Pro).to_vec(),
        host_id: "host-abc".to_string(),
    };

    assert_eq!(
        serde_json::to_value(&summary).unwrap(),
        json!({
            "tier": "PRO",
            "features": ["exportPDF", "darkMode"],
            "hostId": "host-abc",
        })
    );
}

#[test]
fn test_record_summary_matches_record() {
    let payload = ActivationPayload {
        licensee_name: Some("Ada".to_string()),
        licensee_email: Some("ada@example.com".to_string()),
    };
    let record = EntitlementRecord::activated("KEY-1", "host-9", payload);
    let summary = record.summary();

    assert_eq!(summary.tier, record.tier());
    assert_eq!(summary.features, record.features());
    assert_eq!(summary.host_id, "host-9");

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["licenseeEmail"], "ada@example.com");
}
