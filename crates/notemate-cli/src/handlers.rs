//! Command handlers.

use crate::client::{ApiClient, EnterLicense, LicenseStateView};
use console::style;
use notemate_core::Tier;
use reqwest::StatusCode;

fn print_state(state: &LicenseStateView) {
    let tier = match state.tier {
        Tier::Pro => style("PRO").green().bold(),
        Tier::Free => style("FREE").dim(),
    };
    println!("  Tier: {}", tier);

    if state.features.is_empty() {
        println!("  Features: none");
    } else {
        println!("  Features: {}", state.features.join(", "));
    }
    if let Some(host_id) = &state.host_id {
        println!("  Host: {}", host_id);
    }
    if let Some(name) = &state.licensee_name {
        match &state.licensee_email {
            Some(email) => println!("  Licensee: {} <{}>", name, email),
            None => println!("  Licensee: {}", name),
        }
    }
    if let Some(at) = &state.activated_at {
        println!("  Activated: {}", at);
    }
}

/// Activate a license key.
pub async fn activate(
    client: &ApiClient,
    license_key: &str,
    host_id: Option<String>,
    device_tag: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = client
        .enter_license(&EnterLicense {
            license_key,
            host_id,
            device_tag,
        })
        .await?;

    println!("{} License activated", style("✓").green());
    println!("  Tier: {}", style(format!("{:?}", summary.tier).to_uppercase()).bold());
    println!(
        "  Features: {}",
        summary
            .features
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Host: {}", summary.host_id);
    Ok(())
}

/// Show the current license state.
pub async fn state(client: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let state = client.license_state().await?;
    println!("{} License state", style("i").blue());
    print_state(&state);
    Ok(())
}

/// Clear the active license.
pub async fn clear(client: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let state = client.clear_license().await?;
    println!("{} License cleared", style("✓").green());
    print_state(&state);
    Ok(())
}

/// Call a premium feature.
pub async fn feature(client: &ApiClient, feature_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    match client.feature(feature_id).await {
        Ok(grant) if grant.ok => {
            println!("{} {} unlocked", style("✓").green(), style(&grant.feature).bold());
            Ok(())
        }
        Ok(grant) => Err(format!("Feature {} was not granted", grant.feature).into()),
        Err(e) => {
            println!("{} {}: {}", style("✗").red(), style(feature_id).bold(), e);
            if e.status() == Some(StatusCode::PAYMENT_REQUIRED) {
                println!("  Run `notemate activate <LICENSE_KEY>` first");
            }
            Err(format!("{} is not available", feature_id).into())
        }
    }
}
