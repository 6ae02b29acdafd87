//! Application state shared across handlers.

use notemate_licensing::LicenseGate;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub license: Arc<LicenseGate>,
}

impl AppState {
    pub fn new(license: Arc<LicenseGate>) -> Self {
        Self { license }
    }
}
