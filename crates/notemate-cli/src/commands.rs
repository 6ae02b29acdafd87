//! CLI command definitions.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Activate a license key
    Activate {
        /// License key to redeem
        license_key: String,

        /// Bind the activation to this host identifier
        #[arg(long)]
        host_id: Option<String>,

        /// Free-form device label
        #[arg(long)]
        device_tag: Option<String>,
    },

    /// Show the current license state
    State,

    /// Drop the active license
    Clear,

    /// Call a premium feature endpoint
    Feature {
        /// Feature identifier (exportPDF, darkMode)
        feature_id: String,
    },
}
