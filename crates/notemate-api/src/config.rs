//! Server configuration, read from flags, the environment and `.env`.

use clap::Parser;
use notemate_licensing::KeymintConfig;
use notemate_licensing::keymint::DEFAULT_API_URL;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// NoteMate API server configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "notemate-server")]
#[command(version, about = "NoteMate licensing API server", long_about = None)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "BIND_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// KeyMint API base URL.
    #[arg(long, env = "KEYMINT_API_URL", default_value = DEFAULT_API_URL)]
    pub keymint_api_url: String,

    /// KeyMint bearer token.
    #[arg(long, env = "KEYMINT_ACCESS_TOKEN", hide_env_values = true)]
    pub keymint_access_token: Option<String>,

    /// KeyMint product the license keys belong to.
    #[arg(long, env = "KEYMINT_PRODUCT_ID")]
    pub keymint_product_id: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Licensing client settings. Missing values become empty strings, which
    /// makes every activation fail at call time.
    pub fn keymint(&self) -> KeymintConfig {
        KeymintConfig::new(
            non_empty(&self.keymint_access_token).unwrap_or_default(),
            non_empty(&self.keymint_product_id).unwrap_or_default(),
        )
        .with_api_url(self.keymint_api_url.clone())
    }

    /// Environment keys that still need a value.
    pub fn missing_licensing_config(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if non_empty(&self.keymint_access_token).is_none() {
            missing.push("KEYMINT_ACCESS_TOKEN");
        }
        if non_empty(&self.keymint_product_id).is_none() {
            missing.push("KEYMINT_PRODUCT_ID");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "notemate-server",
            "--bind",
            "127.0.0.1",
            "--port",
            "5050",
            "--keymint-api-url",
            "http://localhost:9999",
            "--keymint-access-token",
            "tok",
            "--keymint-product-id",
            "prod_1",
        ])
        .unwrap();

        assert_eq!(config.socket_addr(), "127.0.0.1:5050".parse::<SocketAddr>().unwrap());
        assert!(config.missing_licensing_config().is_empty());

        let keymint = config.keymint();
        assert_eq!(keymint.api_url, "http://localhost:9999");
        assert_eq!(keymint.access_token, "tok");
        assert_eq!(keymint.product_id, "prod_1");
        assert!(keymint.is_configured());
    }

    #[test]
    fn test_blank_licensing_values_are_missing() {
        let config = ServerConfig::try_parse_from([
            "notemate-server",
            "--keymint-access-token",
            " ",
            "--keymint-product-id",
            "",
        ])
        .unwrap();

        assert_eq!(
            config.missing_licensing_config(),
            vec!["KEYMINT_ACCESS_TOKEN", "KEYMINT_PRODUCT_ID"]
        );
        assert!(!config.keymint().is_configured());
    }
}
