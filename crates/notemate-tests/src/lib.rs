//! Integration test infrastructure for NoteMate.
//!
//! Runs the real API router in-process against a mocked KeyMint service.
//!
//! # Usage
//!
//! ```ignore
//! use notemate_tests::{ApiTestClient, KeymintMock, start_test_server};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let keymint = KeymintMock::start().await;
//!     keymint.accept(Some("Ada")).await;
//!     let (addr, _handle) = start_test_server(&keymint.uri()).await.unwrap();
//!     let client = ApiTestClient::new(addr);
//! }
//! ```

pub mod helpers;
pub mod keymint_mock;

pub use helpers::*;
pub use keymint_mock::KeymintMock;

/// Initialize test logging (call once per test binary).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,notemate_licensing=debug")),
        )
        .with_test_writer()
        .try_init();
}
