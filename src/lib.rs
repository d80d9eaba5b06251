//! paapi-relay - Webhook relay for Product Advertising API GetItems calls
//!
//! Signs requests with the AWS Signature Version 4 layout PA-API expects and
//! flattens the returned items into records with defined fallbacks.

pub mod amazon;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod server;

pub use amazon::models::{NormalizedItem, RawItem};
pub use amazon::normalizer::normalize;
pub use amazon::signer::{derive_signing_key, sign, SignableRequest, SignatureResult, SigningCredentials};
pub use config::Config;
pub use error::{RelayError, SigningError};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
