//! Product Advertising API: signing, HTTP client, data models, and normalization.

pub mod client;
pub mod constants;
pub mod models;
pub mod normalizer;
pub mod signer;

pub use client::{PaapiClient, ProductApi};
pub use models::{normalize_asin, GetItemsRequest, GetItemsResponse, NormalizedItem, RawItem};
pub use normalizer::normalize;
pub use signer::{sign, SignableRequest, SignatureResult, SigningCredentials};
