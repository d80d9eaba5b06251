//! Request signing for the Product Advertising API.
//!
//! PA-API authenticates with the AWS Signature Version 4 layout: a canonical
//! request is hashed into a string to sign, which is then signed with a key
//! derived from the secret through four HMAC-SHA256 rounds. Nothing here does
//! I/O, reads the clock, or logs; the caller supplies `now`.

use crate::amazon::constants::{get_items, marketplace, signing};
use crate::error::SigningError;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Credentials for the associate account.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningCredentials {
    /// Access key id, public half of the key pair
    pub access_key_id: String,
    /// Secret access key
    pub secret_key: String,
    /// Associate tag appended to outbound product links
    pub partner_tag: String,
}

impl SigningCredentials {
    /// Creates a new credential set.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
        partner_tag: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_key: secret_key.into(),
            partner_tag: partner_tag.into(),
        }
    }
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"<redacted>")
            .field("partner_tag", &self.partner_tag)
            .finish()
    }
}

/// A request as seen by the signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignableRequest {
    pub method: String,
    pub canonical_path: String,
    pub canonical_query: String,
    pub payload: Vec<u8>,
    pub host: String,
    pub region: String,
    pub service: String,
}

impl SignableRequest {
    /// Builds a GetItems request for `host` carrying the serialized `payload`.
    pub fn get_items(payload: impl Into<Vec<u8>>, host: impl Into<String>) -> Self {
        Self {
            method: get_items::METHOD.to_string(),
            canonical_path: get_items::PATH.to_string(),
            canonical_query: get_items::QUERY.to_string(),
            payload: payload.into(),
            host: host.into(),
            region: marketplace::REGION.to_string(),
            service: marketplace::SERVICE.to_string(),
        }
    }
}

/// Output of [`sign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureResult {
    /// Value for the `Authorization` header
    pub authorization_header: String,
    /// Value for the `X-Amz-Date` header, `YYYYMMDDTHHMMSSZ`
    pub amz_date: String,
}

/// Hex encoded SHA256 hash.
pub fn hex_sha256(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content).as_slice())
}

/// HMAC with SHA256 hash.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> Vec<u8> {
    let mut h = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    h.update(content);

    h.finalize().into_bytes().to_vec()
}

/// Derives the scoped signing key.
pub fn derive_signing_key(secret_key: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    let secret = format!("{}{}", signing::SECRET_PREFIX, secret_key);
    let k_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, signing::SCOPE_TERMINATOR.as_bytes())
}

/// Formats `now` as `YYYYMMDDTHHMMSSZ`, dropping sub-second precision.
pub fn format_amz_date(now: DateTime<Utc>) -> String {
    now.format(signing::AMZ_DATE_FORMAT).to_string()
}

/// Canonical header block. Every line, including the last, ends in `\n`.
pub fn canonical_headers(host: &str, amz_date: &str) -> String {
    format!(
        "content-encoding:{}\ncontent-type:{}\nhost:{}\nx-amz-date:{}\nx-amz-target:{}\n",
        get_items::CONTENT_ENCODING,
        get_items::CONTENT_TYPE,
        host,
        amz_date,
        get_items::TARGET,
    )
}

/// Builds the canonical request string for `request` at `amz_date`.
pub fn canonical_request(request: &SignableRequest, amz_date: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method,
        request.canonical_path,
        request.canonical_query,
        canonical_headers(&request.host, amz_date),
        signing::SIGNED_HEADERS,
        hex_sha256(&request.payload),
    )
}

/// `DATESTAMP/REGION/SERVICE/aws4_request`
pub fn credential_scope(date_stamp: &str, region: &str, service: &str) -> String {
    format!("{}/{}/{}/{}", date_stamp, region, service, signing::SCOPE_TERMINATOR)
}

/// Builds the string to sign from a finished canonical request.
pub fn string_to_sign(amz_date: &str, scope: &str, canonical_request: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        signing::ALGORITHM,
        amz_date,
        scope,
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Signs `request` with `credentials` as of `now`.
///
/// Deterministic for a fixed `now`. Fails only when the access key id or the
/// secret key is empty.
pub fn sign(
    request: &SignableRequest,
    credentials: &SigningCredentials,
    now: DateTime<Utc>,
) -> Result<SignatureResult, SigningError> {
    if credentials.access_key_id.trim().is_empty() {
        return Err(SigningError::MissingCredential("access_key_id"));
    }
    if credentials.secret_key.trim().is_empty() {
        return Err(SigningError::MissingCredential("secret_key"));
    }

    let amz_date = format_amz_date(now);
    let date_stamp = &amz_date[..8];

    let canonical = canonical_request(request, &amz_date);
    let scope = credential_scope(date_stamp, &request.region, &request.service);
    let to_sign = string_to_sign(&amz_date, &scope, &canonical);

    let signing_key =
        derive_signing_key(&credentials.secret_key, date_stamp, &request.region, &request.service);
    let signature = hex::encode(hmac_sha256(&signing_key, to_sign.as_bytes()));

    let authorization_header = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        signing::ALGORITHM,
        credentials.access_key_id,
        scope,
        signing::SIGNED_HEADERS,
        signature
    );

    Ok(SignatureResult { authorization_header, amz_date })
}
