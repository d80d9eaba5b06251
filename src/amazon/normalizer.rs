//! Flattening of upstream item records into [`NormalizedItem`]s.

use crate::amazon::models::{NormalizedItem, RawItem};
use serde_json::Value;

/// Fallback strings used when a field is absent.
pub mod fallback {
    pub const TITLE: &str = "title unavailable";
    pub const PRICE: &str = "price unavailable";
    pub const IMAGE: &str = "image unavailable";
    pub const PRODUCT_URL: &str = "URL unavailable";
    pub const AFFILIATE_LINK: &str = "affiliate link unavailable";
}

/// JSON pointers into a raw item.
pub mod paths {
    pub const TITLE: &str = "/ItemInfo/Title/DisplayValue";
    pub const PRICE: &str = "/Offers/Listings/0/Price/DisplayAmount";
    pub const IMAGE: &str = "/Images/Primary/HighRes/URL";
    pub const DETAIL_PAGE_URL: &str = "/DetailPageURL";
    pub const IS_PRIME: &str = "/Offers/Listings/0/IsPrimeEligible";
}

/// Resolves `pointer` in `record`, treating `null` like a missing segment.
pub fn lookup<'a>(record: &'a Value, pointer: &str) -> Option<&'a Value> {
    record.pointer(pointer).filter(|v| !v.is_null())
}

/// Reads a non-empty string at `pointer`.
pub fn lookup_str<'a>(record: &'a Value, pointer: &str) -> Option<&'a str> {
    lookup(record, pointer).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Reads the string at `pointer`, or `default` when any segment is missing.
pub fn get(record: &Value, pointer: &str, default: &str) -> String {
    lookup_str(record, pointer).unwrap_or(default).to_string()
}

/// Normalizes one raw item. Never fails.
pub fn normalize(raw_item: RawItem, partner_tag: &str) -> NormalizedItem {
    let detail_url = lookup_str(&raw_item, paths::DETAIL_PAGE_URL);

    let affiliate_link = match detail_url {
        Some(url) => format!("{}?tag={}", url, partner_tag),
        None => fallback::AFFILIATE_LINK.to_string(),
    };
    let product_url = detail_url.unwrap_or(fallback::PRODUCT_URL).to_string();

    NormalizedItem {
        title: get(&raw_item, paths::TITLE, fallback::TITLE),
        price: get(&raw_item, paths::PRICE, fallback::PRICE),
        image: get(&raw_item, paths::IMAGE, fallback::IMAGE),
        product_url,
        affiliate_link,
        is_prime: lookup(&raw_item, paths::IS_PRIME).and_then(Value::as_bool).unwrap_or(false),
        raw_item,
    }
}

/// Normalizes every item of a response.
pub fn normalize_all(items: Vec<RawItem>, partner_tag: &str) -> Vec<NormalizedItem> {
    items.into_iter().map(|item| normalize(item, partner_tag)).collect()
}
