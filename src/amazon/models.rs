//! Data models for GetItems requests, responses, and normalized items.

use crate::amazon::constants::{marketplace, RESOURCES};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upstream item record. Any field may be missing at any depth.
pub type RawItem = Value;

/// Trims and upper-cases an item id, returning it only when it has the ASIN
/// shape of exactly 10 ASCII alphanumeric characters.
pub fn normalize_asin(raw: &str) -> Option<String> {
    let asin = raw.trim().to_ascii_uppercase();
    (asin.len() == 10 && asin.chars().all(|c| c.is_ascii_alphanumeric())).then_some(asin)
}

/// GetItems request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsRequest {
    /// Associate tag
    pub partner_tag: String,
    /// Always "Associates"
    pub partner_type: String,
    /// Target marketplace
    pub marketplace: String,
    /// ASINs to look up
    pub item_ids: Vec<String>,
    /// Resources to include in the response
    pub resources: Vec<String>,
}

impl GetItemsRequest {
    /// Creates a request for the configured marketplace with the full resource list.
    pub fn new(partner_tag: impl Into<String>, item_ids: Vec<String>) -> Self {
        Self {
            partner_tag: partner_tag.into(),
            partner_type: marketplace::PARTNER_TYPE.to_string(),
            marketplace: marketplace::MARKETPLACE.to_string(),
            item_ids,
            resources: RESOURCES.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// GetItems response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsResponse {
    /// Items found
    #[serde(default)]
    pub items_result: Option<ItemsResult>,
    /// Per-item or request-level errors
    #[serde(default)]
    pub errors: Vec<UpstreamErrorDetail>,
}

impl GetItemsResponse {
    /// Consumes the envelope, returning the raw items (empty when absent).
    pub fn into_items(self) -> Vec<RawItem> {
        self.items_result.map(|r| r.items).unwrap_or_default()
    }

    /// Returns number of items.
    pub fn count(&self) -> usize {
        self.items_result.as_ref().map_or(0, |r| r.items.len())
    }
}

/// The `ItemsResult` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResult {
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// An entry of the upstream `Errors` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpstreamErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Flattened view of one item. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
    /// Display title
    pub title: String,
    /// Display price of the first listing
    pub price: String,
    /// High resolution primary image URL
    pub image: String,
    /// Detail page URL
    pub product_url: String,
    /// Detail page URL carrying the partner tag
    pub affiliate_link: String,
    /// Whether the first listing is Prime eligible
    pub is_prime: bool,
    /// The upstream record, unmodified
    pub raw_item: RawItem,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_asin() {
        assert_eq!(normalize_asin("B0C1234567").as_deref(), Some("B0C1234567"));
        assert_eq!(normalize_asin("  b09b8v1lz3\n").as_deref(), Some("B09B8V1LZ3"));

        assert_eq!(normalize_asin(""), None);
        assert_eq!(normalize_asin("short"), None);
        assert_eq!(normalize_asin("B0C12345678"), None);
        assert_eq!(normalize_asin("B0C-123456"), None);
        assert_eq!(normalize_asin("B0C 123456"), None);
        assert_eq!(normalize_asin("B0C12345É"), None);
    }

    #[test]
    fn test_get_items_request_serializes_pascal_case() {
        let request = GetItemsRequest::new("tag-20", vec!["B0C1234567".to_string()]);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["PartnerTag"], "tag-20");
        assert_eq!(json["PartnerType"], "Associates");
        assert_eq!(json["Marketplace"], "www.amazon.com.br");
        assert_eq!(json["ItemIds"], json!(["B0C1234567"]));
        assert_eq!(json["Resources"].as_array().unwrap().len(), RESOURCES.len());
    }

    #[test]
    fn test_response_with_items() {
        let body = json!({
            "ItemsResult": {
                "Items": [
                    {"ASIN": "B0C1234567", "DetailPageURL": "https://www.amazon.com.br/dp/B0C1234567"},
                    {"ASIN": "B0C7654321"}
                ]
            }
        });

        let response: GetItemsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.count(), 2);
        assert!(response.errors.is_empty());

        let items = response.into_items();
        assert_eq!(items[0]["ASIN"], "B0C1234567");
        assert_eq!(items[1]["ASIN"], "B0C7654321");
    }

    #[test]
    fn test_response_errors_only() {
        let body = json!({
            "Errors": [{
                "__type": "com.amazon.paapi5#ErrorData",
                "Code": "ItemNotAccessible",
                "Message": "The ItemId B000000000 is not accessible through the Product Advertising API."
            }]
        });

        let response: GetItemsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.count(), 0);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].code, "ItemNotAccessible");
        assert!(response.into_items().is_empty());
    }

    #[test]
    fn test_response_empty_object() {
        let response: GetItemsResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, GetItemsResponse::default());
        assert!(response.into_items().is_empty());
    }

    #[test]
    fn test_normalized_item_camel_case() {
        let item = NormalizedItem {
            title: "Widget".to_string(),
            price: "R$ 10,00".to_string(),
            image: "https://m.media-amazon.com/images/I/x.jpg".to_string(),
            product_url: "https://www.amazon.com.br/dp/B0C1234567".to_string(),
            affiliate_link: "https://www.amazon.com.br/dp/B0C1234567?tag=tag-20".to_string(),
            is_prime: true,
            raw_item: json!({"ASIN": "B0C1234567"}),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productUrl"], "https://www.amazon.com.br/dp/B0C1234567");
        assert_eq!(json["affiliateLink"], "https://www.amazon.com.br/dp/B0C1234567?tag=tag-20");
        assert_eq!(json["isPrime"], true);
        assert_eq!(json["rawItem"]["ASIN"], "B0C1234567");
    }
}
