//! Webhook route handlers.

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::amazon::models::{
    normalize_asin, GetItemsResponse, NormalizedItem, UpstreamErrorDetail,
};
use crate::amazon::normalizer::normalize_all;
use async_trait::async_trait;
use axum::extract::{FromRequest, Request, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

const INVALID_ITEM_IDS: &str = "itemIds invalid or missing";

/// Body returned by `POST /webhook`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub items: Vec<NormalizedItem>,
    /// Item-level errors reported by the upstream alongside a successful response
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<UpstreamErrorDetail>,
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string(), version: crate::version().to_string() })
}

/// Validated item ids taken from a `{"itemIds": [...]}` request body.
///
/// Any body that is not a JSON object with valid ids is rejected with a
/// 400 `ApiError`, including a missing content type or malformed JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIds(pub Vec<String>);

#[async_trait]
impl<S> FromRequest<S> for ItemIds
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await.map_err(|rejection| {
            debug!("Rejected webhook body: {}", rejection.body_text());
            ApiError::BadRequest(INVALID_ITEM_IDS.to_string())
        })?;

        parse_item_ids(&body).map(ItemIds)
    }
}

/// Receives `{"itemIds": [...]}`, relays a GetItems call, and returns normalized items.
pub async fn webhook(
    State(state): State<Arc<AppState>>,
    ItemIds(item_ids): ItemIds,
) -> ApiResult<Json<WebhookResponse>> {
    info!("Webhook received {} item id(s)", item_ids.len());

    let GetItemsResponse { items_result, errors } =
        state.api.get_items(&item_ids).await.map_err(|e| {
            error!("GetItems failed: {}", e);
            ApiError::from(e)
        })?;

    let raw_items = items_result.map(|r| r.items).unwrap_or_default();
    let items = normalize_all(raw_items, &state.partner_tag);

    Ok(Json(WebhookResponse { items, errors }))
}

/// Extracts the item ids from a webhook body.
///
/// `itemIds` must be a non-empty array of strings, each an ASIN once trimmed
/// and upper-cased.
pub fn parse_item_ids(body: &Value) -> ApiResult<Vec<String>> {
    let invalid = || ApiError::BadRequest(INVALID_ITEM_IDS.to_string());

    let ids = body.get("itemIds").and_then(Value::as_array).ok_or_else(invalid)?;
    if ids.is_empty() {
        return Err(invalid());
    }

    ids.iter().map(|id| id.as_str().and_then(normalize_asin).ok_or_else(invalid)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazon::client::ProductApi;
    use crate::amazon::models::ItemsResult;
    use crate::error::RelayError;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use serde_json::json;
    use std::sync::Mutex;

    /// Mock PA-API client for testing.
    struct MockApi {
        response: Option<GetItemsResponse>,
        seen: Mutex<Vec<Vec<String>>>,
    }

    impl MockApi {
        fn new(items: Vec<Value>) -> Self {
            Self {
                response: Some(GetItemsResponse {
                    items_result: Some(ItemsResult { items }),
                    errors: Vec::new(),
                }),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self { response: None, seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl ProductApi for MockApi {
        async fn get_items(&self, item_ids: &[String]) -> Result<GetItemsResponse, RelayError> {
            self.seen.lock().unwrap().push(item_ids.to_vec());
            self.response.clone().ok_or(RelayError::UpstreamStatus {
                status: 500,
                body: "InternalFailure".to_string(),
            })
        }
    }

    fn make_state(api: Arc<MockApi>) -> State<Arc<AppState>> {
        State(Arc::new(AppState::new(api, "tag-20")))
    }

    #[test]
    fn test_parse_item_ids_valid() {
        let ids = parse_item_ids(&json!({"itemIds": [" b0c1234567 ", "B0C7654321"]})).unwrap();
        assert_eq!(ids, vec!["B0C1234567", "B0C7654321"]);
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_parse_item_ids_invalid() {
        for body in [
            json!({}),
            json!({"itemIds": null}),
            json!({"itemIds": "B0C1234567"}),
            json!({"itemIds": []}),
            json!({"itemIds": ["B0C1234567", 42]}),
            json!({"itemIds": ["  "]}),
            json!({"itemIds": ["B0C123"]}),
            json!({"itemIds": ["B0C1234567-X"]}),
            json!(["B0C1234567"]),
        ] {
            let err = parse_item_ids(&body).unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)), "accepted {body}");
            assert_eq!(err.to_string(), "itemIds invalid or missing");
        }
    }

    #[tokio::test]
    async fn test_webhook_normalizes_items() {
        let api = Arc::new(MockApi::new(vec![
            json!({"ASIN": "B0C1234567", "DetailPageURL": "https://www.amazon.com.br/dp/B0C1234567"}),
            json!({"ASIN": "B0C7654321"}),
        ]));

        let Json(response) = webhook(
            make_state(api.clone()),
            ItemIds(vec!["B0C1234567".to_string(), "B0C7654321".to_string()]),
        )
        .await
        .unwrap();

        assert_eq!(response.items.len(), 2);
        assert_eq!(
            response.items[0].affiliate_link,
            "https://www.amazon.com.br/dp/B0C1234567?tag=tag-20"
        );
        assert_eq!(response.items[1].product_url, "URL unavailable");
        assert!(response.errors.is_empty());
        assert_eq!(api.seen.lock().unwrap().as_slice(), &[vec!["B0C1234567", "B0C7654321"]]);
    }

    #[tokio::test]
    async fn test_item_ids_extractor_accepts_json() {
        let ItemIds(ids) =
            ItemIds::from_request(json_request(r#"{"itemIds":[" b09b8v1lz3 "]}"#), &()).await.unwrap();
        assert_eq!(ids, vec!["B09B8V1LZ3"]);
    }

    #[tokio::test]
    async fn test_item_ids_extractor_rejects_unreadable_bodies() {
        let no_content_type = Request::builder()
            .method("POST")
            .uri("/webhook")
            .body(Body::from(r#"{"itemIds":["B09B8V1LZ3"]}"#))
            .unwrap();
        let text_content_type = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header(CONTENT_TYPE, "text/plain")
            .body(Body::from(r#"{"itemIds":["B09B8V1LZ3"]}"#))
            .unwrap();

        for req in [
            no_content_type,
            text_content_type,
            json_request("not json"),
            json_request(""),
            json_request(r#"{"itemIds": 5}"#),
        ] {
            let err = ItemIds::from_request(req, &()).await.unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)));
            assert_eq!(err.to_string(), "itemIds invalid or missing");
        }
    }

    #[tokio::test]
    async fn test_webhook_surfaces_upstream_failure() {
        let api = Arc::new(MockApi::failing());

        let err = webhook(make_state(api), ItemIds(vec!["B0C1234567".to_string()]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadGateway { .. }));
    }

    #[tokio::test]
    async fn test_health() {
        let Json(health) = health().await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
