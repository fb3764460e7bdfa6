use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::interface::{TranslateInterface, UpstreamRequest};
use crate::config::TranslatorConfig;
use crate::error::UpstreamError;

const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";
const SUBSCRIPTION_REGION_HEADER: &str = "ocp-apim-subscription-region";

/// HTTP client for the translation provider
#[derive(Debug, Clone)]
pub struct TranslatorClient {
    client: Client,
    headers: HeaderMap,
}

/// Error body sent with non-2xx responses
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    #[serde(default)]
    code: Option<Value>,
    message: String,
}

impl TranslatorClient {
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(SUBSCRIPTION_KEY_HEADER),
            HeaderValue::from_str(&config.subscription_key)
                .context("Subscription key is not a valid header value")?,
        );
        headers.insert(
            HeaderName::from_static(SUBSCRIPTION_REGION_HEADER),
            HeaderValue::from_str(&config.region).context("Region is not a valid header value")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            client: Client::new(),
            headers,
        })
    }
}

#[async_trait]
impl TranslateInterface for TranslatorClient {
    async fn call(&self, request: UpstreamRequest) -> Result<Value, UpstreamError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(self.headers.clone());
        if let Some(payload) = &request.payload {
            builder = builder.json(payload);
        }

        let response = builder.send().await.map_err(UpstreamError::Transport)?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ProviderErrorBody>().await {
                Ok(body) => {
                    debug!("Provider error code: {:?}", body.error.code);
                    body.error.message
                }
                Err(_) => status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Translation service returned status {}", status.as_u16())),
            };
            return Err(UpstreamError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<Value>().await.map_err(UpstreamError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::builder::UpstreamBuilder;
    use crate::translate::operations::{ListLanguages, Translate};
    use crate::translate::requests::TranslationRequest;
    use axum::{
        extract::Query,
        http::{HeaderMap as AxumHeaders, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    /// Start a fake provider on an ephemeral port and return its base URL
    async fn spawn_provider(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config(endpoint: String) -> TranslatorConfig {
        TranslatorConfig {
            endpoint,
            subscription_key: "secret-key".to_string(),
            region: "westeurope".to_string(),
            api_version: "3.0".to_string(),
        }
    }

    fn hello_request() -> TranslationRequest {
        TranslationRequest {
            text: "Hello".into(),
            target_language: "fr".into(),
            source_language: None,
        }
    }

    #[tokio::test]
    async fn test_sends_headers_query_and_payload() {
        let app = Router::new().route(
            "/translate",
            post(
                |headers: AxumHeaders,
                 Query(query): Query<HashMap<String, String>>,
                 Json(body): Json<Value>| async move {
                    Json(json!({
                        "key": headers["ocp-apim-subscription-key"].to_str().unwrap(),
                        "region": headers["ocp-apim-subscription-region"].to_str().unwrap(),
                        "contentType": headers["content-type"].to_str().unwrap(),
                        "query": query,
                        "body": body,
                    }))
                },
            ),
        );
        let config = config(spawn_provider(app).await);
        let upstream = UpstreamBuilder::new(&config)
            .unwrap()
            .build::<Translate>(&hello_request());

        let echoed = TranslatorClient::new(&config).unwrap().call(upstream).await.unwrap();

        assert_eq!(echoed["key"], "secret-key");
        assert_eq!(echoed["region"], "westeurope");
        assert_eq!(echoed["contentType"], "application/json");
        assert_eq!(echoed["query"], json!({ "api-version": "3.0", "from": "en", "to": "fr" }));
        assert_eq!(echoed["body"], json!([{ "text": "Hello" }]));
    }

    #[tokio::test]
    async fn test_provider_error_message_is_surfaced() {
        let app = Router::new().route(
            "/translate",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": { "code": 400036, "message": "The target language is not valid." }
                    })),
                )
            }),
        );
        let config = config(spawn_provider(app).await);
        let upstream = UpstreamBuilder::new(&config)
            .unwrap()
            .build::<Translate>(&hello_request());

        let err = TranslatorClient::new(&config).unwrap().call(upstream).await.unwrap_err();
        match err {
            UpstreamError::Provider { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "The target language is not valid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unstructured_error_falls_back_to_status() {
        let app = Router::new().route(
            "/languages",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        );
        let config = config(spawn_provider(app).await);
        let upstream = UpstreamBuilder::new(&config).unwrap().build::<ListLanguages>(&());

        let err = TranslatorClient::new(&config).unwrap().call(upstream).await.unwrap_err();
        assert!(matches!(
            err,
            UpstreamError::Provider { status: 503, ref message } if message == "Service Unavailable"
        ));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Bind then drop to get a port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = config(format!("http://{}", addr));
        let upstream = UpstreamBuilder::new(&config).unwrap().build::<ListLanguages>(&());

        let err = TranslatorClient::new(&config).unwrap().call(upstream).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_rejects_invalid_header_values() {
        let mut config = config("http://localhost".to_string());
        config.subscription_key = "bad\nkey".to_string();
        assert!(TranslatorClient::new(&config).is_err());
    }
}
