//! Translate interface - the outbound call to the translation provider

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::Value;

use crate::error::UpstreamError;

/// A fully built outbound request
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: Url,
    pub payload: Option<Value>,
}

#[async_trait]
pub trait TranslateInterface: Send + Sync {
    /// Perform a single call and return the provider's JSON envelope
    ///
    /// No retries; a transport failure and a provider error response are
    /// both reported as [`UpstreamError`].
    async fn call(&self, request: UpstreamRequest) -> Result<Value, UpstreamError>;
}
