use anyhow::{bail, Context, Result};
use reqwest::Url;

use super::interface::UpstreamRequest;
use super::operations::Operation;
use crate::config::TranslatorConfig;

/// Turns an operation and its validated request into an [`UpstreamRequest`]
#[derive(Debug, Clone)]
pub struct UpstreamBuilder {
    endpoint: Url,
    api_version: String,
}

impl UpstreamBuilder {
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .with_context(|| format!("Invalid translator endpoint: {}", config.endpoint))?;
        if endpoint.cannot_be_a_base() {
            bail!("Translator endpoint cannot be used as a base URL: {}", config.endpoint);
        }

        Ok(Self {
            endpoint,
            api_version: config.api_version.clone(),
        })
    }

    /// Endpoint + route, with every query value percent-encoded
    pub fn build<O: Operation>(&self, request: &O::Request) -> UpstreamRequest {
        let mut url = self.endpoint.clone();
        let path = format!("{}{}", self.endpoint.path().trim_end_matches('/'), O::ROUTE);
        url.set_path(&path);
        url.query_pairs_mut()
            .clear()
            .append_pair("api-version", &self.api_version)
            .extend_pairs(O::query(request));

        UpstreamRequest {
            method: O::METHOD,
            url,
            payload: O::payload(request),
        }
    }
}
