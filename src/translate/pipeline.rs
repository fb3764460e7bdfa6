use tracing::debug;

use super::operations::Operation;
use crate::error::{ApiResult, UpstreamError};
use crate::state::AppState;

/// Build, call and project one operation
///
/// `request` has already been validated and sanitized. Exactly one outbound
/// call is made; any failure is returned as a single [`crate::error::ApiError`].
pub async fn execute<O: Operation>(state: &AppState, request: O::Request) -> ApiResult<O::Response> {
    let upstream = state.builder.build::<O>(&request);
    debug!("{}: {} {}", O::NAME, upstream.method, upstream.url);

    let value = state.translator.call(upstream).await?;
    let envelope: O::Envelope = serde_json::from_value(value)
        .map_err(|e| UpstreamError::Shape(format!("{} response: {}", O::NAME, e)))?;

    O::project(&request, envelope)
}
