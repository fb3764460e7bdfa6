use axum::{
    extract::State,
    http::{StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::translate::operations::{
    BreakSentence, Detect, DictionaryLookup, LanguageCode, LanguageName, ListLanguages, Operation,
    Translate, Transliterate,
};
use crate::translate::pipeline;
use crate::translate::requests::{
    LanguageCodeQuery, LanguageCodeResponse, LanguageNameQuery, LanguageNameResponse,
};
use crate::utils::sanitize;
use crate::validation::{PathParam, Validatable, ValidatedJson};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Body-driven operations
        .route("/translate", post(run::<Translate>).fallback(invalid_route))
        .route("/detect", post(run::<Detect>).fallback(invalid_route))
        .route("/transliterate", post(run::<Transliterate>).fallback(invalid_route))
        .route("/breaksentence", post(run::<BreakSentence>).fallback(invalid_route))
        .route("/dictionarylookup", post(run::<DictionaryLookup>).fallback(invalid_route))

        // Language catalog
        .route("/languages", get(list_languages).fallback(invalid_route))
        .route("/languages/:code", get(language_name).fallback(invalid_route))
        .route("/languageCode", get(missing_language_name).fallback(invalid_route))
        .route("/languageCode/:name", get(language_code).fallback(invalid_route))

        .fallback(invalid_route)
}

/// Validate the JSON body against `O`'s rule set and run it through the pipeline
async fn run<O>(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<O::Request>,
) -> ApiResult<Json<O::Response>>
where
    O: Operation,
    O::Request: Validatable,
{
    pipeline::execute::<O>(&state, request).await.map(Json)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "apiVersion": state.config.translator.api_version,
    }))
}

async fn list_languages(State(state): State<AppState>) -> ApiResult<Json<BTreeMap<String, String>>> {
    pipeline::execute::<ListLanguages>(&state, ()).await.map(Json)
}

async fn language_name(
    State(state): State<AppState>,
    PathParam(code): PathParam<String>,
) -> ApiResult<Json<LanguageNameResponse>> {
    let query = LanguageNameQuery {
        code: sanitize(&code),
    };
    pipeline::execute::<LanguageName>(&state, query).await.map(Json)
}

async fn language_code(
    State(state): State<AppState>,
    PathParam(name): PathParam<String>,
) -> ApiResult<Json<LanguageCodeResponse>> {
    let name = sanitize(&name);
    if name.is_empty() {
        return missing_language_name().await;
    }
    pipeline::execute::<LanguageCode>(&state, LanguageCodeQuery { name })
        .await
        .map(Json)
}

async fn missing_language_name() -> ApiResult<Json<LanguageCodeResponse>> {
    Err(ApiError::BadRequest("Language name is required".to_string()))
}

async fn invalid_route(uri: Uri) -> (StatusCode, Json<Value>) {
    debug!("No route for {}", uri);
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Invalid route" })))
}
