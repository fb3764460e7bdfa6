//! Operation descriptors
//!
//! Each provider capability is a unit type implementing [`Operation`]: it
//! names the upstream route and query, the payload, the envelope it expects
//! back and how that envelope is projected onto the public response.

use std::collections::BTreeMap;

use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use super::catalog::LanguageCatalog;
use super::requests::*;
use crate::error::{ApiError, ApiResult, UpstreamError};

pub trait Operation: Send + Sync + 'static {
    /// Name used in logs
    const NAME: &'static str;
    const METHOD: Method;
    /// Path appended to the provider endpoint
    const ROUTE: &'static str;

    type Request: Send + Sync + 'static;
    type Envelope: DeserializeOwned;
    type Response: Serialize + Send + 'static;

    /// Query parameters in addition to `api-version`
    fn query(_request: &Self::Request) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn payload(request: &Self::Request) -> Option<Value>;

    fn project(request: &Self::Request, envelope: Self::Envelope) -> ApiResult<Self::Response>;
}

fn text_payload(text: &str) -> Option<Value> {
    Some(json!([{ "text": text }]))
}

/// Per-text envelopes are arrays; the service only ever sends one text
fn first<T>(envelope: Vec<T>) -> Result<T, UpstreamError> {
    envelope
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamError::Shape("empty result array".to_string()))
}

pub struct Translate;

#[derive(Debug, Deserialize)]
pub struct TranslationResult {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: String,
}

impl Operation for Translate {
    const NAME: &'static str = "translate";
    const METHOD: Method = Method::POST;
    const ROUTE: &'static str = "/translate";

    type Request = TranslationRequest;
    type Envelope = Vec<TranslationResult>;
    type Response = TranslateResponse;

    fn query(request: &TranslationRequest) -> Vec<(&'static str, String)> {
        vec![
            ("from", request.source_language().to_string()),
            ("to", request.target_language.clone()),
        ]
    }

    fn payload(request: &TranslationRequest) -> Option<Value> {
        text_payload(&request.text)
    }

    fn project(_: &TranslationRequest, envelope: Self::Envelope) -> ApiResult<TranslateResponse> {
        let translation = first(first(envelope)?.translations)?;
        Ok(TranslateResponse {
            translated_text: translation.text,
        })
    }
}

pub struct Detect;

#[derive(Debug, Deserialize)]
pub struct DetectionResult {
    language: String,
}

impl Operation for Detect {
    const NAME: &'static str = "detect";
    const METHOD: Method = Method::POST;
    const ROUTE: &'static str = "/detect";

    type Request = DetectionRequest;
    type Envelope = Vec<DetectionResult>;
    type Response = DetectResponse;

    fn payload(request: &DetectionRequest) -> Option<Value> {
        text_payload(&request.text)
    }

    fn project(_: &DetectionRequest, envelope: Self::Envelope) -> ApiResult<DetectResponse> {
        Ok(DetectResponse {
            detected_language: first(envelope)?.language,
        })
    }
}

pub struct ListLanguages;

impl Operation for ListLanguages {
    const NAME: &'static str = "listLanguages";
    const METHOD: Method = Method::GET;
    const ROUTE: &'static str = "/languages";

    type Request = ();
    type Envelope = LanguageCatalog;
    type Response = BTreeMap<String, String>;

    fn payload(_: &()) -> Option<Value> {
        None
    }

    fn project(_: &(), catalog: LanguageCatalog) -> ApiResult<BTreeMap<String, String>> {
        Ok(catalog.names())
    }
}

/// Code → display name; an unknown code yields `null`, not a 404
pub struct LanguageName;

impl Operation for LanguageName {
    const NAME: &'static str = "languageName";
    const METHOD: Method = ListLanguages::METHOD;
    const ROUTE: &'static str = ListLanguages::ROUTE;

    type Request = LanguageNameQuery;
    type Envelope = LanguageCatalog;
    type Response = LanguageNameResponse;

    fn payload(_: &LanguageNameQuery) -> Option<Value> {
        None
    }

    fn project(query: &LanguageNameQuery, catalog: LanguageCatalog) -> ApiResult<LanguageNameResponse> {
        let language_name = catalog.name_of(&query.code).map(str::to_string);
        if language_name.is_none() {
            info!("Language code {:?} is not in the catalog", query.code);
        }
        Ok(LanguageNameResponse { language_name })
    }
}

/// Display or native name → code
pub struct LanguageCode;

impl Operation for LanguageCode {
    const NAME: &'static str = "languageCode";
    const METHOD: Method = ListLanguages::METHOD;
    const ROUTE: &'static str = ListLanguages::ROUTE;

    type Request = LanguageCodeQuery;
    type Envelope = LanguageCatalog;
    type Response = LanguageCodeResponse;

    fn payload(_: &LanguageCodeQuery) -> Option<Value> {
        None
    }

    fn project(query: &LanguageCodeQuery, catalog: LanguageCatalog) -> ApiResult<LanguageCodeResponse> {
        catalog
            .code_for(&query.name)
            .map(|code| LanguageCodeResponse {
                language_code: code.to_string(),
            })
            .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))
    }
}

pub struct Transliterate;

#[derive(Debug, Deserialize)]
pub struct TransliterationResult {
    text: String,
}

impl Operation for Transliterate {
    const NAME: &'static str = "transliterate";
    const METHOD: Method = Method::POST;
    const ROUTE: &'static str = "/transliterate";

    type Request = TransliterationRequest;
    type Envelope = Vec<TransliterationResult>;
    type Response = TransliterateResponse;

    fn query(request: &TransliterationRequest) -> Vec<(&'static str, String)> {
        vec![
            ("language", request.language.clone()),
            ("fromScript", request.from_script.clone()),
            ("toScript", request.to_script.clone()),
        ]
    }

    fn payload(request: &TransliterationRequest) -> Option<Value> {
        text_payload(&request.text)
    }

    fn project(_: &TransliterationRequest, envelope: Self::Envelope) -> ApiResult<TransliterateResponse> {
        Ok(TransliterateResponse {
            transliterated_text: first(envelope)?.text,
        })
    }
}

pub struct BreakSentence;

#[derive(Debug, Deserialize)]
pub struct SentenceBreakResult {
    #[serde(rename = "sentLen")]
    sent_len: Vec<u64>,
}

impl Operation for BreakSentence {
    const NAME: &'static str = "breakSentence";
    const METHOD: Method = Method::POST;
    const ROUTE: &'static str = "/breaksentence";

    type Request = SentenceBreakRequest;
    type Envelope = Vec<SentenceBreakResult>;
    type Response = BreakSentenceResponse;

    fn payload(request: &SentenceBreakRequest) -> Option<Value> {
        text_payload(&request.text)
    }

    fn project(_: &SentenceBreakRequest, envelope: Self::Envelope) -> ApiResult<BreakSentenceResponse> {
        Ok(BreakSentenceResponse {
            sentences: first(envelope)?.sent_len,
        })
    }
}

pub struct DictionaryLookup;

#[derive(Debug, Deserialize)]
pub struct DictionaryLookupResult {
    translations: Vec<Value>,
}

impl Operation for DictionaryLookup {
    const NAME: &'static str = "dictionaryLookup";
    const METHOD: Method = Method::POST;
    const ROUTE: &'static str = "/dictionary/lookup";

    type Request = DictionaryLookupRequest;
    type Envelope = Vec<DictionaryLookupResult>;
    type Response = DictionaryLookupResponse;

    fn query(request: &DictionaryLookupRequest) -> Vec<(&'static str, String)> {
        vec![
            ("from", request.language.clone()),
            ("to", request.to_language().to_string()),
        ]
    }

    fn payload(request: &DictionaryLookupRequest) -> Option<Value> {
        text_payload(&request.text)
    }

    fn project(_: &DictionaryLookupRequest, envelope: Self::Envelope) -> ApiResult<DictionaryLookupResponse> {
        Ok(DictionaryLookupResponse {
            entries: first(envelope)?.translations,
        })
    }
}
