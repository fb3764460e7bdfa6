use serde::Serialize;
use serde_json::Value;

use crate::error::FieldError;
use crate::validation::{FieldValidator, Validatable};

pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Lookups from English go to Spanish so `from` and `to` differ
const ENGLISH_LOOKUP_TARGET: &str = "es";

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
    pub source_language: Option<String>,
}

impl TranslationRequest {
    pub fn source_language(&self) -> &str {
        self.source_language
            .as_deref()
            .unwrap_or(DEFAULT_SOURCE_LANGUAGE)
    }
}

impl Validatable for TranslationRequest {
    fn from_body(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut v = FieldValidator::new(body);
        let text = v.text("text");
        let target_language = v.language_code("targetLanguage");
        let source_language = v.optional_language_code("sourceLanguage");
        v.finish()?;

        Ok(Self {
            text,
            target_language,
            source_language,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRequest {
    pub text: String,
}

impl Validatable for DetectionRequest {
    fn from_body(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut v = FieldValidator::new(body);
        let text = v.text("text");
        v.finish()?;
        Ok(Self { text })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransliterationRequest {
    pub text: String,
    pub language: String,
    pub from_script: String,
    pub to_script: String,
}

impl Validatable for TransliterationRequest {
    fn from_body(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut v = FieldValidator::new(body);
        let text = v.text("text");
        let language = v.language_code("language");
        let from_script = v.text("fromScript");
        let to_script = v.text("toScript");
        v.finish()?;

        Ok(Self {
            text,
            language,
            from_script,
            to_script,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentenceBreakRequest {
    pub text: String,
    pub language: String,
}

impl Validatable for SentenceBreakRequest {
    fn from_body(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut v = FieldValidator::new(body);
        let text = v.text("text");
        let language = v.language_code("language");
        v.finish()?;
        Ok(Self { text, language })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryLookupRequest {
    pub text: String,
    pub language: String,
}

impl DictionaryLookupRequest {
    /// Target language of the lookup
    ///
    /// Anything other than English mirrors the source language.
    pub fn to_language(&self) -> &str {
        if self.language == "en" {
            ENGLISH_LOOKUP_TARGET
        } else {
            &self.language
        }
    }
}

impl Validatable for DictionaryLookupRequest {
    fn from_body(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut v = FieldValidator::new(body);
        let text = v.text("text");
        let language = v.language_code("language");
        v.finish()?;
        Ok(Self { text, language })
    }
}

/// `GET /languages/:code`
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageNameQuery {
    pub code: String,
}

/// `GET /languageCode/:name`
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageCodeQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponse {
    pub detected_language: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageNameResponse {
    #[serde(rename = "Language Name")]
    pub language_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageCodeResponse {
    pub language_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransliterateResponse {
    pub transliterated_text: String,
}

#[derive(Debug, Serialize)]
pub struct BreakSentenceResponse {
    pub sentences: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct DictionaryLookupResponse {
    pub entries: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_translation_defaults_source_to_english() {
        let request = TranslationRequest::from_body(&json!({
            "text": "Hello",
            "targetLanguage": "fr"
        }))
        .unwrap();
        assert_eq!(request.source_language, None);
        assert_eq!(request.source_language(), "en");
    }

    #[test]
    fn test_translation_sanitizes_every_field() {
        let request = TranslationRequest::from_body(&json!({
            "text": " <em>Hello</em> there ",
            "targetLanguage": "fr",
            "sourceLanguage": "de"
        }))
        .unwrap();
        assert_eq!(request.text, "Hello there");
        assert_eq!(request.source_language(), "de");
    }

    #[test]
    fn test_missing_text_is_reported_alongside_other_errors() {
        let errors = TranslationRequest::from_body(&json!({
            "targetLanguage": "french",
            "sourceLanguage": "1"
        }))
        .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], FieldError::new("text", "text is required"));
        assert_eq!(errors[1].param, "targetLanguage");
        assert_eq!(errors[2].param, "sourceLanguage");
    }

    #[test]
    fn test_transliteration_rules() {
        let errors = TransliterationRequest::from_body(&json!({
            "text": "こんにちは",
            "language": "ja"
        }))
        .unwrap_err();
        let params: Vec<_> = errors.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(params, ["fromScript", "toScript"]);
    }

    #[test]
    fn test_dictionary_target_language() {
        let english = DictionaryLookupRequest {
            text: "fly".into(),
            language: "en".into(),
        };
        assert_eq!(english.to_language(), "es");

        let french = DictionaryLookupRequest {
            text: "voler".into(),
            language: "fr".into(),
        };
        assert_eq!(french.to_language(), "fr");
    }

    #[test]
    fn test_response_field_names() {
        assert_eq!(
            serde_json::to_value(TranslateResponse {
                translated_text: "Bonjour".into()
            })
            .unwrap(),
            json!({ "translatedText": "Bonjour" })
        );
        assert_eq!(
            serde_json::to_value(LanguageNameResponse { language_name: None }).unwrap(),
            json!({ "Language Name": null })
        );
    }
}
