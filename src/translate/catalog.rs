use std::collections::BTreeMap;

use serde::Deserialize;

/// The provider's language listing, keyed by language code
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageCatalog {
    translation: BTreeMap<String, LanguageDetails>,
}

#[derive(Debug, Clone, Deserialize)]
struct LanguageDetails {
    name: String,
    #[serde(rename = "nativeName", default)]
    native_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageCatalogEntry<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub native_name: &'a str,
}

impl LanguageCatalog {
    /// Entries in code order
    pub fn entries(&self) -> impl Iterator<Item = LanguageCatalogEntry<'_>> {
        self.translation.iter().map(|(code, details)| LanguageCatalogEntry {
            code,
            name: &details.name,
            native_name: &details.native_name,
        })
    }

    /// Reshape code → details into code → display name
    pub fn names(&self) -> BTreeMap<String, String> {
        self.entries()
            .map(|entry| (entry.code.to_string(), entry.name.to_string()))
            .collect()
    }

    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.translation.get(code).map(|details| details.name.as_str())
    }

    /// First code whose display or native name matches, ignoring case
    pub fn code_for(&self, name: &str) -> Option<&str> {
        let needle = name.to_lowercase();
        self.entries()
            .find(|entry| {
                entry.name.to_lowercase() == needle || entry.native_name.to_lowercase() == needle
            })
            .map(|entry| entry.code)
    }
}
