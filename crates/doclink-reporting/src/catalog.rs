//! Localized message templates.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ReportingError;
use crate::locale::Locale;

/// Message templates keyed by `namespace-code`, with per-locale overrides.
///
/// Resolution for a key tries the exact locale, then its language, then the
/// default bundle. A locale bundle that lacks a key falls through for that
/// key only.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    default: HashMap<String, String>,
    bundles: HashMap<Locale, HashMap<String, String>>,
}

#[derive(Deserialize)]
struct CatalogDocument {
    default: HashMap<String, String>,
    #[serde(default)]
    locales: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
    /// A catalog with only default templates.
    #[must_use]
    pub fn new(default: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            default: default.into_iter().collect(),
            bundles: HashMap::new(),
        }
    }

    /// Adds templates for `locale`.
    #[must_use]
    pub fn with_bundle(
        mut self,
        locale: Locale,
        templates: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.bundles
            .entry(locale)
            .or_default()
            .extend(templates);
        self
    }

    /// Parses a JSON document of the form
    /// `{ "default": { "ns-code": "..." }, "locales": { "ga-IE": { ... } } }`.
    ///
    /// # Errors
    ///
    /// Returns `ReportingError::InvalidCatalog` for malformed JSON and
    /// `ReportingError::InvalidLocale` for an unparseable locale key.
    pub fn from_json_str(json: &str) -> Result<Self, ReportingError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        let mut catalog = Self::new(document.default);
        for (tag, templates) in document.locales {
            catalog = catalog.with_bundle(tag.parse()?, templates);
        }
        Ok(catalog)
    }

    /// Finds the template for `key` as seen from `locale`.
    #[must_use]
    pub fn template(&self, key: &str, locale: &Locale) -> Option<&str> {
        let exact = self.bundles.get(locale).and_then(|b| b.get(key));
        let language = || {
            self.bundles
                .get(&locale.language_only())
                .and_then(|b| b.get(key))
        };
        exact
            .or_else(language)
            .or_else(|| self.default.get(key))
            .map(String::as_str)
    }
}
